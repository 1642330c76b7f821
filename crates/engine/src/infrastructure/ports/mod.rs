//! Port traits for infrastructure boundaries.
//!
//! Use cases only talk to storage, the reference dump and the clock through
//! these traits. Adapters live next door in `memory`, `sqlite`, `importers`
//! and `clock`.

mod clock;
mod error;
mod external;
mod repos;
pub mod types;

pub use clock::ClockPort;
pub use error::{RepoError, SourceError};
pub use external::ReferenceSource;
pub use repos::{CharacterRepo, ReferenceRepo};
pub use types::{InvalidReferenceKind, ReferenceFeed, ReferenceKind, ReferenceRow};

// Mocks only exist in test builds.
#[cfg(test)]
pub use clock::MockClockPort;
#[cfg(test)]
pub use external::MockReferenceSource;
#[cfg(test)]
pub use repos::{MockCharacterRepo, MockReferenceRepo};
