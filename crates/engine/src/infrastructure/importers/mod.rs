//! Reference data importers.
//!
//! Reads Open5e dumps and converts their records into rows for the
//! reference tables.

mod dump_source;
mod open5e;
mod open5e_types;

pub use dump_source::ReferenceDumpSource;
pub use open5e::{transform, SkipReason};
