//! Charforge engine library.
//!
//! Server-side code for character creation: the ability score workflow over
//! stored characters, and the Open5e reference data import.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the domain crate
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
