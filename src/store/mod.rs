//! JSON-file-backed settings stores.

mod json;
mod models;
mod repository;

pub use json::JsonFile;
pub use models::*;
pub use repository::{AnchorClear, CooldownRepo, Gate, ReactionRepo, TriggerRepo, UpsertOutcome};
