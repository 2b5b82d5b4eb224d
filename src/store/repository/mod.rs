//! Repositories over the JSON settings files.

pub mod cooldown_repo;
pub mod reaction_repo;
pub mod trigger_repo;

pub use cooldown_repo::{CooldownRepo, Gate};
pub use reaction_repo::{ReactionRepo, UpsertOutcome};
pub use trigger_repo::{AnchorClear, TriggerRepo};
