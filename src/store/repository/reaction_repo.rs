//! Reaction settings repository.

use std::path::PathBuf;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::info;

use crate::store::json::JsonFile;
use crate::store::models::{ReactionSettings, ReactionTarget};

/// Outcome of an upsert, for user-facing confirmation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New entry, 1-based position.
    Added(usize),
    /// Existing entry updated, 1-based position.
    Updated(usize),
}

/// In-memory reaction settings with write-through JSON persistence.
pub struct ReactionRepo {
    file: JsonFile<ReactionSettings>,
    state: RwLock<ReactionSettings>,
}

impl ReactionRepo {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file: JsonFile<ReactionSettings> = JsonFile::new(path);
        let state = file.load_or_default();
        info!(
            "Reaction settings loaded: {} target(s), {} reaction(s) sent so far",
            state.targets.len(),
            state.stats.total_reactions
        );
        Self {
            file,
            state: RwLock::new(state),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        let mut state = self.state.write();
        state.enabled = enabled;
        self.file.save(&state)
    }

    pub fn set_premium(&self, premium: bool) -> Result<()> {
        let mut state = self.state.write();
        state.premium = premium;
        self.file.save(&state)
    }

    pub fn max_reactions(&self) -> usize {
        self.state.read().max_reactions()
    }

    /// Replace the reaction set. The caller enforces the premium cap.
    pub fn set_emojis(&self, emojis: Vec<String>) -> Result<()> {
        let mut state = self.state.write();
        state.emojis = emojis;
        self.file.save(&state)
    }

    /// Add a target, or update its cooldown if the user+chat pair exists.
    ///
    /// Updating resets the target's last-reaction stamp so the new cooldown
    /// takes effect immediately.
    pub fn upsert_target(&self, user_id: u64, chat_id: i64, cooldown_secs: i64) -> Result<UpsertOutcome> {
        let mut state = self.state.write();

        let outcome = if let Some(pos) = state
            .targets
            .iter()
            .position(|t| t.user_id == user_id && t.chat_id == chat_id)
        {
            let target = &mut state.targets[pos];
            target.cooldown_secs = cooldown_secs;
            target.last_react_unix = 0;
            UpsertOutcome::Updated(pos + 1)
        } else {
            state.targets.push(ReactionTarget {
                user_id,
                chat_id,
                cooldown_secs,
                last_react_unix: 0,
            });
            UpsertOutcome::Added(state.targets.len())
        };

        self.file.save(&state)?;
        Ok(outcome)
    }

    /// Remove a target by its 1-based position. Returns the removed entry.
    pub fn remove_target(&self, index: usize) -> Result<Option<ReactionTarget>> {
        let mut state = self.state.write();
        if index == 0 || index > state.targets.len() {
            return Ok(None);
        }

        let removed = state.targets.remove(index - 1);
        self.file.save(&state)?;
        Ok(Some(removed))
    }

    /// The reaction set to send for a target that is ready, capped to what
    /// the account may attach. `None` when disabled, unknown, or cooling down.
    pub fn ready_reactions(&self, user_id: u64, chat_id: i64, now: i64) -> Option<Vec<String>> {
        let state = self.state.read();
        if !state.enabled {
            return None;
        }

        let target = state.target(user_id, chat_id)?;
        if !target.can_react(now) {
            return None;
        }

        let cap = state.max_reactions();
        Some(state.emojis.iter().take(cap).cloned().collect())
    }

    /// Stamp a successful reaction and bump the counter.
    pub fn record_reaction(&self, user_id: u64, chat_id: i64, now: i64) -> Result<()> {
        let mut state = self.state.write();
        match state.target_mut(user_id, chat_id) {
            Some(target) => target.last_react_unix = now,
            None => return Ok(()),
        }
        state.stats.total_reactions += 1;
        self.file.save(&state)
    }

    /// Snapshot for status rendering.
    pub fn settings(&self) -> ReactionSettings {
        self.state.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, ReactionRepo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = ReactionRepo::open(dir.path().join("reactions.json"));
        (dir, repo)
    }

    #[test]
    fn test_upsert_then_update_resets_stamp() {
        let (_dir, repo) = repo();

        assert_eq!(repo.upsert_target(7, -100, 120).unwrap(), UpsertOutcome::Added(1));
        repo.set_enabled(true).unwrap();
        repo.record_reaction(7, -100, 1_000).unwrap();

        assert_eq!(repo.upsert_target(7, -100, 60).unwrap(), UpsertOutcome::Updated(1));
        // Stamp was reset, so the target is immediately ready again.
        assert!(repo.ready_reactions(7, -100, 1_001).is_some());
    }

    #[test]
    fn test_ready_respects_cooldown_and_switch() {
        let (_dir, repo) = repo();
        repo.upsert_target(7, -100, 3600).unwrap();

        assert!(repo.ready_reactions(7, -100, 10).is_none(), "disabled");

        repo.set_enabled(true).unwrap();
        assert!(repo.ready_reactions(7, -100, 10).is_some());

        repo.record_reaction(7, -100, 10).unwrap();
        assert!(repo.ready_reactions(7, -100, 3_000).is_none(), "cooling down");
        assert!(repo.ready_reactions(7, -100, 10 + 3600).is_some());
    }

    #[test]
    fn test_reaction_set_capped_without_premium() {
        let (_dir, repo) = repo();
        repo.set_enabled(true).unwrap();
        repo.upsert_target(7, -100, 60).unwrap();
        repo.set_emojis(vec!["👎".into(), "😆".into(), "🤔".into()]).unwrap();

        assert_eq!(repo.ready_reactions(7, -100, 0).unwrap().len(), 1);

        repo.set_premium(true).unwrap();
        assert_eq!(repo.ready_reactions(7, -100, 0).unwrap().len(), 3);
    }

    #[test]
    fn test_remove_target_by_position() {
        let (_dir, repo) = repo();
        repo.upsert_target(7, -100, 60).unwrap();
        repo.upsert_target(8, -100, 60).unwrap();

        assert!(repo.remove_target(0).unwrap().is_none());
        assert!(repo.remove_target(3).unwrap().is_none());

        let removed = repo.remove_target(1).unwrap().unwrap();
        assert_eq!(removed.user_id, 7);
        assert_eq!(repo.settings().targets.len(), 1);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reactions.json");

        {
            let repo = ReactionRepo::open(&path);
            repo.set_enabled(true).unwrap();
            repo.upsert_target(7, -100, 60).unwrap();
            repo.record_reaction(7, -100, 500).unwrap();
        }

        let repo = ReactionRepo::open(&path);
        let settings = repo.settings();
        assert!(settings.enabled);
        assert_eq!(settings.stats.total_reactions, 1);
        assert_eq!(settings.target(7, -100).unwrap().last_react_unix, 500);
    }
}
