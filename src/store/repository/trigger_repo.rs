//! Keyword trigger repository, one instance per responder plugin.

use std::path::PathBuf;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::info;

use crate::store::json::JsonFile;
use crate::store::models::{ApiProfile, KeywordRule, TriggerSettings, DEFAULT_MODEL};
use crate::store::repository::reaction_repo::UpsertOutcome;

/// Outcome of clearing a keyword's reply anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorClear {
    Cleared,
    NoAnchor,
    UnknownKeyword,
}

/// In-memory trigger settings with write-through JSON persistence.
pub struct TriggerRepo {
    label: &'static str,
    file: JsonFile<TriggerSettings>,
    state: RwLock<TriggerSettings>,
}

impl TriggerRepo {
    pub fn open(label: &'static str, path: impl Into<PathBuf>) -> Self {
        let file: JsonFile<TriggerSettings> = JsonFile::new(path);
        let state = file.load_or_default();
        info!("{} settings loaded: {} keyword(s)", label, state.keywords.len());
        Self {
            label,
            file,
            state: RwLock::new(state),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        let mut state = self.state.write();
        state.enabled = enabled;
        self.file.save(&state)
    }

    pub fn owner_id(&self) -> Option<u64> {
        self.state.read().owner_id
    }

    pub fn set_owner(&self, owner_id: u64) -> Result<()> {
        let mut state = self.state.write();
        state.owner_id = Some(owner_id);
        self.file.save(&state)
    }

    pub fn keyword_count(&self) -> usize {
        self.state.read().keywords.len()
    }

    pub fn rule(&self, keyword: &str) -> Option<KeywordRule> {
        self.state.read().keywords.get(keyword).cloned()
    }

    /// Add a keyword, or update an existing one.
    ///
    /// An update keeps the stored reply anchor and the per-keyword switch,
    /// so re-configuring a keyword never silently re-enables it.
    pub fn upsert_keyword(
        &self,
        keyword: &str,
        target_user_id: u64,
        target_chat_id: i64,
        cooldown_secs: i64,
    ) -> Result<UpsertOutcome> {
        let mut state = self.state.write();

        let mut rule = KeywordRule::new(target_user_id, target_chat_id, cooldown_secs);
        let outcome = match state.keywords.get(keyword) {
            Some(existing) => {
                rule.anchor_message_id = existing.anchor_message_id;
                rule.enabled = existing.enabled;
                UpsertOutcome::Updated(state.keywords.len())
            }
            None => UpsertOutcome::Added(state.keywords.len() + 1),
        };

        state.keywords.insert(keyword.to_string(), rule);
        self.file.save(&state)?;
        Ok(outcome)
    }

    pub fn delete_keyword(&self, keyword: &str) -> Result<bool> {
        let mut state = self.state.write();
        let removed = state.keywords.remove(keyword).is_some();
        if removed {
            self.file.save(&state)?;
        }
        Ok(removed)
    }

    /// Flip a keyword's own switch. Returns false for unknown keywords.
    pub fn toggle_keyword(&self, keyword: &str, enabled: bool) -> Result<bool> {
        let mut state = self.state.write();
        match state.keywords.get_mut(keyword) {
            Some(rule) => {
                rule.enabled = enabled;
                self.file.save(&state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_anchor(&self, keyword: &str, message_id: i32) -> Result<bool> {
        let mut state = self.state.write();
        match state.keywords.get_mut(keyword) {
            Some(rule) => {
                rule.anchor_message_id = Some(message_id);
                self.file.save(&state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear_anchor(&self, keyword: &str) -> Result<AnchorClear> {
        let mut state = self.state.write();
        match state.keywords.get_mut(keyword) {
            Some(rule) if rule.anchor_message_id.is_some() => {
                rule.anchor_message_id = None;
                self.file.save(&state)?;
                Ok(AnchorClear::Cleared)
            }
            Some(_) => Ok(AnchorClear::NoAnchor),
            None => Ok(AnchorClear::UnknownKeyword),
        }
    }

    /// Refresh the reply anchor of the rule watching this user in this chat.
    ///
    /// Returns the keyword that was updated, if any.
    pub fn record_anchor(&self, user_id: u64, chat_id: i64, message_id: i32) -> Result<Option<String>> {
        let mut state = self.state.write();

        let keyword = match state.rule_for_target(user_id, chat_id) {
            Some((keyword, _)) => keyword.to_string(),
            None => return Ok(None),
        };

        if let Some(rule) = state.keywords.get_mut(&keyword) {
            rule.anchor_message_id = Some(message_id);
        }
        self.file.save(&state)?;
        Ok(Some(keyword))
    }

    pub fn api(&self) -> Option<ApiProfile> {
        self.state.read().api.clone()
    }

    /// Store the generation endpoint. A missing model keeps the previous
    /// one (or the default on first configuration).
    pub fn set_api(&self, base_url: &str, api_key: &str, model: Option<&str>) -> Result<ApiProfile> {
        let mut state = self.state.write();

        let model = model
            .map(str::to_string)
            .or_else(|| state.api.as_ref().map(|p| p.model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let profile = ApiProfile {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model,
        };
        state.api = Some(profile.clone());
        self.file.save(&state)?;
        Ok(profile)
    }

    /// Switch the model on the stored endpoint. `None` when no endpoint
    /// has been configured yet.
    pub fn set_model(&self, model: &str) -> Result<Option<String>> {
        let mut state = self.state.write();
        match state.api.as_mut() {
            Some(profile) => {
                profile.model = model.to_string();
                let model = profile.model.clone();
                self.file.save(&state)?;
                Ok(Some(model))
            }
            None => Ok(None),
        }
    }

    /// Snapshot for status rendering.
    pub fn settings(&self) -> TriggerSettings {
        self.state.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, TriggerRepo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = TriggerRepo::open("quips", dir.path().join("quips.json"));
        (dir, repo)
    }

    #[test]
    fn test_upsert_preserves_anchor_and_switch() {
        let (_dir, repo) = repo();
        repo.upsert_keyword("lily", 7, -100, 3600).unwrap();
        repo.set_anchor("lily", 42).unwrap();
        repo.toggle_keyword("lily", false).unwrap();

        repo.upsert_keyword("lily", 7, -100, 60).unwrap();

        let rule = repo.rule("lily").unwrap();
        assert_eq!(rule.cooldown_secs, 60);
        assert_eq!(rule.anchor_message_id, Some(42));
        assert!(!rule.enabled);
    }

    #[test]
    fn test_delete_unknown_keyword() {
        let (_dir, repo) = repo();
        assert!(!repo.delete_keyword("ghost").unwrap());
        assert!(!repo.toggle_keyword("ghost", true).unwrap());
    }

    #[test]
    fn test_anchor_lifecycle() {
        let (_dir, repo) = repo();
        repo.upsert_keyword("lily", 7, -100, 3600).unwrap();

        assert_eq!(repo.clear_anchor("lily").unwrap(), AnchorClear::NoAnchor);
        assert_eq!(repo.clear_anchor("ghost").unwrap(), AnchorClear::UnknownKeyword);

        assert!(repo.set_anchor("lily", 42).unwrap());
        assert_eq!(repo.clear_anchor("lily").unwrap(), AnchorClear::Cleared);
        assert!(repo.rule("lily").unwrap().anchor_message_id.is_none());
    }

    #[test]
    fn test_record_anchor_matches_target_not_keyword() {
        let (_dir, repo) = repo();
        repo.upsert_keyword("lily", 7, -100, 3600).unwrap();

        assert_eq!(repo.record_anchor(7, -100, 9).unwrap().as_deref(), Some("lily"));
        assert_eq!(repo.rule("lily").unwrap().anchor_message_id, Some(9));

        assert!(repo.record_anchor(7, -200, 9).unwrap().is_none());
        assert!(repo.record_anchor(8, -100, 9).unwrap().is_none());
    }

    #[test]
    fn test_api_profile_model_handling() {
        let (_dir, repo) = repo();
        assert!(repo.set_model("gpt-4").unwrap().is_none(), "no endpoint yet");

        let profile = repo.set_api("http://example.com:8317/", "sk-xxxx", None).unwrap();
        assert_eq!(profile.base_url, "http://example.com:8317");
        assert_eq!(profile.model, DEFAULT_MODEL);

        assert_eq!(repo.set_model("gpt-4").unwrap().as_deref(), Some("gpt-4"));
        // Re-setting the endpoint without a model keeps the switched one.
        let profile = repo.set_api("http://example.com:8317", "sk-yyyy", None).unwrap();
        assert_eq!(profile.model, "gpt-4");
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quips.json");

        {
            let repo = TriggerRepo::open("quips", &path);
            repo.set_enabled(true).unwrap();
            repo.set_owner(99).unwrap();
            repo.upsert_keyword("lily", 7, -100, 1800).unwrap();
        }

        let repo = TriggerRepo::open("quips", &path);
        assert!(repo.is_enabled());
        assert_eq!(repo.owner_id(), Some(99));
        assert_eq!(repo.rule("lily").unwrap().cooldown_secs, 1800);
    }
}
