//! Reaction plugin settings model.

use serde::{Deserialize, Serialize};

/// One watched user in one chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionTarget {
    /// User whose messages get reacted to.
    pub user_id: u64,

    /// Chat the target is watched in.
    pub chat_id: i64,

    /// Minimum seconds between two reactions on this target.
    pub cooldown_secs: i64,

    /// Unix time of the last reaction, 0 = never.
    #[serde(default)]
    pub last_react_unix: i64,
}

impl ReactionTarget {
    /// Check whether the cooldown window has passed.
    pub fn can_react(&self, now: i64) -> bool {
        now - self.last_react_unix >= self.cooldown_secs
    }
}

/// Running counters, persisted with the settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionStats {
    #[serde(default)]
    pub total_reactions: u64,
}

/// Full settings document for the reaction plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSettings {
    /// Global switch.
    #[serde(default)]
    pub enabled: bool,

    /// Premium accounts may attach several reactions at once.
    #[serde(default)]
    pub premium: bool,

    /// Reaction set: standard emoji, or numeric custom-emoji ids.
    #[serde(default = "default_emojis")]
    pub emojis: Vec<String>,

    #[serde(default)]
    pub targets: Vec<ReactionTarget>,

    #[serde(default)]
    pub stats: ReactionStats,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            premium: false,
            emojis: default_emojis(),
            targets: Vec::new(),
            stats: ReactionStats::default(),
        }
    }
}

fn default_emojis() -> Vec<String> {
    vec!["👎".to_string()]
}

impl ReactionSettings {
    /// How many reactions may be attached at once.
    pub fn max_reactions(&self) -> usize {
        if self.premium { 3 } else { 1 }
    }

    /// Find the target entry for a user in a chat.
    pub fn target(&self, user_id: u64, chat_id: i64) -> Option<&ReactionTarget> {
        self.targets
            .iter()
            .find(|t| t.user_id == user_id && t.chat_id == chat_id)
    }

    pub fn target_mut(&mut self, user_id: u64, chat_id: i64) -> Option<&mut ReactionTarget> {
        self.targets
            .iter_mut()
            .find(|t| t.user_id == user_id && t.chat_id == chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_window() {
        let target = ReactionTarget {
            user_id: 1,
            chat_id: -100,
            cooldown_secs: 3600,
            last_react_unix: 1_000,
        };

        assert!(!target.can_react(1_000 + 3599));
        assert!(target.can_react(1_000 + 3600));
    }

    #[test]
    fn test_never_reacted_is_ready() {
        let target = ReactionTarget {
            user_id: 1,
            chat_id: -100,
            cooldown_secs: 3600,
            last_react_unix: 0,
        };
        assert!(target.can_react(3600));
    }

    #[test]
    fn test_reaction_cap_follows_premium() {
        let mut settings = ReactionSettings::default();
        assert_eq!(settings.max_reactions(), 1);
        settings.premium = true;
        assert_eq!(settings.max_reactions(), 3);
    }

    #[test]
    fn test_old_config_without_stats_loads() {
        let raw = r#"{"enabled": true, "emojis": ["👎"], "targets": []}"#;
        let settings: ReactionSettings = serde_json::from_str(raw).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.stats.total_reactions, 0);
    }
}
