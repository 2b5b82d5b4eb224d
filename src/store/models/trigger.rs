//! Keyword trigger settings model, shared by the responder plugins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default cooldown between two firings of the same keyword.
pub const DEFAULT_COOLDOWN_SECS: i64 = 3600;

/// Default generation model for the remote-composed plugin.
pub const DEFAULT_MODEL: &str = "glm-4.6";

/// One configured keyword: who it impersonates, where it fires, how often.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordRule {
    /// User whose latest message gets replied to.
    pub target_user_id: u64,

    /// Chat the keyword fires in.
    pub target_chat_id: i64,

    #[serde(default = "default_cooldown")]
    pub cooldown_secs: i64,

    /// Per-keyword switch, independent of the plugin switch.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Message to reply to; refreshed whenever the target user speaks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_message_id: Option<i32>,
}

impl KeywordRule {
    pub fn new(target_user_id: u64, target_chat_id: i64, cooldown_secs: i64) -> Self {
        Self {
            target_user_id,
            target_chat_id,
            cooldown_secs,
            enabled: true,
            anchor_message_id: None,
        }
    }
}

fn default_cooldown() -> i64 {
    DEFAULT_COOLDOWN_SECS
}

fn default_true() -> bool {
    true
}

/// Connection details for an OpenAI-compatible generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiProfile {
    /// Base URL without the `/v1/chat/completions` suffix.
    pub base_url: String,

    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Full settings document for one responder plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Global switch.
    #[serde(default)]
    pub enabled: bool,

    /// Plugin owner; unset means anyone may manage it (first configuration).
    #[serde(default)]
    pub owner_id: Option<u64>,

    #[serde(default)]
    pub keywords: HashMap<String, KeywordRule>,

    /// Generation endpoint, only present for the remote-composed plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiProfile>,
}

impl TriggerSettings {
    /// Find the rule matching a target user in a chat, with its keyword.
    pub fn rule_for_target(&self, user_id: u64, chat_id: i64) -> Option<(&str, &KeywordRule)> {
        self.keywords
            .iter()
            .find(|(_, r)| r.target_user_id == user_id && r.target_chat_id == chat_id)
            .map(|(k, r)| (k.as_str(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults_on_old_config() {
        let raw = r#"{"target_user_id": 7, "target_chat_id": -100}"#;
        let rule: KeywordRule = serde_json::from_str(raw).unwrap();
        assert_eq!(rule.cooldown_secs, DEFAULT_COOLDOWN_SECS);
        assert!(rule.enabled);
        assert!(rule.anchor_message_id.is_none());
    }

    #[test]
    fn test_template_plugin_file_has_no_api_field() {
        let settings = TriggerSettings::default();
        let raw = serde_json::to_string(&settings).unwrap();
        assert!(!raw.contains("api"));
    }

    #[test]
    fn test_rule_for_target() {
        let mut settings = TriggerSettings::default();
        settings
            .keywords
            .insert("lily".to_string(), KeywordRule::new(7, -100, 60));

        assert_eq!(settings.rule_for_target(7, -100).unwrap().0, "lily");
        assert!(settings.rule_for_target(7, -200).is_none());
        assert!(settings.rule_for_target(8, -100).is_none());
    }
}
