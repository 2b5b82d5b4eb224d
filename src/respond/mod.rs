//! Response selection for the responder plugins.
//!
//! Each plugin pairs a keyword store and a trigger log with a response
//! source: a fixed template pool, or the remote generation endpoint.

pub mod ai;
pub mod templates;

pub use ai::{AiClient, AiError};
pub use templates::TemplatePool;

use tracing::warn;

use crate::store::{CooldownRepo, TriggerRepo};

/// Whether a trigger fires in single-name or two-name mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMode {
    Single,
    /// Second display name, from the trigger argument or the replied-to user.
    Dual(String),
}

/// How a plugin binds names in dual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualNaming {
    /// `{name}` = keyword persona, `{target}` = the second name.
    KeywordThenSecond,
    /// `{name}` = whoever triggered, `{target}` = keyword persona.
    TriggerThenKeyword,
}

pub enum ResponseSource {
    Templates(&'static TemplatePool),
    Remote(AiClient),
}

/// One responder plugin: keyword rules, trigger log, and a way to compose.
pub struct ResponderPlugin {
    pub store: TriggerRepo,
    pub cooldowns: CooldownRepo,
    pub source: ResponseSource,
    pub naming: DualNaming,
}

impl ResponderPlugin {
    pub fn label(&self) -> &'static str {
        self.store.label()
    }

    /// Whether this plugin needs a configured endpoint before it can fire.
    pub fn needs_api(&self) -> bool {
        matches!(self.source, ResponseSource::Remote(_))
    }

    /// Compose the reply text for a fired keyword.
    ///
    /// `Ok(None)` means the plugin cannot compose right now (endpoint not
    /// configured); generation failures come back as `Err` for the caller
    /// to log; nothing is ever posted about them in the chat.
    pub async fn compose(
        &self,
        keyword: &str,
        trigger_name: &str,
        mode: &ReplyMode,
    ) -> Result<Option<String>, AiError> {
        match &self.source {
            ResponseSource::Templates(pool) => {
                let text = match mode {
                    ReplyMode::Single => pool.render_single(keyword),
                    ReplyMode::Dual(second) => match self.naming {
                        DualNaming::KeywordThenSecond => pool.render_dual(keyword, second),
                        DualNaming::TriggerThenKeyword => pool.render_dual(trigger_name, keyword),
                    },
                };
                Ok(Some(text))
            }
            ResponseSource::Remote(client) => {
                let Some(profile) = self.store.api() else {
                    warn!("Keyword '{}' fired but {} has no endpoint configured", keyword, self.label());
                    return Ok(None);
                };

                let text = match mode {
                    ReplyMode::Single => client.compose_single(&profile, keyword).await?,
                    ReplyMode::Dual(second) => {
                        client.compose_dual(&profile, keyword, second).await?
                    }
                };
                Ok(Some(text))
            }
        }
    }
}
