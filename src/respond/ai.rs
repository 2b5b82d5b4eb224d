//! Client for an OpenAI-compatible text-generation endpoint.
//!
//! Used by the muse plugin to compose replies on the fly instead of picking
//! from a fixed pool.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::ApiProfile;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One automatic retry after the first failed attempt.
const MAX_ATTEMPTS: u32 = 2;

const MAX_REPLY_CHARS: usize = 600;

const SYSTEM_PROMPT: &str = "You are a writer of short, atmospheric vignettes \
in a light mock-classical register: lamplight, tea, weather, sidelong glances, \
gentle teasing. Write exactly one paragraph of 60 to 120 words. Output only \
the vignette itself: no preamble, no options, no explanations, no headings.";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("request timed out")]
    Timeout,

    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("malformed endpoint response")]
    Malformed,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Transport(e)
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Thin wrapper over a shared HTTP client. The endpoint itself comes from
/// the plugin's stored [`ApiProfile`] on every call, so reconfiguring it
/// needs no restart.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
}

impl AiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Compose a vignette about one person.
    pub async fn compose_single(&self, profile: &ApiProfile, name: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Write a vignette about {name} alone in the evening: restless, \
             a little theatrical, up to nothing in particular. One paragraph."
        );
        self.call(profile, &prompt).await
    }

    /// Compose a vignette about two people.
    pub async fn compose_dual(
        &self,
        profile: &ApiProfile,
        name: &str,
        target: &str,
    ) -> Result<String, AiError> {
        let prompt = format!(
            "Write a vignette about {name} and {target} in the same room: \
             small talk on the surface, an obvious undercurrent of mutual \
             teasing underneath. One paragraph."
        );
        self.call(profile, &prompt).await
    }

    async fn call(&self, profile: &ApiProfile, user_prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/v1/chat/completions",
            profile.base_url.trim_end_matches('/')
        );

        let mut last_error = AiError::Malformed;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(&url, profile, user_prompt).await {
                Ok(raw) => return Ok(extract_reply(&raw)),
                Err(e) => {
                    warn!("Generation attempt {}/{} failed: {}", attempt, MAX_ATTEMPTS, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn attempt(
        &self,
        url: &str,
        profile: &ApiProfile,
        user_prompt: &str,
    ) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &profile.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: user_prompt },
            ],
            temperature: 0.9,
            max_tokens: 1024,
        };

        let response = self
            .http
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&profile.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::Status(response.status()));
        }

        let body: ChatResponse = response.json().await.map_err(|_| AiError::Malformed)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AiError::Malformed)?;

        if content.trim().is_empty() {
            return Err(AiError::Malformed);
        }
        Ok(content)
    }
}

impl Default for AiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Markers of meta/planning paragraphs that some models emit despite the
/// system prompt.
const META_MARKERS: &[&str] = &[
    "outline",
    "draft",
    "step ",
    "option ",
    "version ",
    "first,",
    "here is",
    "here's",
    "sure,",
    "revision",
    "final answer",
];

/// Pull the actual vignette out of a raw model reply.
///
/// Drops paragraphs that look like planning or headings, keeps the longest
/// surviving one, and clamps runaway output.
fn extract_reply(raw: &str) -> String {
    let paragraphs: Vec<&str> = raw
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let body = match paragraphs.as_slice() {
        [] => raw.trim(),
        [only] => *only,
        many => {
            let kept: Vec<&&str> = many
                .iter()
                .filter(|p| {
                    let lower = p.to_lowercase();
                    if META_MARKERS.iter().any(|m| lower.contains(m)) {
                        return false;
                    }
                    // Short lines ending in a colon are headings.
                    !(p.len() < 40 && p.ends_with(':'))
                })
                .collect();

            match kept.iter().max_by_key(|p| p.len()) {
                Some(longest) => **longest,
                None => many
                    .iter()
                    .max_by_key(|p| p.len())
                    .copied()
                    .unwrap_or(raw.trim()),
            }
        }
    };

    clamp(body, MAX_REPLY_CHARS)
}

fn clamp(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_paragraph_passes_through() {
        let raw = "The lamp gutters and lily pretends not to notice.";
        assert_eq!(extract_reply(raw), raw);
    }

    #[test]
    fn test_meta_paragraphs_are_dropped() {
        let raw = "Here is a draft outline of the vignette:\n\n\
                   The lamp gutters and lily pretends not to notice, \
                   tracing the rim of a cooling cup while the rain keeps time on the tiles.";
        let reply = extract_reply(raw);
        assert!(!reply.to_lowercase().contains("outline"));
        assert!(reply.contains("lamp gutters"));
    }

    #[test]
    fn test_headings_are_dropped() {
        let raw = "Vignette:\nThe night is long and lily is longer awake, \
                   composing messages that will never be sent.";
        let reply = extract_reply(raw);
        assert!(!reply.starts_with("Vignette:"));
    }

    #[test]
    fn test_all_meta_falls_back_to_longest() {
        let raw = "Here is option one.\nHere is option two, slightly longer.";
        let reply = extract_reply(raw);
        assert_eq!(reply, "Here is option two, slightly longer.");
    }

    #[test]
    fn test_runaway_output_is_clamped() {
        let raw = "a".repeat(2 * MAX_REPLY_CHARS);
        let reply = extract_reply(&raw);
        assert!(reply.chars().count() <= MAX_REPLY_CHARS + 3);
        assert!(reply.ends_with("..."));
    }

    #[test]
    fn test_timeout_maps_to_its_own_variant() {
        // Only the mapping logic is exercised here; no request is made.
        let e = AiError::Timeout;
        assert_eq!(e.to_string(), "request timed out");
    }
}
