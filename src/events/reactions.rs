//! Auto-reaction event handler.
//!
//! Reacts to messages from configured target users once their cooldown
//! window has passed.

use teloxide::prelude::*;
use teloxide::types::ReactionType;
use tracing::{debug, info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::utils::display_name;

/// Check an incoming message against the reaction targets.
pub async fn check_reactions(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let now = chrono::Utc::now().timestamp();
    let Some(emojis) = state.reactions.ready_reactions(user.id.0, msg.chat.id.0, now) else {
        if state.reactions.is_enabled()
            && state.reactions.settings().target(user.id.0, msg.chat.id.0).is_some()
        {
            debug!("Target {} is cooling down, skipping reaction", user.id);
        }
        return Ok(());
    };

    let reactions: Vec<ReactionType> = emojis.iter().map(|e| as_reaction(e)).collect();

    match bot
        .set_message_reaction(msg.chat.id, msg.id)
        .reaction(reactions)
        .await
    {
        Ok(_) => {
            // Only a delivered reaction starts the next cooldown window.
            state.reactions.record_reaction(user.id.0, msg.chat.id.0, now)?;
            info!(
                "Reacted to {} ({}) in chat {} [{}]",
                display_name(user),
                user.id,
                msg.chat.id,
                emojis.join(" ")
            );
        }
        Err(e) => warn!("Failed to react in chat {}: {}", msg.chat.id, e),
    }

    Ok(())
}

/// A purely numeric entry is a custom-emoji id, anything else a standard emoji.
fn as_reaction(emoji: &str) -> ReactionType {
    if !emoji.is_empty() && emoji.chars().all(|c| c.is_ascii_digit()) {
        ReactionType::CustomEmoji {
            custom_emoji_id: emoji.to_string(),
        }
    } else {
        ReactionType::Emoji {
            emoji: emoji.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_entry_becomes_custom_emoji() {
        assert!(matches!(
            as_reaction("5352930934257484526"),
            ReactionType::CustomEmoji { .. }
        ));
    }

    #[test]
    fn test_plain_emoji_stays_standard() {
        assert!(matches!(as_reaction("👎"), ReactionType::Emoji { .. }));
        assert!(matches!(as_reaction(""), ReactionType::Emoji { .. }));
    }
}
