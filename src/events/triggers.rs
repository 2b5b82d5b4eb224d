//! Keyword trigger event handler.
//!
//! Handles `/keyword [name]` messages: matches them against the responder
//! plugins' rules, enforces the cooldown, composes a reply, and posts it
//! as a reply to the target user's anchored message.

use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use tracing::{info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::respond::{ReplyMode, ResponderPlugin};
use crate::store::{Gate, KeywordRule};
use crate::utils::display_name;

/// Check a message for a configured `/keyword` trigger.
pub async fn check_triggers(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
) -> anyhow::Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(body) = text.strip_prefix('/') else {
        return Ok(());
    };

    let mut parts = body.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(());
    };
    let arg = parts.next().map(str::to_string);

    // A keyword lives in at most one plugin; first match wins.
    for plugin in state.responders() {
        let Some(rule) = plugin.store.rule(keyword) else {
            continue;
        };
        if msg.chat.id.0 != rule.target_chat_id {
            continue;
        }

        return fire(bot, msg, state, plugin, keyword, arg, &rule).await;
    }

    Ok(())
}

async fn fire(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
    plugin: &ResponderPlugin,
    keyword: &str,
    arg: Option<String>,
    rule: &KeywordRule,
) -> anyhow::Result<()> {
    let label = plugin.label();

    if !plugin.store.is_enabled() {
        info!("Keyword '/{}' fired but {} is disabled", keyword, label);
        return Ok(());
    }
    if !rule.enabled {
        info!("Keyword '/{}' fired but the keyword is switched off", keyword);
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let is_owner = plugin.store.owner_id() == Some(user.id.0) || state.is_owner(user.id.0);

    let now = chrono::Utc::now().timestamp();
    if let Gate::Wait(secs) = plugin.cooldowns.check(keyword, rule.cooldown_secs, is_owner, now) {
        info!(
            "User {} fired '/{}' too soon, {}s left in the window",
            user.id, keyword, secs
        );
        return Ok(());
    }

    // Dual mode when the trigger replies to someone or carries a name.
    let second_name = arg.or_else(|| {
        msg.reply_to_message()
            .and_then(|m| m.from.as_ref())
            .map(display_name)
    });
    let mode = match second_name {
        Some(name) => ReplyMode::Dual(name),
        None => ReplyMode::Single,
    };

    // Resolve the reply target first; composing without one would be wasted.
    let Some(anchor) = rule.anchor_message_id else {
        warn!(
            "Keyword '/{}' fired but no message from target {} has been seen yet",
            keyword, rule.target_user_id
        );
        return Ok(());
    };

    let trigger_name = display_name(user);
    let reply_text = match plugin.compose(keyword, &trigger_name, &mode).await {
        Ok(Some(text)) => text,
        Ok(None) => return Ok(()),
        Err(e) => {
            // Failures stay out of the chat; the trigger just fizzles.
            warn!("Composing reply for '/{}' failed: {}", keyword, e);
            return Ok(());
        }
    };

    if let Err(e) = bot
        .send_message(msg.chat.id, &reply_text)
        .reply_parameters(ReplyParameters::new(MessageId(anchor)))
        .await
    {
        warn!("Failed to deliver '/{}' reply: {}", keyword, e);
        return Ok(());
    }

    info!(
        "Keyword '/{}' fired by {} in chat {} ({:?})",
        keyword, trigger_name, msg.chat.id, mode
    );

    plugin.cooldowns.record(keyword, now)?;

    // Tidy up the trigger message; needs delete rights, so best-effort.
    let _ = bot.delete_message(msg.chat.id, msg.id).await;

    Ok(())
}
