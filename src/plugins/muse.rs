//! Muse plugin admin commands.
//!
//! On top of the shared responder surface, muse manages its generation
//! endpoint, per-keyword switches and manual reply anchors.

use teloxide::prelude::*;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::{help, reply, responder};
use crate::respond::ResponseSource;
use crate::store::AnchorClear;
use crate::utils::html_escape;

const DENIED: &str = "❌ Only the plugin owner can do that.";

/// Handle `/muse <subcommand>`.
pub async fn muse_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let args = args.trim();
    if args.is_empty() || args.eq_ignore_ascii_case("help") {
        reply(&bot, &msg, help::muse::TEXT).await?;
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let sub = parts[0].to_lowercase();
    let params = &parts[1..];

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let plugin = &state.muse;

    match sub.as_str() {
        "toggle" => {
            if !responder::may_manage(&state, plugin, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let (Some(keyword), Some(action)) = (params.first(), params.get(1)) else {
                reply(&bot, &msg, "❌ Usage: <code>toggle &lt;keyword&gt; on|off</code>").await?;
                return Ok(());
            };
            let enabled = match action.to_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => {
                    reply(&bot, &msg, "❌ Usage: <code>toggle &lt;keyword&gt; on|off</code>").await?;
                    return Ok(());
                }
            };

            if plugin.store.toggle_keyword(keyword, enabled)? {
                reply(
                    &bot,
                    &msg,
                    &format!(
                        "✅ Keyword <code>{}</code> switched {}.",
                        html_escape(keyword),
                        if enabled { "on" } else { "off" }
                    ),
                )
                .await?;
            } else {
                reply(
                    &bot,
                    &msg,
                    &format!("❌ Keyword <code>{}</code> does not exist.", html_escape(keyword)),
                )
                .await?;
            }
        }

        "api" => {
            if !responder::may_manage(&state, plugin, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let (Some(base_url), Some(api_key)) = (params.first(), params.get(1)) else {
                reply(
                    &bot,
                    &msg,
                    "❌ Usage: <code>api &lt;url&gt; &lt;key&gt; [model]</code>\nExample: <code>/muse api http://example.com:8317 sk-xxxx glm-4.6</code>",
                )
                .await?;
                return Ok(());
            };

            if url::Url::parse(base_url).is_err() {
                reply(&bot, &msg, "❌ That does not look like a valid URL.").await?;
                return Ok(());
            }

            let profile = plugin.store.set_api(base_url, api_key, params.get(2).copied())?;
            info!("muse endpoint set to {} by user {}", profile.base_url, user_id);
            reply(
                &bot,
                &msg,
                &format!(
                    "✅ Endpoint updated.\nURL: <code>{}</code>\nModel: <code>{}</code>",
                    html_escape(&profile.base_url),
                    html_escape(&profile.model)
                ),
            )
            .await?;
        }

        "model" => {
            if !responder::may_manage(&state, plugin, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let Some(model) = params.first() else {
                reply(&bot, &msg, "❌ Usage: <code>model &lt;name&gt;</code>").await?;
                return Ok(());
            };

            match plugin.store.set_model(model)? {
                Some(model) => {
                    reply(
                        &bot,
                        &msg,
                        &format!("✅ Model switched to <code>{}</code>.", html_escape(&model)),
                    )
                    .await?;
                }
                None => {
                    reply(
                        &bot,
                        &msg,
                        "❌ Configure the endpoint first:\n<code>api &lt;url&gt; &lt;key&gt; [model]</code>",
                    )
                    .await?;
                }
            }
        }

        "test" => {
            test_endpoint(&bot, &msg, &state).await?;
        }

        "anchor" => {
            if !responder::may_manage(&state, plugin, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }
            anchor_subcommand(&bot, &msg, &state, params).await?;
        }

        "status" => {
            let settings = plugin.store.settings();
            let extra = match settings.api {
                Some(profile) => format!(
                    "Endpoint: ✅ <code>{}</code>\nModel: <code>{}</code>\n",
                    html_escape(&profile.base_url),
                    html_escape(&profile.model)
                ),
                None => "Endpoint: ❌ not configured\n".to_string(),
            };
            reply(&bot, &msg, &responder::render_status(plugin, Some(extra))).await?;
        }

        _ => {
            if !responder::handle_common(&bot, &msg, &state, plugin, &sub, params).await? {
                reply(&bot, &msg, help::muse::TEXT).await?;
            }
        }
    }

    Ok(())
}

/// `anchor set <keyword> [message_id]` (or reply to the message to anchor),
/// `anchor clear <keyword>`.
async fn anchor_subcommand(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
    params: &[&str],
) -> anyhow::Result<()> {
    let plugin = &state.muse;

    let (Some(action), Some(keyword)) = (params.first(), params.get(1)) else {
        reply(
            bot,
            msg,
            "❌ Usage: <code>anchor set &lt;keyword&gt; [message_id]</code> or <code>anchor clear &lt;keyword&gt;</code>",
        )
        .await?;
        return Ok(());
    };

    match action.to_lowercase().as_str() {
        "set" => {
            let message_id = if let Some(replied) = msg.reply_to_message() {
                replied.id.0
            } else if let Some(Ok(id)) = params.get(2).map(|p| p.parse::<i32>()) {
                id
            } else {
                reply(
                    bot,
                    msg,
                    "❌ Reply to the message to anchor, or pass its id:\n<code>anchor set &lt;keyword&gt; &lt;message_id&gt;</code>",
                )
                .await?;
                return Ok(());
            };

            if plugin.store.set_anchor(keyword, message_id)? {
                reply(
                    bot,
                    msg,
                    &format!(
                        "✅ Anchor for <code>{}</code> set to message <code>{}</code>.",
                        html_escape(keyword),
                        message_id
                    ),
                )
                .await?;
            } else {
                reply(
                    bot,
                    msg,
                    &format!("❌ Keyword <code>{}</code> does not exist.", html_escape(keyword)),
                )
                .await?;
            }
        }

        "clear" => {
            let text = match plugin.store.clear_anchor(keyword)? {
                AnchorClear::Cleared => {
                    format!("✅ Anchor for <code>{}</code> cleared.", html_escape(keyword))
                }
                AnchorClear::NoAnchor => {
                    format!("❌ Keyword <code>{}</code> has no anchor set.", html_escape(keyword))
                }
                AnchorClear::UnknownKeyword => {
                    format!("❌ Keyword <code>{}</code> does not exist.", html_escape(keyword))
                }
            };
            reply(bot, msg, &text).await?;
        }

        _ => {
            reply(bot, msg, "❌ Unknown action, use <code>set</code> or <code>clear</code>.").await?;
        }
    }

    Ok(())
}

/// Run a single- and a two-name generation to verify the endpoint works.
async fn test_endpoint(bot: &ThrottledBot, msg: &Message, state: &AppState) -> anyhow::Result<()> {
    let plugin = &state.muse;

    let Some(profile) = plugin.store.api() else {
        reply(
            bot,
            msg,
            "❌ Configure the endpoint first:\n<code>api &lt;url&gt; &lt;key&gt; [model]</code>",
        )
        .await?;
        return Ok(());
    };
    let ResponseSource::Remote(client) = &plugin.source else {
        return Ok(());
    };

    let progress = bot
        .send_message(msg.chat.id, "⏳ Testing the endpoint, single-name pass…")
        .await?;
    info!("muse endpoint test started");

    let single = match client.compose_single(&profile, "Subject A").await {
        Ok(text) => text,
        Err(e) => {
            bot.edit_message_text(
                msg.chat.id,
                progress.id,
                format!("❌ Endpoint test failed on the single-name pass:\n{}", e),
            )
            .await?;
            return Ok(());
        }
    };

    bot.edit_message_text(
        msg.chat.id,
        progress.id,
        "⏳ Single-name pass ok, two-name pass…",
    )
    .await?;

    let dual = match client.compose_dual(&profile, "Subject A", "Subject B").await {
        Ok(text) => text,
        Err(e) => {
            bot.edit_message_text(
                msg.chat.id,
                progress.id,
                format!("❌ Endpoint test failed on the two-name pass:\n{}", e),
            )
            .await?;
            return Ok(());
        }
    };

    info!("muse endpoint test passed");
    bot.edit_message_text(
        msg.chat.id,
        progress.id,
        format!(
            "✅ <b>Endpoint test passed.</b>\n\n<b>Single:</b>\n{}\n\n<b>Dual:</b>\n{}\n\nModel: <code>{}</code>\nURL: <code>{}</code>",
            html_escape(&preview(&single)),
            html_escape(&preview(&dual)),
            html_escape(&profile.model),
            html_escape(&profile.base_url)
        ),
    )
    .parse_mode(teloxide::types::ParseMode::Html)
    .await?;

    Ok(())
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 100;
    if text.chars().count() <= LIMIT {
        return text.to_string();
    }
    let cut: String = text.chars().take(LIMIT).collect();
    format!("{}...", cut)
}
