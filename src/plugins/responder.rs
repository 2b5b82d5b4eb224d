//! Shared admin subcommands for the responder plugins.
//!
//! quips, muse and callouts expose the same management surface
//! (on/off/set/delete/list/owner/status); only muse adds to it.

use teloxide::prelude::*;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::reply;
use crate::respond::ResponderPlugin;
use crate::store::{TriggerSettings, UpsertOutcome, DEFAULT_COOLDOWN_SECS};
use crate::utils::{format_duration_full, html_escape};

/// Whether a user may manage this plugin.
///
/// An unset plugin owner means anyone may (first-configuration bootstrap);
/// global owners always may.
pub fn may_manage(state: &AppState, plugin: &ResponderPlugin, user_id: u64) -> bool {
    match plugin.store.owner_id() {
        Some(owner) => owner == user_id || state.is_owner(user_id),
        None => true,
    }
}

const DENIED: &str = "❌ Only the plugin owner can do that.";

/// Handle one of the shared subcommands. Returns false when the subcommand
/// is not part of the shared surface.
pub async fn handle_common(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
    plugin: &ResponderPlugin,
    sub: &str,
    params: &[&str],
) -> anyhow::Result<bool> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(true);
    };
    let user_id = user.id.0;

    match sub {
        "on" => {
            if !may_manage(state, plugin, user_id) {
                reply(bot, msg, DENIED).await?;
                return Ok(true);
            }
            if plugin.needs_api() && plugin.store.api().is_none() {
                reply(
                    bot,
                    msg,
                    "❌ Configure the endpoint first:\n<code>api &lt;url&gt; &lt;key&gt; [model]</code>",
                )
                .await?;
                return Ok(true);
            }

            plugin.store.set_enabled(true)?;
            info!("{} enabled by user {}", plugin.label(), user_id);

            let count = plugin.store.keyword_count();
            let text = if count == 0 {
                format!(
                    "⚠️ {} is on, but no keywords are configured yet.\nAdd one with <code>set &lt;keyword&gt; &lt;user_id&gt; &lt;chat_id&gt; [secs]</code>",
                    plugin.label()
                )
            } else {
                format!("✅ {} is on, {} keyword(s) configured.", plugin.label(), count)
            };
            reply(bot, msg, &text).await?;
        }

        "off" => {
            if !may_manage(state, plugin, user_id) {
                reply(bot, msg, DENIED).await?;
                return Ok(true);
            }
            plugin.store.set_enabled(false)?;
            info!("{} disabled by user {}", plugin.label(), user_id);
            reply(bot, msg, &format!("❌ {} is off.", plugin.label())).await?;
        }

        "set" => {
            if !may_manage(state, plugin, user_id) {
                reply(bot, msg, DENIED).await?;
                return Ok(true);
            }

            let (Some(keyword), Some(raw_user), Some(raw_chat)) =
                (params.first(), params.get(1), params.get(2))
            else {
                reply(
                    bot,
                    msg,
                    "❌ Usage: <code>set &lt;keyword&gt; &lt;user_id&gt; &lt;chat_id&gt; [secs]</code>",
                )
                .await?;
                return Ok(true);
            };

            let (Ok(target_user), Ok(target_chat)) =
                (raw_user.parse::<u64>(), raw_chat.parse::<i64>())
            else {
                reply(bot, msg, "❌ Invalid id, both ids must be numeric.").await?;
                return Ok(true);
            };

            let cooldown = match params.get(3) {
                Some(raw) => match raw.parse::<i64>() {
                    Ok(secs) if secs >= 0 => secs,
                    _ => {
                        reply(bot, msg, "❌ The cooldown must be zero or more seconds.").await?;
                        return Ok(true);
                    }
                },
                None => DEFAULT_COOLDOWN_SECS,
            };

            let outcome = plugin
                .store
                .upsert_keyword(keyword, target_user, target_chat, cooldown)?;
            let verb = match outcome {
                UpsertOutcome::Added(_) => "added",
                UpsertOutcome::Updated(_) => "updated",
            };
            reply(
                bot,
                msg,
                &format!(
                    "✅ Keyword <code>{}</code> {}.\nUser: <code>{}</code>\nChat: <code>{}</code>\nCooldown: {}",
                    html_escape(keyword),
                    verb,
                    target_user,
                    target_chat,
                    format_duration_full(cooldown as u64)
                ),
            )
            .await?;
        }

        "delete" => {
            if !may_manage(state, plugin, user_id) {
                reply(bot, msg, DENIED).await?;
                return Ok(true);
            }

            let Some(keyword) = params.first() else {
                reply(bot, msg, "❌ Usage: <code>delete &lt;keyword&gt;</code>").await?;
                return Ok(true);
            };

            if plugin.store.delete_keyword(keyword)? {
                plugin.cooldowns.clear(keyword)?;
                reply(
                    bot,
                    msg,
                    &format!("✅ Keyword <code>{}</code> deleted.", html_escape(keyword)),
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

        "list" => {
            reply(bot, msg, &render_keywords(&plugin.store.settings())).await?;
        }

        "owner" => {
            // Anyone may claim an unowned plugin; after that only the owner
            // may hand it over.
            if plugin.store.owner_id().is_some() && !may_manage(state, plugin, user_id) {
                reply(bot, msg, DENIED).await?;
                return Ok(true);
            }

            let Some(Ok(owner_id)) = params.first().map(|p| p.parse::<u64>()) else {
                reply(bot, msg, "❌ Usage: <code>owner &lt;user_id&gt;</code>").await?;
                return Ok(true);
            };

            plugin.store.set_owner(owner_id)?;
            reply(
                bot,
                msg,
                &format!("✅ Owner set to <code>{}</code>.", owner_id),
            )
            .await?;
        }

        "status" => {
            reply(bot, msg, &render_status(plugin, None)).await?;
        }

        _ => return Ok(false),
    }

    Ok(true)
}

/// Render the keyword table for list/status output.
pub fn render_keywords(settings: &TriggerSettings) -> String {
    if settings.keywords.is_empty() {
        return "No keywords configured yet.".to_string();
    }

    let mut keywords: Vec<_> = settings.keywords.iter().collect();
    keywords.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("<b>Configured keywords:</b>\n");
    for (keyword, rule) in keywords {
        let mark = if rule.enabled { "✅" } else { "❌" };
        out.push_str(&format!(
            "• {} <code>{}</code> → user <code>{}</code>, chat <code>{}</code>, every {}\n",
            mark,
            html_escape(keyword),
            rule.target_user_id,
            rule.target_chat_id,
            format_duration_full(rule.cooldown_secs as u64)
        ));
    }
    out
}

/// Render the status block. `extra` is inserted between the header and the
/// keyword table (muse adds its endpoint details there).
pub fn render_status(plugin: &ResponderPlugin, extra: Option<String>) -> String {
    let settings = plugin.store.settings();

    let enabled = if settings.enabled { "✅ on" } else { "❌ off" };
    let owner = settings
        .owner_id
        .map(|id| format!("<code>{}</code>", id))
        .unwrap_or_else(|| "not set".to_string());

    let mut out = format!(
        "<b>{} status</b>\n\nState: {}\nOwner: {}\n",
        plugin.label(),
        enabled,
        owner
    );
    if let Some(extra) = extra {
        out.push_str(&extra);
    }
    out.push('\n');
    out.push_str(&render_keywords(&settings));
    out.push_str("\nCooldown: the owner is exempt, everyone else per keyword.\n");
    out.push_str("Trigger: <code>/keyword</code> or <code>/keyword name</code>");
    out
}
