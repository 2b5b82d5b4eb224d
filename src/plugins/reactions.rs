//! Reaction plugin admin commands.

use teloxide::prelude::*;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::{help, reply};
use crate::store::UpsertOutcome;
use crate::utils::format_duration_full;

/// Minimum reaction cooldown the command accepts.
const MIN_COOLDOWN_SECS: i64 = 60;

/// Whether a user may manage the reaction plugin.
///
/// Gated on the global owner list; an empty list means anyone may
/// (first-configuration bootstrap).
fn may_manage(state: &AppState, user_id: u64) -> bool {
    state.owner_ids.is_empty() || state.is_owner(user_id)
}

const DENIED: &str = "❌ Only a bot owner can do that.";

/// Handle `/reactions <subcommand>`.
pub async fn reactions_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let args = args.trim();
    if args.is_empty() || args.eq_ignore_ascii_case("help") {
        reply(&bot, &msg, help::reactions::TEXT).await?;
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let sub = parts[0].to_lowercase();
    let params = &parts[1..];

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0;

    match sub.as_str() {
        "on" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }
            state.reactions.set_enabled(true)?;
            info!("Auto-reactions enabled by user {}", user_id);
            reply(
                &bot,
                &msg,
                "✅ <b>Auto-reactions are on.</b>\nNow watching the configured targets.",
            )
            .await?;
        }

        "off" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }
            state.reactions.set_enabled(false)?;
            info!("Auto-reactions disabled by user {}", user_id);
            reply(&bot, &msg, "❌ <b>Auto-reactions are off.</b>").await?;
        }

        "set" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let parsed = (
                params.first().and_then(|p| p.parse::<u64>().ok()),
                params.get(1).and_then(|p| p.parse::<i64>().ok()),
                params.get(2).and_then(|p| p.parse::<i64>().ok()),
            );
            let (Some(target_user), Some(target_chat), Some(cooldown)) = parsed else {
                reply(
                    &bot,
                    &msg,
                    "❌ Usage: <code>set &lt;user_id&gt; &lt;chat_id&gt; &lt;secs&gt;</code>\nExample: <code>/reactions set 123456789 -1001234567890 3600</code>",
                )
                .await?;
                return Ok(());
            };

            if cooldown < MIN_COOLDOWN_SECS {
                reply(
                    &bot,
                    &msg,
                    &format!("❌ The cooldown cannot be under {} seconds.", MIN_COOLDOWN_SECS),
                )
                .await?;
                return Ok(());
            }

            let outcome = state.reactions.upsert_target(target_user, target_chat, cooldown)?;
            let headline = match outcome {
                UpsertOutcome::Added(n) => format!("✅ Added target #{}", n),
                UpsertOutcome::Updated(n) => format!("✅ Updated target #{}", n),
            };
            reply(
                &bot,
                &msg,
                &format!(
                    "{}\n\nUser: <code>{}</code>\nChat: <code>{}</code>\nCooldown: {}",
                    headline,
                    target_user,
                    target_chat,
                    format_duration_full(cooldown as u64)
                ),
            )
            .await?;
        }

        "remove" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let Some(Ok(index)) = params.first().map(|p| p.parse::<usize>()) else {
                reply(&bot, &msg, "❌ Usage: <code>remove &lt;index&gt;</code> (see <code>list</code>)").await?;
                return Ok(());
            };

            match state.reactions.remove_target(index)? {
                Some(removed) => {
                    reply(
                        &bot,
                        &msg,
                        &format!(
                            "✅ Removed target #{}\nUser: <code>{}</code>\nChat: <code>{}</code>",
                            index, removed.user_id, removed.chat_id
                        ),
                    )
                    .await?;
                }
                None => reply(&bot, &msg, "❌ No target with that index.").await?,
            }
        }

        "list" => {
            reply(&bot, &msg, &render_targets(&state)).await?;
        }

        "emoji" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let max = state.reactions.max_reactions();
            if params.is_empty() {
                reply(
                    &bot,
                    &msg,
                    &format!(
                        "❌ Usage: <code>emoji &lt;emoji…&gt;</code>\n\n\
                         • standard emoji: <code>/reactions emoji 👎</code>\n\
                         • custom emoji id (digits only): <code>/reactions emoji 5352930934257484526</code>\n\n\
                         At most {} at a time on this account.",
                        max
                    ),
                )
                .await?;
                return Ok(());
            }

            if params.len() > max {
                reply(
                    &bot,
                    &msg,
                    &format!(
                        "❌ <b>Too many.</b> This account can attach at most {} reaction(s).\nTurn on <code>premium</code> if the account has it.",
                        max
                    ),
                )
                .await?;
                return Ok(());
            }

            let emojis: Vec<String> = params.iter().map(|p| p.to_string()).collect();
            let shown = emojis.join(" ");
            state.reactions.set_emojis(emojis)?;
            reply(
                &bot,
                &msg,
                &format!("✅ Reaction set updated: {} ({}/{})", shown, params.len(), max),
            )
            .await?;
        }

        "premium" => {
            if !may_manage(&state, user_id) {
                reply(&bot, &msg, DENIED).await?;
                return Ok(());
            }

            let premium = match params.first().map(|p| p.to_lowercase()).as_deref() {
                Some("on") => true,
                Some("off") => false,
                _ => {
                    reply(&bot, &msg, "❌ Usage: <code>premium on|off</code>").await?;
                    return Ok(());
                }
            };

            state.reactions.set_premium(premium)?;
            let max = state.reactions.max_reactions();
            reply(
                &bot,
                &msg,
                &format!(
                    "✅ Premium flag is {}. Up to {} reaction(s) per message now.",
                    if premium { "on" } else { "off" },
                    max
                ),
            )
            .await?;
        }

        "stats" => {
            reply(&bot, &msg, &render_stats(&state)).await?;
        }

        _ => {
            reply(&bot, &msg, help::reactions::TEXT).await?;
        }
    }

    Ok(())
}

fn render_targets(state: &AppState) -> String {
    let settings = state.reactions.settings();
    if settings.targets.is_empty() {
        return "No targets configured yet.".to_string();
    }

    let now = chrono::Utc::now().timestamp();
    let mut out = String::from("<b>Reaction targets:</b>\n\n");
    for (i, target) in settings.targets.iter().enumerate() {
        let last = if target.last_react_unix == 0 {
            "never".to_string()
        } else {
            format!(
                "{} ago",
                format_duration_full((now - target.last_react_unix).max(0) as u64)
            )
        };
        out.push_str(&format!(
            "<b>#{}</b>\n  User: <code>{}</code>\n  Chat: <code>{}</code>\n  Cooldown: {}\n  Last reaction: {}\n\n",
            i + 1,
            target.user_id,
            target.chat_id,
            format_duration_full(target.cooldown_secs as u64),
            last
        ));
    }
    out
}

fn render_stats(state: &AppState) -> String {
    let settings = state.reactions.settings();
    format!(
        "<b>Reaction stats</b>\n\n\
         State: {}\n\
         Premium: {}\n\
         Reactions: {} ({}/{})\n\
         Targets: <code>{}</code>\n\
         Total sent: <code>{}</code>",
        if settings.enabled { "✅ on" } else { "❌ off" },
        if settings.premium { "🌟 yes" } else { "no" },
        settings.emojis.join(" "),
        settings.emojis.len(),
        settings.max_reactions(),
        settings.targets.len(),
        settings.stats.total_reactions
    )
}
