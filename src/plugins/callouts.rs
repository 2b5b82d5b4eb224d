//! Callouts plugin admin commands.
//!
//! Same management surface as quips, over the callouts pool.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::{help, reply, responder};

/// Handle `/callouts <subcommand>`.
pub async fn callouts_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let args = args.trim();
    if args.is_empty() || args.eq_ignore_ascii_case("help") {
        reply(&bot, &msg, help::callouts::TEXT).await?;
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let sub = parts[0].to_lowercase();

    if !responder::handle_common(&bot, &msg, &state, &state.callouts, &sub, &parts[1..]).await? {
        reply(&bot, &msg, help::callouts::TEXT).await?;
    }

    Ok(())
}
