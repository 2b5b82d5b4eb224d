//! Quips plugin admin commands.
//!
//! Replies come from the embedded template pool; everything else is the
//! shared responder surface.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::{help, reply, responder};

/// Handle `/quips <subcommand>`.
pub async fn quips_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let args = args.trim();
    if args.is_empty() || args.eq_ignore_ascii_case("help") {
        reply(&bot, &msg, help::quips::TEXT).await?;
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let sub = parts[0].to_lowercase();

    if !responder::handle_common(&bot, &msg, &state, &state.quips, &sub, &parts[1..]).await? {
        reply(&bot, &msg, help::quips::TEXT).await?;
    }

    Ok(())
}
