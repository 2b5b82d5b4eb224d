//! /start and /help command handlers.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::plugins::help;

/// Handle the /start command.
pub async fn start_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    let text = "\
<b>Hello!</b> 👋\n\n\
I am <b>Vesper</b>, a config-driven auto-responder.\n\n\
<b>Plugins:</b>\n\
• Auto-reactions\n\
• Quips (template replies)\n\
• Muse (generated replies)\n\
• Callouts\n\n\
Use /help to see the commands.";

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

/// Handle the /help command.
pub async fn help_command(
    bot: ThrottledBot,
    msg: Message,
    _state: AppState,
) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, help::OVERVIEW)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
