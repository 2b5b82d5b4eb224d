//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod callouts;
pub mod help;
pub mod muse;
pub mod quips;
pub mod reactions;
pub mod responder;
pub mod start;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::ThrottledBot;

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show help")]
    Help,

    #[command(description = "Manage auto-reactions")]
    Reactions(String),

    #[command(description = "Manage template replies")]
    Quips(String),

    #[command(description = "Manage generated replies")]
    Muse(String),

    #[command(description = "Manage callouts")]
    Callouts(String),
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::start_command))
        .branch(case![Command::Help].endpoint(start::help_command))
        .branch(case![Command::Reactions(args)].endpoint(reactions::reactions_command))
        .branch(case![Command::Quips(args)].endpoint(quips::quips_command))
        .branch(case![Command::Muse(args)].endpoint(muse::muse_command))
        .branch(case![Command::Callouts(args)].endpoint(callouts::callouts_command))
}

/// Reply to a command message with HTML formatting.
pub(crate) async fn reply(bot: &ThrottledBot, msg: &Message, text: &str) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
