//! Event handler system.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Calling the handler from `unified_message_handler()`

pub mod anchors;
pub mod reactions;
pub mod triggers;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Build the message event handler.
///
/// Runs all sub-handlers for each message. Each handler runs independently -
/// one handler's error doesn't stop the others. Which chats matter is
/// decided per handler by the configured targets, not here.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::endpoint(unified_message_handler)
}

/// Unified message handler that runs all sub-handlers.
async fn unified_message_handler(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    // Anchors first, so a target's own message can seed the reply target
    // before any keyword fires.
    if let Err(e) = anchors::track_anchors(&msg, &state) {
        error!("Anchor tracker error: {}", e);
    }

    if let Err(e) = reactions::check_reactions(&bot, &msg, &state).await {
        error!("Reaction handler error: {}", e);
    }

    if let Err(e) = triggers::check_triggers(&bot, &msg, &state).await {
        error!("Trigger handler error: {}", e);
    }

    Ok(())
}
