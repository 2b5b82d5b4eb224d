//! Reply anchor tracker.
//!
//! The Bot API cannot read chat history, so the bot remembers the latest
//! message id of every configured target user as it arrives. A fired
//! keyword then replies to that remembered message.

use teloxide::prelude::*;
use tracing::debug;

use crate::bot::dispatcher::AppState;

/// Record the message as a reply anchor for any rule watching its sender.
pub fn track_anchors(msg: &Message, state: &AppState) -> anyhow::Result<()> {
    // Anchors only make sense in group chats.
    if msg.chat.id.0 >= 0 {
        return Ok(());
    }
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    for plugin in state.responders() {
        if let Some(keyword) =
            plugin
                .store
                .record_anchor(user.id.0, msg.chat.id.0, msg.id.0)?
        {
            debug!(
                "Updated {} anchor for '{}' to message {}",
                plugin.label(),
                keyword,
                msg.id.0
            );
        }
    }

    Ok(())
}
