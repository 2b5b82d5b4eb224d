//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command handlers and event handlers.

use std::path::Path;
use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::events;
use crate::plugins;
use crate::respond::{templates, AiClient, DualNaming, ResponderPlugin, ResponseSource};
use crate::store::{CooldownRepo, ReactionRepo, TriggerRepo};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Reaction plugin settings.
    pub reactions: Arc<ReactionRepo>,

    /// Template-backed responder.
    pub quips: Arc<ResponderPlugin>,

    /// Generation-backed responder.
    pub muse: Arc<ResponderPlugin>,

    /// Template-backed responder with trigger/target naming.
    pub callouts: Arc<ResponderPlugin>,

    /// Owner user IDs (bypass all restrictions).
    pub owner_ids: Vec<u64>,

    /// Bot username (without @).
    pub bot_username: String,
}

impl AppState {
    /// Create the application state, opening all stores under `data_dir`.
    pub fn new(data_dir: &Path, owner_ids: Vec<u64>, bot_username: String) -> Self {
        let reactions = Arc::new(ReactionRepo::open(data_dir.join("reactions.json")));

        let quips = Arc::new(ResponderPlugin {
            store: TriggerRepo::open("quips", data_dir.join("quips.json")),
            cooldowns: CooldownRepo::open(data_dir.join("quips_log.json")),
            source: ResponseSource::Templates(&*templates::QUIPS),
            naming: DualNaming::KeywordThenSecond,
        });

        let muse = Arc::new(ResponderPlugin {
            store: TriggerRepo::open("muse", data_dir.join("muse.json")),
            cooldowns: CooldownRepo::open(data_dir.join("muse_log.json")),
            source: ResponseSource::Remote(AiClient::new()),
            naming: DualNaming::KeywordThenSecond,
        });

        let callouts = Arc::new(ResponderPlugin {
            store: TriggerRepo::open("callouts", data_dir.join("callouts.json")),
            cooldowns: CooldownRepo::open(data_dir.join("callouts_log.json")),
            source: ResponseSource::Templates(&*templates::CALLOUTS),
            naming: DualNaming::TriggerThenKeyword,
        });

        Self {
            reactions,
            quips,
            muse,
            callouts,
            owner_ids,
            bot_username,
        }
    }

    /// Check if a user is a bot owner.
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }

    /// The responder plugins, in match order for keyword lookup.
    pub fn responders(&self) -> [&ResponderPlugin; 3] {
        [
            self.quips.as_ref(),
            self.muse.as_ref(),
            self.callouts.as_ref(),
        ]
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    // Known commands first; unmatched messages (configured /keyword
    // triggers included) fall through to the event handlers.
    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_event_handler());

    dptree::entry().branch(message_handler)
}
