//! Vesper - Config-driven Telegram auto-responder.
//!
//! Reacts to or auto-replies to configured target users in configured
//! chats, with a per-key cooldown on every trigger.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `store` - JSON-file-backed settings stores
//! - `respond` - Response selection (template pools, generation endpoint)
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Command handlers (extensible)
//! - `events` - Event handlers (extensible)
//! - `utils` - Utility functions

mod bot;
mod config;
mod events;
mod plugins;
mod respond;
mod store;
mod utils;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::dispatcher::AppState;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vesper=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Vesper bot...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);
    info!("Data directory: {}", config.data_dir.display());

    // Initialize bot with Throttle for automatic rate limiting
    // This respects Telegram's rate limits:
    // - 30 messages per second globally
    // - 1 message per second to the same chat
    // - 20 messages per minute to the same group
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    // Get bot username from config or fallback to get_me()
    let bot_username = config.bot_username.clone()
        .unwrap_or_else(|| me.username().to_string());
    info!("Using bot username: @{}", bot_username);

    // Log owner info
    if config.owner_ids.is_empty() {
        info!("No owner IDs configured (OWNER_IDS is empty)");
    } else {
        info!("Bot owners: {:?}", config.owner_ids);
    }

    // Open the settings stores
    let state = AppState::new(&config.data_dir, config.owner_ids.clone(), bot_username);
    info!("Settings stores opened");

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    // Run the bot
    bot::run(&config, dispatcher, bot).await;

    Ok(())
}
