//! Help texts, one module per plugin.

pub mod callouts;
pub mod muse;
pub mod quips;
pub mod reactions;

/// Overview shown by /help.
pub const OVERVIEW: &str = "\
<b>Vesper</b> - config-driven auto-responder.\n\n\
<b>Plugins:</b>\n\
• <code>/reactions</code> - auto-react to configured users\n\
• <code>/quips</code> - template vignettes on <code>/keyword</code>\n\
• <code>/muse</code> - generated vignettes on <code>/keyword</code>\n\
• <code>/callouts</code> - one-line pages on <code>/keyword</code>\n\n\
Send any of those with <code>help</code> (e.g. <code>/quips help</code>) for the full reference.";
