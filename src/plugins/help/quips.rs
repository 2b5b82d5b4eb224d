pub const TEXT: &str = "\
<b>📖 Quips</b>\n\
Replies to <code>/keyword</code> with a vignette from the built-in pool, \
posted as a reply to the target user's latest message.\n\n\
<b>Commands:</b>\n\
<code>/quips on</code> / <code>/quips off</code> - global switch\n\
<code>/quips set &lt;keyword&gt; &lt;user_id&gt; &lt;chat_id&gt; [secs]</code> - add or update a keyword\n\
<code>/quips delete &lt;keyword&gt;</code> - remove a keyword\n\
<code>/quips list</code> - show all keywords\n\
<code>/quips owner &lt;user_id&gt;</code> - set the plugin owner\n\
<code>/quips status</code> - current state\n\n\
<b>Triggering:</b>\n\
• <code>/keyword</code> - single-name vignette\n\
• <code>/keyword name</code> or reply to someone - two-name vignette\n\n\
<b>Cooldown:</b> the owner is exempt; everyone else is limited per keyword.";
