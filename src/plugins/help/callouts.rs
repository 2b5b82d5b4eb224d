pub const TEXT: &str = "\
<b>📖 Callouts</b>\n\
Replies to <code>/keyword</code> with a one-line page, posted as a reply to \
the target user's latest message.\n\n\
<b>Commands:</b>\n\
<code>/callouts on</code> / <code>/callouts off</code> - global switch\n\
<code>/callouts set &lt;keyword&gt; &lt;user_id&gt; &lt;chat_id&gt; [secs]</code> - add or update a keyword\n\
<code>/callouts delete &lt;keyword&gt;</code> - remove a keyword\n\
<code>/callouts list</code> - show all keywords\n\
<code>/callouts owner &lt;user_id&gt;</code> - set the plugin owner\n\
<code>/callouts status</code> - current state\n\n\
<b>Triggering:</b>\n\
• <code>/keyword</code> - \"keyword has received a mysterious message\"\n\
• <code>/keyword name</code> or a reply - \"you paged keyword\"\n\n\
<b>Cooldown:</b> the owner is exempt; everyone else is limited per keyword.";
