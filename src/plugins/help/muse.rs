pub const TEXT: &str = "\
<b>📖 Muse</b>\n\
Replies to <code>/keyword</code> with a freshly generated vignette from an \
OpenAI-compatible endpoint, posted as a reply to the target user's latest message.\n\n\
<b>Commands:</b>\n\
<code>/muse on</code> / <code>/muse off</code> - global switch\n\
<code>/muse toggle &lt;keyword&gt; on|off</code> - per-keyword switch\n\
<code>/muse api &lt;url&gt; &lt;key&gt; [model]</code> - set the endpoint\n\
<code>/muse model &lt;name&gt;</code> - switch the model\n\
<code>/muse test</code> - verify the endpoint with a single- and a two-name pass\n\
<code>/muse set &lt;keyword&gt; &lt;user_id&gt; &lt;chat_id&gt; [secs]</code> - add or update a keyword\n\
<code>/muse delete &lt;keyword&gt;</code> - remove a keyword\n\
<code>/muse list</code> - show all keywords\n\
<code>/muse owner &lt;user_id&gt;</code> - set the plugin owner\n\
<code>/muse anchor set &lt;keyword&gt; [message_id]</code> - pin the reply target (or reply to a message)\n\
<code>/muse anchor clear &lt;keyword&gt;</code> - unpin it\n\
<code>/muse status</code> - current state, endpoint included\n\n\
<b>Endpoint example:</b>\n\
<code>/muse api http://example.com:8317 sk-xxxx glm-4.6</code>\n\n\
<b>Triggering:</b> <code>/keyword</code> for one name, <code>/keyword name</code> \
or a reply for two. A failed generation is retried once, then dropped silently.";
