pub const TEXT: &str = "\
<b>📖 Auto-reactions</b>\n\
Automatically reacts to messages from configured target users.\n\n\
<b>Commands:</b>\n\
<code>/reactions on</code> - start watching targets\n\
<code>/reactions off</code> - stop\n\
<code>/reactions set &lt;user_id&gt; &lt;chat_id&gt; &lt;secs&gt;</code> - add a target (3600 = 1h; minimum 60)\n\
<code>/reactions remove &lt;index&gt;</code> - remove a target (see <code>list</code> for indexes)\n\
<code>/reactions list</code> - show all targets\n\
<code>/reactions emoji &lt;emoji…&gt;</code> - set the reaction(s); custom-emoji ids are digits\n\
<code>/reactions premium on|off</code> - raise the cap to 3 reactions on a premium account\n\
<code>/reactions stats</code> - counters\n\n\
💡 A target gets at most one reaction per cooldown window.";
