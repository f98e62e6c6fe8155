//! User mode handling.
//!
//! Handles MODE commands for users: `MODE <nick> [+/-modes]`.
//! Users can only query or change their own modes.

use ircserv_proto::{Message, ModeChange, Response, UserMode, render_changes};
use tracing::debug;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;

/// Handle user mode query/change.
pub fn handle_user_mode(ctx: &mut Context<'_>, target: &str, args: &[String]) -> HandlerResult {
    let nick = ctx.nick();

    // Can only query/change your own modes
    if target != nick {
        return match ctx.matrix.sessions.find_nick(target) {
            Some(_) => Err(HandlerError::UsersDontMatch),
            None => Err(HandlerError::NoSuchNick(target.to_string())),
        };
    }

    let Some(modes) = args.first() else {
        // Query: return current modes
        let mode_string = ctx.session()?.modes.as_mode_string();
        ctx.reply(Response::rpl_umodeis(&nick, &mode_string));
        return Ok(());
    };

    let changes = ModeChange::<UserMode>::parse_user(modes);
    let mut applied = Vec::new();
    let mut unknown = false;
    {
        let session = ctx.session_mut()?;
        for change in &changes {
            if matches!(change.mode, UserMode::Unknown(_)) {
                unknown = true;
            } else if session.modes.apply(change) {
                applied.push(change.clone());
            }
        }
    }

    if unknown {
        ctx.reply(Response::err_umodeunknownflag(&nick));
    }
    if !applied.is_empty() {
        let rendered = render_changes(&applied);
        let mode_msg = Message::command("MODE", vec![nick.clone()], rendered.first().cloned())
            .with_prefix(ctx.user_prefix()?);
        ctx.send_self(&mode_msg);
        debug!(uid = %ctx.uid, %nick, modes = ?rendered, "user modes changed");
    }
    Ok(())
}
