//! Registration completion and the welcome burst.

use ircserv_proto::Response;
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;

/// Complete registration if PASS, NICK and USER are all in place.
///
/// The password and nickname are checked again here: either may have been
/// accepted earlier and gone stale since (another session registering the
/// same nickname in between, or a later wrong PASS).
pub(crate) fn try_register(ctx: &mut Context<'_>) -> HandlerResult {
    let session = ctx.session()?;
    if !session.ready_to_register() {
        return Ok(());
    }
    if !session.password_matches(&ctx.matrix.server_info.password) {
        return Err(HandlerError::PasswordMismatch);
    }
    let nick = session.nick.clone().unwrap_or_default();
    if ctx
        .matrix
        .sessions
        .find_nick(&nick)
        .is_some_and(|owner| owner != ctx.uid)
    {
        return Err(HandlerError::NicknameInUse(nick));
    }

    let session = ctx.session_mut()?;
    session.registered = true;
    let mask = session.mask();
    let addr = session.addr;

    info!(uid = %ctx.uid, %nick, %addr, "client registered");
    send_welcome_burst(ctx, &nick, &mask);
    Ok(())
}

/// RPL_WELCOME through RPL_MYINFO.
fn send_welcome_burst(ctx: &mut Context<'_>, nick: &str, mask: &str) {
    let info = &ctx.matrix.server_info;
    let created = info.created.format("%a %b %d %Y at %H:%M:%S UTC").to_string();
    let burst = [
        Response::rpl_welcome(nick, mask),
        Response::rpl_yourhost(nick, &info.name, &info.version),
        Response::rpl_created(nick, &created),
        Response::rpl_myinfo(nick, &info.name, &info.version),
    ];
    for msg in burst {
        ctx.reply(msg);
    }
}
