//! QUIT handling and session teardown.
//!
//! The same teardown runs when a client sends QUIT and when its connection
//! drops; only the reason differs.

use ircserv_proto::{Message, ParsedCommand};
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, Outbox};
use crate::state::{Matrix, Uid};

/// Handler for QUIT command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, _ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // QUIT [:<reason>]
        let reason = cmd.trailing.clone().or_else(|| cmd.param(0).map(str::to_string));

        // The dispatcher tears the session down.
        Err(HandlerError::Quit(reason))
    }
}

/// Remove a session from every channel and from the registry.
///
/// Peers that shared a channel get one QUIT line each. With `farewell` the
/// quitting client gets a closing `ERROR` line before its connection is
/// marked for closing.
pub fn close_session(matrix: &mut Matrix, uid: Uid, reason: &str, farewell: bool, outbox: &mut Outbox) {
    let Some((session, peers)) = matrix.detach(uid) else {
        return;
    };

    let quit = Message::command("QUIT", vec![], Some(reason.to_string())).with_prefix(session.prefix());
    outbox.push_all(peers, &quit);

    if farewell {
        let error = Message::command(
            "ERROR",
            vec![],
            Some(format!("Closing Link: {} ({reason})", session.host)),
        );
        outbox.push(uid, &error);
    }
    outbox.disconnect(uid);

    info!(
        %uid,
        nick = %session.nick_or_star(),
        addr = %session.addr,
        %reason,
        "client disconnected"
    );
}
