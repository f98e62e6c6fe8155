//! PASS command handler.

use ircserv_proto::ParsedCommand;
use tracing::debug;

use super::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // PASS <password>
        let password = cmd.param_or_trailing().unwrap_or_default().to_string();
        let secret = ctx.matrix.server_info.password.clone();

        let session = ctx.session_mut()?;
        if session.registered {
            return Err(HandlerError::AlreadyRegistered);
        }
        session.password = Some(password);

        if !session.password_matches(&secret) {
            debug!(uid = %ctx.uid, "wrong connection password");
            return Err(HandlerError::PasswordMismatch);
        }

        try_register(ctx)
    }
}
