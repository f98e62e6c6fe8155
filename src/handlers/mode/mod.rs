//! MODE command handler.
//!
//! Handles both user modes and channel modes.
//!
//! - User modes: `MODE nick [+/-modes]`
//! - Channel modes: `MODE channel [+/-modes [args...]]`

mod channel;
mod user;

use ircserv_proto::ParsedCommand;
use tracing::{Level, span};

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // MODE <target> [modes [params]]
        let span = span!(Level::DEBUG, "mode", target = ?cmd.channels.first().or(cmd.users.first()));
        let _enter = span.enter();

        if let Some(channel) = cmd.channels.first() {
            channel::handle_channel_mode(ctx, channel, &cmd.parameters)
        } else if let Some(target) = cmd.users.first() {
            user::handle_user_mode(ctx, target, &cmd.parameters)
        } else {
            Err(HandlerError::NeedMoreParams)
        }
    }
}
