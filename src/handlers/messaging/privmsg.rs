//! PRIVMSG command handler.
//!
//! # RFC 2812 §3.3.1 - Private messages
//!
//! ## Syntax
//! ```text
//! PRIVMSG <target>{,<target>} :<text>
//! ```

use ircserv_proto::ParsedCommand;

use super::delivery::route_message;
use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        route_message(ctx, cmd, "PRIVMSG", true)
    }
}
