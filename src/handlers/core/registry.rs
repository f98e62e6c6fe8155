//! Command handler registry and dispatch.
//!
//! The `Registry` owns one handler per [`CommandKind`] and applies the
//! registration gates before any handler runs.

use std::collections::HashMap;

use ircserv_proto::{CommandKind, CommandParser, ParsedCommand};
use tracing::{Level, debug, span, warn};

use super::context::{Context, Handler, Outbox};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, KickHandler, NamesHandler, PartHandler, TopicHandler},
    connection::{
        CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
        close_session,
    },
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::ModeHandler,
    user_query::WhoisHandler,
};
use crate::state::{Matrix, Uid};

/// Reason recorded when a client sends QUIT without one.
const DEFAULT_QUIT_REASON: &str = "Client Quit";

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<CommandKind, Box<dyn Handler>>,
    parser: CommandParser,
}

impl Registry {
    /// Create a registry with every handler registered.
    ///
    /// `max_targets` bounds JOIN/PRIVMSG/NOTICE target lists.
    pub fn new(max_targets: usize) -> Self {
        let mut handlers: HashMap<CommandKind, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        handlers.insert(CommandKind::Pass, Box::new(PassHandler));
        handlers.insert(CommandKind::Nick, Box::new(NickHandler));
        handlers.insert(CommandKind::User, Box::new(UserHandler));
        handlers.insert(CommandKind::Cap, Box::new(CapHandler));
        handlers.insert(CommandKind::Ping, Box::new(PingHandler));
        handlers.insert(CommandKind::Pong, Box::new(PongHandler));
        handlers.insert(CommandKind::Quit, Box::new(QuitHandler));

        // Channel handlers
        handlers.insert(CommandKind::Join, Box::new(JoinHandler));
        handlers.insert(CommandKind::Part, Box::new(PartHandler));
        handlers.insert(CommandKind::Kick, Box::new(KickHandler));
        handlers.insert(CommandKind::Invite, Box::new(InviteHandler));
        handlers.insert(CommandKind::Topic, Box::new(TopicHandler));
        handlers.insert(CommandKind::Names, Box::new(NamesHandler));
        handlers.insert(CommandKind::Mode, Box::new(ModeHandler));

        // Messaging handlers
        handlers.insert(CommandKind::Privmsg, Box::new(PrivmsgHandler));
        handlers.insert(CommandKind::Notice, Box::new(NoticeHandler));

        // User query handlers
        handlers.insert(CommandKind::Whois, Box::new(WhoisHandler));

        Self {
            handlers,
            parser: CommandParser::new(max_targets),
        }
    }

    /// Parse, gate and run one received line, turning handler errors into
    /// replies.
    pub fn handle_line(&self, matrix: &mut Matrix, uid: Uid, line: &str, outbox: &mut Outbox) {
        let Some(cmd) = self.parser.parse(line) else {
            return;
        };

        let mut ctx = Context::new(uid, matrix, outbox);
        let Err(err) = self.dispatch(&mut ctx, &cmd) else {
            return;
        };

        match err {
            HandlerError::Quit(reason) => {
                let reason = reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_QUIT_REASON.to_string());
                close_session(ctx.matrix, uid, &reason, true, ctx.outbox);
            }
            HandlerError::Internal(ref detail) => {
                warn!(%uid, command = %cmd.verb(), error = %detail, "handler failed");
            }
            other => {
                debug!(
                    %uid,
                    command = %cmd.verb(),
                    error = other.error_code(),
                    "command rejected"
                );
                // NOTICE never draws an error reply, whichever gate refused it.
                if cmd.kind == CommandKind::Notice {
                    return;
                }
                let nick = ctx.nick();
                if let Some(reply) =
                    other.to_irc_reply(&ctx.matrix.server_info.name, &nick, cmd.verb())
                {
                    ctx.send_self(&reply);
                }
            }
        }
    }

    /// Gate and dispatch a parsed command.
    ///
    /// Gates run in order: unknown command, password, registration,
    /// structural validation. The first failing gate answers and the handler
    /// never runs.
    pub fn dispatch(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        if cmd.kind == CommandKind::Invalid {
            return Err(HandlerError::UnknownCommand(cmd.raw_verb.clone()));
        }

        let session = ctx.session()?;
        if !session.password_matches(&ctx.matrix.server_info.password)
            && !matches!(
                cmd.kind,
                CommandKind::Pass | CommandKind::Cap | CommandKind::Ping | CommandKind::Whois
            )
        {
            return Err(HandlerError::PasswordMismatch);
        }
        if !session.registered
            && !matches!(
                cmd.kind,
                CommandKind::Pass
                    | CommandKind::Nick
                    | CommandKind::User
                    | CommandKind::Cap
                    | CommandKind::Ping
                    | CommandKind::Whois
                    | CommandKind::Quit
            )
        {
            return Err(HandlerError::NotRegistered);
        }

        self.parser.validate(cmd)?;

        let handler = self
            .handlers
            .get(&cmd.kind)
            .ok_or_else(|| HandlerError::UnknownCommand(cmd.raw_verb.clone()))?;

        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %cmd.verb(),
            uid = %ctx.uid,
            nick = %ctx.nick(),
        );
        irc_span.in_scope(|| handler.handle(ctx, cmd))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ircserv_proto::DEFAULT_MAX_TARGETS)
    }
}
