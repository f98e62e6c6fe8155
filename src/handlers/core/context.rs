//! Command handler context and core types.
//!
//! Handlers run synchronously on the reactor task. They read and mutate the
//! [`Matrix`] directly and queue outbound lines in an [`Outbox`]; the reactor
//! flushes the outbox to connection writers once the handler returns.

use std::sync::Arc;

use ircserv_proto::{Message, ParsedCommand, Prefix};
use tracing::debug;

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::state::{Matrix, Session, Uid};

/// A command handler.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult;
}

/// Outbound lines and disconnects produced while handling one line.
///
/// Lines are serialized once and shared between recipients.
#[derive(Debug, Default)]
pub struct Outbox {
    /// `(recipient, line)` in send order, without terminator.
    pub messages: Vec<(Uid, Arc<str>)>,
    /// Sessions whose connection must be closed after their lines are sent.
    pub disconnects: Vec<Uid>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, to: Uid, msg: &Message) {
        self.messages.push((to, Arc::from(msg.to_string())));
    }

    /// Queue `msg` for every recipient, serializing it once.
    pub fn push_all(&mut self, to: impl IntoIterator<Item = Uid>, msg: &Message) {
        let line: Arc<str> = Arc::from(msg.to_string());
        self.messages
            .extend(to.into_iter().map(|uid| (uid, Arc::clone(&line))));
    }

    pub fn disconnect(&mut self, uid: Uid) {
        if !self.disconnects.contains(&uid) {
            self.disconnects.push(uid);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.disconnects.is_empty()
    }

    /// Lines queued for `uid`, in order.
    pub fn lines_for(&self, uid: Uid) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(move |(to, _)| *to == uid)
            .map(|(_, line)| &**line)
    }
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The invoking session.
    pub uid: Uid,
    /// Server state.
    pub matrix: &'a mut Matrix,
    /// Where replies and broadcasts go.
    pub outbox: &'a mut Outbox,
}

impl<'a> Context<'a> {
    pub fn new(uid: Uid, matrix: &'a mut Matrix, outbox: &'a mut Outbox) -> Self {
        Self {
            uid,
            matrix,
            outbox,
        }
    }

    /// The invoking session.
    pub fn session(&self) -> Result<&Session, HandlerError> {
        self.matrix
            .sessions
            .get(self.uid)
            .ok_or_else(|| HandlerError::Internal(format!("no session for {}", self.uid)))
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, HandlerError> {
        let uid = self.uid;
        self.matrix
            .sessions
            .get_mut(uid)
            .ok_or_else(|| HandlerError::Internal(format!("no session for {uid}")))
    }

    /// Reply target for numerics: the nickname, or `*` before one is set.
    pub fn nick(&self) -> String {
        self.matrix.sessions.nick_of(self.uid).to_string()
    }

    pub fn server_prefix(&self) -> Prefix {
        Prefix::ServerName(self.matrix.server_info.name.clone())
    }

    /// The invoker as a message source, `nick!user@host`.
    pub fn user_prefix(&self) -> Result<Prefix, HandlerError> {
        Ok(self.session()?.prefix())
    }

    /// Send a numeric (or any unprefixed message) to the invoker with the
    /// server prefix attached.
    pub fn reply(&mut self, msg: Message) {
        let msg = msg.with_prefix(self.server_prefix());
        self.outbox.push(self.uid, &msg);
    }

    /// Answer a failure on one channel target. The handler moves on to the
    /// next target.
    pub fn refuse(&mut self, channel: &str, err: ChannelError) {
        debug!(uid = %self.uid, %channel, error = err.error_code(), "channel request refused");
        let reply = err.to_reply(&self.nick(), channel);
        self.reply(reply);
    }

    /// Send an already-prefixed message to the invoker.
    pub fn send_self(&mut self, msg: &Message) {
        self.outbox.push(self.uid, msg);
    }

    pub fn send_to(&mut self, to: Uid, msg: &Message) {
        self.outbox.push(to, msg);
    }

    /// Send `msg` to every member of `channel`, optionally skipping one.
    pub fn broadcast(&mut self, channel: &str, msg: &Message, except: Option<Uid>) {
        let Some(chan) = self.matrix.channels.get(channel) else {
            return;
        };
        let members: Vec<Uid> = chan.members().filter(|m| Some(*m) != except).collect();
        self.outbox.push_all(members, msg);
    }
}
