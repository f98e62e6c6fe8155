//! Outbound message representation and serialization.

use std::fmt;

use crate::response::Response;

/// Message source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// A server name, e.g. `irc.example.com`.
    ServerName(String),
    /// A user mask, `nick!user@host`.
    Nickname(String, String, String),
}

impl Prefix {
    /// Create a user prefix from its three components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => write!(f, "{nick}!{user}@{host}"),
        }
    }
}

/// The verb slot of an outbound line: a numeric or a command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Three-digit numeric reply.
    Numeric(Response),
    /// Command word such as `JOIN` or `PRIVMSG`.
    Command(&'static str),
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Numeric(resp) => write!(f, "{:03}", resp.code()),
            Verb::Command(cmd) => f.write_str(cmd),
        }
    }
}

/// An outbound protocol line.
///
/// Serializes as `[:<prefix> ]<verb>[ <param>...][ :<trailing>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Optional source prefix.
    pub prefix: Option<Prefix>,
    /// Numeric or command word.
    pub verb: Verb,
    /// Middle parameters; none may contain spaces or start with `:`.
    pub params: Vec<String>,
    /// Final free-text field, always written with a leading `:`.
    pub trailing: Option<String>,
}

impl Message {
    /// Create a message with a command verb and no prefix.
    pub fn command(verb: &'static str, params: Vec<String>, trailing: Option<String>) -> Self {
        Self {
            prefix: None,
            verb: Verb::Command(verb),
            params,
            trailing,
        }
    }

    /// Create a numeric reply with no prefix.
    pub fn numeric(response: Response, params: Vec<String>, trailing: Option<String>) -> Self {
        Self {
            prefix: None,
            verb: Verb::Numeric(response),
            params,
            trailing,
        }
    }

    /// Replace the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// The numeric carried by this message, if any.
    pub fn response(&self) -> Option<Response> {
        match self.verb {
            Verb::Numeric(resp) => Some(resp),
            Verb::Command(_) => None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        write!(f, "{}", self.verb)?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        if let Some(trailing) = &self.trailing {
            write!(f, " :{trailing}")?;
        }
        Ok(())
    }
}
