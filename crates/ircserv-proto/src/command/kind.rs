//! The closed set of commands the server understands.

use std::fmt;

/// Command keyword, classified case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `PASS <password>`
    Pass,
    /// `NICK <nickname>`
    Nick,
    /// `USER <user> <mode> <unused> :<realname>`
    User,
    /// `JOIN <#chan>{,<#chan>} [<key>{,<key>}]`
    Join,
    /// `PART <#chan>{,<#chan>} [:<reason>]`
    Part,
    /// `PRIVMSG <target>{,<target>} :<text>`
    Privmsg,
    /// `NOTICE <target>{,<target>} :<text>`
    Notice,
    /// `KICK <#chan>{,<#chan>} <nick>{,<nick>} [:<reason>]`
    Kick,
    /// `INVITE <nick> <#chan>`
    Invite,
    /// `TOPIC <#chan> [:<topic>]`
    Topic,
    /// `MODE <target> [<modes> [<args>...]]`
    Mode,
    /// `NAMES [<#chan>{,<#chan>}]`
    Names,
    /// `QUIT [:<reason>]`
    Quit,
    /// `CAP <subcommand> [...]`
    Cap,
    /// `PING <token>`
    Ping,
    /// `PONG <token>`
    Pong,
    /// `WHOIS <nick>`
    Whois,
    /// Anything else.
    Invalid,
}

impl CommandKind {
    /// Classify a keyword. Unknown keywords map to [`CommandKind::Invalid`].
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "PASS" => Self::Pass,
            "NICK" => Self::Nick,
            "USER" => Self::User,
            "JOIN" => Self::Join,
            "PART" => Self::Part,
            "PRIVMSG" => Self::Privmsg,
            "NOTICE" => Self::Notice,
            "KICK" => Self::Kick,
            "INVITE" => Self::Invite,
            "TOPIC" => Self::Topic,
            "MODE" => Self::Mode,
            "NAMES" => Self::Names,
            "QUIT" => Self::Quit,
            "CAP" => Self::Cap,
            "PING" => Self::Ping,
            "PONG" => Self::Pong,
            "WHOIS" => Self::Whois,
            _ => Self::Invalid,
        }
    }

    /// Canonical upper-case keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Nick => "NICK",
            Self::User => "USER",
            Self::Join => "JOIN",
            Self::Part => "PART",
            Self::Privmsg => "PRIVMSG",
            Self::Notice => "NOTICE",
            Self::Kick => "KICK",
            Self::Invite => "INVITE",
            Self::Topic => "TOPIC",
            Self::Mode => "MODE",
            Self::Names => "NAMES",
            Self::Quit => "QUIT",
            Self::Cap => "CAP",
            Self::Ping => "PING",
            Self::Pong => "PONG",
            Self::Whois => "WHOIS",
            Self::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
