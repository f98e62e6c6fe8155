//! Unified error handling for ircserv.
//!
//! Protocol-level failures are values: handlers return them and the
//! dispatcher turns them into numeric replies. Transport faults never reach
//! this module; the network layer logs them and drops the connection.

use ircserv_proto::{Message, ParseError, Prefix, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("not registered")]
    NotRegistered,

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The client asked to leave; the dispatcher tears the session down.
    #[error("client quit: {0:?}")]
    Quit(Option<String>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NotRegistered => "not_registered",
            Self::PasswordMismatch => "password_mismatch",
            Self::AlreadyRegistered => "already_registered",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::UnknownCommand(_) => "unknown_command",
            Self::UsersDontMatch => "users_dont_match",
            Self::Parse(e) => e.error_code(),
            Self::Quit(_) => "quit",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (quit, internal errors).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NicknameInUse(bad_nick) => Response::err_nicknameinuse(nick, bad_nick),
            Self::ErroneousNickname(bad_nick) => Response::err_erroneusnickname(nick, bad_nick),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::PasswordMismatch => Response::err_passwdmismatch(nick),
            Self::AlreadyRegistered => Response::err_alreadyregistred(nick),
            Self::NoSuchNick(bad_nick) => Response::err_nosuchnick(nick, bad_nick),
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),
            Self::UsersDontMatch => Response::err_usersdontmatch(nick),
            Self::Parse(e) => e.to_reply(nick),

            // These errors don't get client-visible replies
            Self::Quit(_) => return None,
            Self::Internal(_) => return None,
        };

        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (per-channel checks)
// ============================================================================

/// Channel operation errors.
///
/// These are per-target failures: a handler working through several
/// channels replies with one of these and carries on with the next target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("no such channel")]
    NoSuchChannel,

    #[error("cannot send to channel")]
    CannotSendToChan,

    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("channel key already set")]
    KeySet,

    #[error("too many channels")]
    TooManyChannels,

    #[error("illegal channel name")]
    BadChannelName,
}

impl ChannelError {
    /// Static error code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchChannel => "no_such_channel",
            Self::CannotSendToChan => "cannot_send_to_chan",
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::UserOnChannel(_) => "user_on_channel",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
            Self::KeySet => "key_set",
            Self::TooManyChannels => "too_many_channels",
            Self::BadChannelName => "bad_channel_name",
        }
    }

    /// Convert to an IRC error reply, without a prefix.
    pub fn to_reply(&self, nick: &str, channel: &str) -> Message {
        match self {
            Self::NoSuchChannel => Response::err_nosuchchannel(nick, channel),
            Self::CannotSendToChan => Response::err_cannotsendtochan(nick, channel),
            Self::NotOnChannel => Response::err_notonchannel(nick, channel),
            Self::ChanOpPrivsNeeded => Response::err_chanoprivsneeded(nick, channel),
            Self::UserNotInChannel(target) => Response::err_usernotinchannel(nick, target, channel),
            Self::UserOnChannel(target) => Response::err_useronchannel(nick, target, channel),
            Self::InviteOnlyChan => Response::err_inviteonlychan(nick, channel),
            Self::ChannelIsFull => Response::err_channelisfull(nick, channel),
            Self::BadChannelKey => Response::err_badchannelkey(nick, channel),
            Self::KeySet => Response::err_keyset(nick, channel),
            Self::TooManyChannels => Response::err_toomanychannels(nick, channel),
            Self::BadChannelName => Response::err_badchanname(nick, channel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_replies_carry_server_prefix() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("irc.test", "alice", "JOIN")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":irc.test 461 alice JOIN :Not enough parameters"
        );
    }

    #[test]
    fn quit_has_no_reply() {
        assert!(
            HandlerError::Quit(Some("bye".into()))
                .to_irc_reply("irc.test", "alice", "QUIT")
                .is_none()
        );
    }

    #[test]
    fn parse_errors_map_to_their_numerics() {
        let err = HandlerError::from(ParseError::Syntax {
            command: "KICK".into(),
        });
        let reply = err.to_irc_reply("irc.test", "alice", "KICK").unwrap();
        assert_eq!(reply.to_string(), ":irc.test 478 alice KICK :Invalid KICK command");
        assert_eq!(err.error_code(), "syntax");
    }

    #[test]
    fn channel_error_replies() {
        let reply = ChannelError::BadChannelKey.to_reply("bob", "#test");
        assert_eq!(reply.to_string(), "475 bob #test :Cannot join channel (+k)");

        let reply = ChannelError::UserNotInChannel("carol".into()).to_reply("bob", "#test");
        assert_eq!(
            reply.to_string(),
            "441 bob carol #test :They aren't on that channel"
        );
        assert_eq!(ChannelError::KeySet.error_code(), "key_set");
    }
}
