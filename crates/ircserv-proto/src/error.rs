//! Error types for the protocol crate.
//!
//! [`ProtocolError`] covers transport-level framing faults; [`ParseError`]
//! covers structurally invalid commands, which the server answers with a
//! reply and then keeps serving the connection.

use thiserror::Error;

use crate::message::Message;
use crate::response::Response;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Framing and transport errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered without a terminator.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

/// Structural command failures detected before any handler runs.
///
/// Each variant carries the command keyword as the client sent it so the reply
/// can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Wrong arity or a missing required field.
    #[error("{command}: not enough parameters")]
    NeedMoreParams {
        /// Command keyword.
        command: String,
    },

    /// NICK without a nickname.
    #[error("no nickname given")]
    NoNicknameGiven,

    /// PING without a token.
    #[error("no origin specified")]
    NoOrigin,

    /// More targets than a single command may address.
    #[error("{command}: too many targets ({count})")]
    TooManyTargets {
        /// Command keyword.
        command: String,
        /// Number of targets supplied.
        count: usize,
    },

    /// Channel/user counts match no supported pairing.
    #[error("{command}: unsupported target shape")]
    Syntax {
        /// Command keyword.
        command: String,
    },
}

impl ParseError {
    /// Static error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams { .. } => "need_more_params",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::NoOrigin => "no_origin",
            Self::TooManyTargets { .. } => "too_many_targets",
            Self::Syntax { .. } => "syntax",
        }
    }

    /// The reply sent to the offending client.
    pub fn to_reply(&self, client: &str) -> Message {
        match self {
            Self::NeedMoreParams { command } => Response::err_needmoreparams(client, command),
            Self::NoNicknameGiven => Response::err_nonicknamegiven(client),
            Self::NoOrigin => Response::err_noorigin(client),
            Self::TooManyTargets { command, .. } => Response::err_toomanytargets(client, command),
            Self::Syntax { command } => Response::err_syntax(client, command),
        }
    }
}
