//! # ircserv-proto
//!
//! Wire protocol for the ircserv chat relay: line framing, command parsing,
//! mode-string scanning and reply formatting.
//!
//! ## Layers
//!
//! - [`line`]: a `tokio-util` codec that frames a byte stream into lines
//!   terminated by `\r\n` (bare `\n` is tolerated).
//! - [`message`]: splits one line into command, parameters and trailing field,
//!   and serializes outbound [`Message`]s.
//! - [`command`]: classifies the command keyword into a [`CommandKind`] and
//!   applies per-command structural validation.
//! - [`response`]: the numeric reply catalog with constructors for every reply
//!   the server emits.
//!
//! ## Quick Start
//!
//! ```rust
//! use ircserv_proto::{CommandKind, CommandParser};
//!
//! let parser = CommandParser::default();
//! let cmd = parser.parse("KICK #a,#b bob :flooding").expect("non-empty line");
//! assert_eq!(cmd.kind, CommandKind::Kick);
//! assert_eq!(cmd.channels, vec!["a", "b"]);
//! assert_eq!(cmd.users, vec!["bob"]);
//! assert_eq!(cmd.trailing.as_deref(), Some("flooding"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod mode;
pub mod nick;
pub mod response;

pub use self::chan::{ChannelExt, DEFAULT_CHANNEL_MAX_LEN, DEFAULT_KEY_MAX_LEN};
pub use self::command::{pair_targets, CommandKind, CommandParser, ParsedCommand, DEFAULT_MAX_TARGETS};
pub use self::error::{ParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::message::{split_line, split_list, Message, Prefix, RawLine, Verb};
pub use self::mode::{render_changes, ChannelMode, ModeChange, ModeError, ModeType, UserMode};
pub use self::nick::{is_valid_nick, DEFAULT_NICK_MAX_LEN};
pub use self::response::Response;
