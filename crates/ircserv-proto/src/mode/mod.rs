//! Channel and user mode-string scanning.
//!
//! Mode strings such as `+kl-i` are scanned left to right; `+` and `-` switch
//! direction for the letters after them. Argument-taking letters draw from
//! the argument list in the order they appear in the string.

mod parse;
mod types;

pub use self::types::{render_changes, ChannelMode, ModeChange, ModeError, ModeType, UserMode};
