//! Command classification, target splitting and structural validation.

mod kind;
mod parse;
mod parsed;

pub use self::kind::CommandKind;
pub use self::parse::{CommandParser, DEFAULT_MAX_TARGETS};
pub use self::parsed::{pair_targets, ParsedCommand};
