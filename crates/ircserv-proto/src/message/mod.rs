//! Line splitting and outbound message types.
//!
//! Inbound lines are split into a borrowed [`RawLine`]; outbound traffic is
//! built as owned [`Message`] values whose `Display` impl produces the wire
//! form (without the line terminator, which the codec appends).

mod split;
mod types;

pub use self::split::{split_line, split_list, RawLine};
pub use self::types::{Message, Prefix, Verb};
