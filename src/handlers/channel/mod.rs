//! Channel handlers: JOIN, PART, KICK, INVITE, TOPIC and NAMES.
//!
//! Multi-target commands work through their targets in order. A failure on
//! one target is answered with its numeric and the rest still run.

mod invite;
mod join;
mod kick;
mod names;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use names::NamesHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;
