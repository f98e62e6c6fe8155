//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! parsed commands to the appropriate handlers.
//!
//! Handlers are plain synchronous functions over the [`Matrix`](crate::state::Matrix):
//! the reactor owns all state, so there is nothing to await and nothing to
//! lock. Everything a handler wants sent is queued in the context's
//! [`Outbox`].

mod channel;
mod connection;
mod core;
mod messaging;
mod mode;
mod user_query;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::core::{Context, Handler, Outbox, Registry};
pub use connection::close_session;
