//! Network module.
//!
//! Contains the Gateway (listener plus reactor loop) and the per-connection
//! reader and writer tasks.

mod connection;
mod gateway;

pub use connection::{CloseReason, ConnectionEvent};
pub use gateway::Gateway;
