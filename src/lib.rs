//! ircserv - a single-reactor IRC chat relay.
//!
//! One task owns every session and channel and processes client lines one at
//! a time; per-connection tasks only move bytes. See [`network::Gateway`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

pub use config::Config;
pub use network::Gateway;
