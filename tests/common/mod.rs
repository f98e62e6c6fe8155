//! Integration test common infrastructure.
//!
//! Provides an in-process server bound to an ephemeral port and a raw-line
//! client for asserting on reply flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::{PASSWORD, TestServer};
