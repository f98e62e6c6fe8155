//! Handler infrastructure: context, outbox and the command registry.

mod context;
mod registry;

pub use context::{Context, Handler, Outbox};
pub use registry::Registry;
