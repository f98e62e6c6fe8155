//! User query handlers.

mod whois;

pub use whois::WhoisHandler;
