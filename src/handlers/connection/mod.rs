//! Connection registration handlers.
//!
//! PASS, NICK and USER may arrive in any order and may be repeated; the
//! welcome burst is sent the first time all three are in place and the
//! nickname is still free.

mod caps;
mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use caps::CapHandler;
pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::{QuitHandler, close_session};
pub use user::UserHandler;
pub(crate) use welcome::try_register;
