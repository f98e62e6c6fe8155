//! Server state: sessions, channels and the Matrix that owns them.

mod channel;
mod matrix;
mod session;
mod uid;

pub use channel::Channel;
pub use matrix::{ChannelRegistry, Matrix, ServerInfo, SessionRegistry};
pub use session::{Session, UserModes};
pub use uid::{Uid, UidGenerator};
