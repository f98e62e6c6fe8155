//! Message relay handlers: PRIVMSG and NOTICE.
//!
//! Both share one routing path. NOTICE never generates error replies.

mod delivery;
mod notice;
mod privmsg;

pub use notice::NoticeHandler;
pub use privmsg::PrivmsgHandler;
