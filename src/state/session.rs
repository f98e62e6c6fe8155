//! Per-connection session state.
//!
//! A [`Session`] is created when a socket is accepted and dropped when the
//! connection is torn down. It holds identity and registration progress only;
//! channel membership lives in the channel registry.

use std::net::SocketAddr;

use ircserv_proto::{ModeChange, Prefix, UserMode};

use super::uid::Uid;

/// User modes a session can hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserModes {
    /// `+i`
    pub invisible: bool,
    /// `+w`
    pub wallops: bool,
    /// `+o`; never granted by MODE, only removable.
    pub oper: bool,
}

impl UserModes {
    /// Apply one change. Returns `true` if the mode actually changed.
    ///
    /// Unknown letters are never applied; the caller reports them.
    pub fn apply(&mut self, change: &ModeChange<UserMode>) -> bool {
        let slot = match change.mode {
            UserMode::Invisible => &mut self.invisible,
            UserMode::Wallops => &mut self.wallops,
            // +o cannot be self-granted
            UserMode::Oper if change.adding => return false,
            UserMode::Oper => &mut self.oper,
            UserMode::Unknown(_) => return false,
        };
        let changed = *slot != change.adding;
        *slot = change.adding;
        changed
    }

    /// Mode string such as `+iw`, or `+` when no mode is set.
    pub fn as_mode_string(&self) -> String {
        let mut out = String::from("+");
        if self.invisible {
            out.push('i');
        }
        if self.oper {
            out.push('o');
        }
        if self.wallops {
            out.push('w');
        }
        out
    }
}

/// Identity and registration state of one connection.
#[derive(Debug, Clone)]
pub struct Session {
    /// Connection id.
    pub uid: Uid,
    /// Peer address.
    pub addr: SocketAddr,
    /// Host part of the user mask (the peer IP).
    pub host: String,
    /// Nickname, once NICK has been accepted.
    pub nick: Option<String>,
    /// Username from USER.
    pub username: Option<String>,
    /// Real name from USER.
    pub realname: String,
    /// Last password supplied with PASS.
    pub password: Option<String>,
    /// Set once the welcome burst has been sent.
    pub registered: bool,
    /// User modes.
    pub modes: UserModes,
    /// Number of channels this session is a member of.
    pub channel_count: usize,
}

impl Session {
    /// A fresh, unregistered session.
    pub fn new(uid: Uid, addr: SocketAddr) -> Self {
        Self {
            uid,
            addr,
            host: addr.ip().to_string(),
            nick: None,
            username: None,
            realname: String::new(),
            password: None,
            registered: false,
            modes: UserModes::default(),
            channel_count: 0,
        }
    }

    /// Nickname for use as a reply target, `*` before one is set.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// Whether the supplied password equals the server password.
    pub fn password_matches(&self, secret: &str) -> bool {
        self.password.as_deref() == Some(secret)
    }

    /// Whether an unregistered session has both NICK and USER in place.
    ///
    /// The password and nickname uniqueness are checked separately, when
    /// registration is attempted.
    pub fn ready_to_register(&self) -> bool {
        !self.registered && self.nick.is_some() && self.username.is_some()
    }

    /// `nick!user@host`
    pub fn mask(&self) -> String {
        self.prefix().to_string()
    }

    /// Message prefix identifying this session as a source.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(
            self.nick_or_star(),
            self.username.as_deref().unwrap_or("*"),
            self.host.as_str(),
        )
    }
}
