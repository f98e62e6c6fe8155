//! In-memory server harness for handler tests.

use crate::config::{Config, LimitsConfig};
use crate::handlers::{Outbox, Registry, close_session};
use crate::state::{Matrix, Uid};

/// A Matrix and Registry without sockets. Lines are fed in directly and
/// output is read back from the outbox.
pub(crate) struct TestServer {
    pub matrix: Matrix,
    pub outbox: Outbox,
    registry: Registry,
}

impl TestServer {
    pub fn new() -> Self {
        Self::with_limits(|_| {})
    }

    pub fn with_limits(tweak: impl FnOnce(&mut LimitsConfig)) -> Self {
        let mut config = Config::default().with_credentials(6667, "secret");
        config.server.name = "irc.test".to_string();
        config.server.description = "ircserv test server".to_string();
        tweak(&mut config.limits);
        Self {
            matrix: Matrix::new(&config),
            outbox: Outbox::new(),
            registry: Registry::new(config.limits.max_targets),
        }
    }

    pub fn connect(&mut self) -> Uid {
        self.matrix.sessions.create("127.0.0.1:50000".parse().unwrap())
    }

    pub fn send(&mut self, uid: Uid, line: &str) {
        self.registry
            .handle_line(&mut self.matrix, uid, line, &mut self.outbox);
    }

    pub fn drop_connection(&mut self, uid: Uid) {
        close_session(&mut self.matrix, uid, "Connection closed", false, &mut self.outbox);
    }

    /// Take every line queued for `uid` so far.
    pub fn lines(&mut self, uid: Uid) -> Vec<String> {
        let lines = self.outbox.lines_for(uid).map(str::to_string).collect();
        self.outbox.messages.retain(|(to, _)| *to != uid);
        lines
    }

    /// Forget all queued output.
    pub fn clear(&mut self) {
        self.outbox = Outbox::new();
    }
}

/// Connect and register a session as `nick` (username and realname also
/// `nick`), discarding the welcome burst.
pub(crate) fn registered(t: &mut TestServer, nick: &str) -> Uid {
    let uid = t.connect();
    t.send(uid, "PASS secret");
    t.send(uid, &format!("NICK {nick}"));
    t.send(uid, &format!("USER {nick} 0 * :{nick}"));
    let burst = t.lines(uid);
    assert_eq!(burst.len(), 4, "registration of {nick} failed: {burst:?}");
    uid
}
