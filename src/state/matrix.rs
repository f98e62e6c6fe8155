//! The Matrix - central state of the server.
//!
//! The Matrix holds every session and channel. It is owned by the reactor
//! task and borrowed mutably by handlers; nothing else touches it, so no
//! locking is needed.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use super::channel::Channel;
use super::session::Session;
use super::uid::{Uid, UidGenerator};
use crate::config::{Config, LimitsConfig};

/// This server's identity.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub description: String,
    pub created: DateTime<Utc>,
    /// Connection password every client must supply.
    pub password: String,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            version: config.server.version.clone(),
            description: config.server.description.clone(),
            created: Utc::now(),
            password: config.server.password.clone(),
        }
    }
}

/// Every live session, keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uid, Session>,
    uid_gen: UidGenerator,
}

impl SessionRegistry {
    /// Allocate an id and store a fresh session for `addr`.
    pub fn create(&mut self, addr: std::net::SocketAddr) -> Uid {
        let uid = self.uid_gen.next();
        self.sessions.insert(uid, Session::new(uid, addr));
        uid
    }

    pub fn get(&self, uid: Uid) -> Option<&Session> {
        self.sessions.get(&uid)
    }

    pub fn get_mut(&mut self, uid: Uid) -> Option<&mut Session> {
        self.sessions.get_mut(&uid)
    }

    pub fn remove(&mut self, uid: Uid) -> Option<Session> {
        self.sessions.remove(&uid)
    }

    /// Find a *registered* session by nickname.
    ///
    /// Unregistered sessions never claim a nickname.
    pub fn find_nick(&self, nick: &str) -> Option<Uid> {
        self.sessions
            .values()
            .find(|s| s.registered && s.nick.as_deref() == Some(nick))
            .map(|s| s.uid)
    }

    /// Nickname of `uid`, `*` if unknown or unset.
    pub fn nick_of(&self, uid: Uid) -> &str {
        self.sessions.get(&uid).map_or("*", Session::nick_or_star)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Every live channel, keyed by name without the `#`.
///
/// Names compare byte-wise.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Insert a new channel. An existing channel of the same name is kept.
    pub fn create(&mut self, channel: Channel) -> &mut Channel {
        self.channels
            .entry(channel.name().to_string())
            .or_insert(channel)
    }

    pub fn remove(&mut self, name: &str) -> Option<Channel> {
        self.channels.remove(name)
    }

    /// Names of the channels `uid` belongs to, sorted.
    pub fn memberships(&self, uid: Uid) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .values()
            .filter(|c| c.is_member(uid))
            .map(|c| c.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// All channel names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// The Matrix - central state container.
#[derive(Debug)]
pub struct Matrix {
    pub server_info: ServerInfo,
    pub limits: LimitsConfig,
    pub sessions: SessionRegistry,
    pub channels: ChannelRegistry,
}

impl Matrix {
    pub fn new(config: &Config) -> Self {
        Self {
            server_info: ServerInfo::from_config(config),
            limits: config.limits.clone(),
            sessions: SessionRegistry::default(),
            channels: ChannelRegistry::default(),
        }
    }

    /// Remove `uid` from channel `name`, keeping the session's channel count
    /// in step and deleting the channel once empty.
    ///
    /// Returns `false` if `uid` was not a member.
    pub fn leave_channel(&mut self, name: &str, uid: Uid) -> bool {
        let Some(channel) = self.channels.get_mut(name) else {
            return false;
        };
        if !channel.remove_member(uid) {
            return false;
        }
        if channel.is_empty() {
            self.channels.remove(name);
            tracing::debug!(channel = %name, "channel destroyed");
        }
        if let Some(session) = self.sessions.get_mut(uid) {
            session.channel_count = session.channel_count.saturating_sub(1);
        }
        true
    }

    /// Add `uid` to channel `name`, creating the channel (with `uid` as its
    /// operator and `key` as its key) if it does not exist.
    ///
    /// Admission checks are the caller's job.
    pub fn enter_channel(&mut self, name: &str, uid: Uid, key: Option<String>) {
        let added = match self.channels.get_mut(name) {
            Some(channel) => channel.add_member(uid),
            None => {
                let mut channel = Channel::new(name, uid);
                channel.set_key(key);
                self.channels.create(channel);
                tracing::debug!(channel = %name, %uid, "channel created");
                true
            }
        };
        if added && let Some(session) = self.sessions.get_mut(uid) {
            session.channel_count += 1;
        }
    }

    /// Every session sharing at least one channel with `uid`, excluding
    /// `uid` itself. Each peer appears once.
    pub fn channel_peers(&self, uid: Uid) -> BTreeSet<Uid> {
        let mut peers = BTreeSet::new();
        for name in self.channels.memberships(uid) {
            if let Some(channel) = self.channels.get(&name) {
                peers.extend(channel.members().filter(|m| *m != uid));
            }
        }
        peers
    }

    /// Space-separated member list for RPL_NAMREPLY, operators prefixed
    /// with `@`.
    pub fn names_list(&self, channel: &Channel) -> String {
        channel
            .members()
            .map(|uid| {
                let nick = self.sessions.nick_of(uid);
                if channel.is_operator(uid) {
                    format!("@{nick}")
                } else {
                    nick.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drop `uid` from every channel and from the session registry.
    ///
    /// Returns the removed session and the peers that shared a channel with
    /// it, so the caller can notify them.
    pub fn detach(&mut self, uid: Uid) -> Option<(Session, BTreeSet<Uid>)> {
        let peers = self.channel_peers(uid);
        for name in self.channels.memberships(uid) {
            self.leave_channel(&name, uid);
        }
        let session = self.sessions.remove(uid)?;
        Some((session, peers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        Matrix::new(&Config::default().with_credentials(6667, "secret"))
    }

    fn register(matrix: &mut Matrix, nick: &str) -> Uid {
        let uid = matrix.sessions.create("127.0.0.1:40000".parse().unwrap());
        let session = matrix.sessions.get_mut(uid).unwrap();
        session.nick = Some(nick.to_string());
        session.username = Some(nick.to_string());
        session.registered = true;
        uid
    }

    #[test]
    fn find_nick_ignores_unregistered_sessions() {
        let mut m = matrix();
        let uid = m.sessions.create("127.0.0.1:40000".parse().unwrap());
        m.sessions.get_mut(uid).unwrap().nick = Some("alice".into());
        assert_eq!(m.sessions.find_nick("alice"), None);

        let alice = register(&mut m, "alice");
        assert_eq!(m.sessions.find_nick("alice"), Some(alice));
        assert_eq!(m.sessions.find_nick("ALICE"), None);
    }

    #[test]
    fn enter_and_leave_track_channel_count() {
        let mut m = matrix();
        let alice = register(&mut m, "alice");
        let bob = register(&mut m, "bob");

        m.enter_channel("test", alice, Some("pw".into()));
        m.enter_channel("test", bob, None);
        assert_eq!(m.channels.get("test").unwrap().key(), Some("pw"));
        assert!(m.channels.get("test").unwrap().is_operator(alice));
        assert!(!m.channels.get("test").unwrap().is_operator(bob));
        assert_eq!(m.sessions.get(bob).unwrap().channel_count, 1);

        assert!(m.leave_channel("test", bob));
        assert!(!m.leave_channel("test", bob));
        assert_eq!(m.sessions.get(bob).unwrap().channel_count, 0);

        assert!(m.leave_channel("test", alice));
        assert!(!m.channels.contains("test"));
    }

    #[test]
    fn detach_reports_deduplicated_peers() {
        let mut m = matrix();
        let alice = register(&mut m, "alice");
        let bob = register(&mut m, "bob");
        let carol = register(&mut m, "carol");

        m.enter_channel("a", alice, None);
        m.enter_channel("a", bob, None);
        m.enter_channel("b", alice, None);
        m.enter_channel("b", bob, None);
        m.enter_channel("c", alice, None);

        let (session, peers) = m.detach(alice).unwrap();
        assert_eq!(session.nick.as_deref(), Some("alice"));
        assert_eq!(peers.into_iter().collect::<Vec<_>>(), vec![bob]);
        assert!(!m.channels.contains("c"));
        assert!(m.channels.get("a").unwrap().is_member(bob));
        assert!(m.sessions.get(alice).is_none());
        assert!(m.sessions.get(carol).is_some());
    }

    #[test]
    fn names_list_prefixes_operators() {
        let mut m = matrix();
        let alice = register(&mut m, "alice");
        let bob = register(&mut m, "bob");
        m.enter_channel("test", alice, None);
        m.enter_channel("test", bob, None);

        let chan = m.channels.get("test").unwrap();
        assert_eq!(m.names_list(chan), "@alice bob");
    }
}
