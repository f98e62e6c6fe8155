//! Channel model.
//!
//! A channel stores member ids, never sessions; names and masks are resolved
//! through the session registry when needed. `operators` is kept a subset of
//! `members` by every mutating method.

use std::collections::{BTreeSet, HashSet};

use super::uid::Uid;
use crate::error::ChannelError;

/// One named group.
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    topic: String,
    key: Option<String>,
    limit: Option<usize>,
    invite_only: bool,
    topic_protected: bool,
    members: BTreeSet<Uid>,
    operators: BTreeSet<Uid>,
    invited: HashSet<Uid>,
}

impl Channel {
    /// Create a channel with `creator` as its only member and operator.
    ///
    /// `name` is stored without the `#` prefix.
    pub fn new(name: impl Into<String>, creator: Uid) -> Self {
        Self {
            name: name.into(),
            topic: String::new(),
            key: None,
            limit: None,
            invite_only: false,
            topic_protected: false,
            members: BTreeSet::from([creator]),
            operators: BTreeSet::from([creator]),
            invited: HashSet::new(),
        }
    }

    /// Name without the `#` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as shown on the wire, `#` included.
    pub fn display_name(&self) -> String {
        format!("#{}", self.name)
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    pub fn is_member(&self, uid: Uid) -> bool {
        self.members.contains(&uid)
    }

    pub fn is_operator(&self, uid: Uid) -> bool {
        self.operators.contains(&uid)
    }

    pub fn is_invited(&self, uid: Uid) -> bool {
        self.invited.contains(&uid)
    }

    /// Members in id order.
    pub fn members(&self) -> impl Iterator<Item = Uid> + '_ {
        self.members.iter().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check whether `uid` may join with `key`, in this order: member limit,
    /// key, invitation.
    ///
    /// Membership itself is not checked; callers handle "already on channel"
    /// before asking.
    pub fn check_admission(&self, uid: Uid, key: Option<&str>) -> Result<(), ChannelError> {
        if let Some(limit) = self.limit
            && self.members.len() >= limit
        {
            return Err(ChannelError::ChannelIsFull);
        }
        if let Some(expected) = &self.key
            && key != Some(expected.as_str())
        {
            return Err(ChannelError::BadChannelKey);
        }
        if self.invite_only && !self.invited.contains(&uid) {
            return Err(ChannelError::InviteOnlyChan);
        }
        Ok(())
    }

    /// Add a member, consuming any pending invitation.
    ///
    /// Returns `false` if `uid` was already a member.
    pub fn add_member(&mut self, uid: Uid) -> bool {
        self.invited.remove(&uid);
        self.members.insert(uid)
    }

    /// Remove a member together with its operator status and invitation.
    ///
    /// Returns `false` if `uid` was not a member.
    pub fn remove_member(&mut self, uid: Uid) -> bool {
        self.operators.remove(&uid);
        self.invited.remove(&uid);
        self.members.remove(&uid)
    }

    /// Grant or revoke operator status. Non-members are refused.
    ///
    /// Returns `true` if the operator set changed.
    pub fn set_operator(&mut self, uid: Uid, op: bool) -> bool {
        if !self.members.contains(&uid) {
            return false;
        }
        if op {
            self.operators.insert(uid)
        } else {
            self.operators.remove(&uid)
        }
    }

    /// Record a one-time invitation.
    pub fn invite(&mut self, uid: Uid) {
        self.invited.insert(uid);
    }

    // ------------------------------------------------------------------
    // Topic
    // ------------------------------------------------------------------

    /// Current topic, `None` when unset or cleared.
    pub fn topic(&self) -> Option<&str> {
        if self.topic.is_empty() {
            None
        } else {
            Some(&self.topic)
        }
    }

    /// Set the topic; an empty string clears it.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    // ------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------

    pub fn invite_only(&self) -> bool {
        self.invite_only
    }

    pub fn topic_protected(&self) -> bool {
        self.topic_protected
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if the flag changed.
    pub fn set_invite_only(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.invite_only, on) != on
    }

    /// Returns `true` if the flag changed.
    pub fn set_topic_protected(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.topic_protected, on) != on
    }

    /// Returns `true` if the key changed.
    pub fn set_key(&mut self, key: Option<String>) -> bool {
        if self.key == key {
            return false;
        }
        self.key = key;
        true
    }

    /// Returns `true` if the limit changed.
    pub fn set_limit(&mut self, limit: Option<usize>) -> bool {
        std::mem::replace(&mut self.limit, limit) != limit
    }

    /// Active flags and their arguments, e.g. `["+itkl", "secret", "10"]`.
    /// The key argument is left out unless `show_key` is set.
    pub fn mode_params(&self, show_key: bool) -> Vec<String> {
        let mut flags = String::from("+");
        let mut args = Vec::new();
        if self.invite_only {
            flags.push('i');
        }
        if self.topic_protected {
            flags.push('t');
        }
        if let Some(key) = &self.key {
            flags.push('k');
            if show_key {
                args.push(key.clone());
            }
        }
        if let Some(limit) = self.limit {
            flags.push('l');
            args.push(limit.to_string());
        }
        let mut out = vec![flags];
        out.extend(args);
        out
    }
}
