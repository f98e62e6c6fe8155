//! The structured form of one received line.

use super::kind::CommandKind;

/// One received line, classified and split into targets.
///
/// Channel names are stored without their `#` prefix. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Classified keyword.
    pub kind: CommandKind,
    /// Keyword exactly as sent, for error echoing.
    pub raw_verb: String,
    /// `#`-prefixed targets, prefix stripped, in order.
    pub channels: Vec<String>,
    /// Nickname targets, in order.
    pub users: Vec<String>,
    /// Channel and nickname targets together, as sent (`#` kept).
    pub targets: Vec<String>,
    /// JOIN keys, positionally paired with `channels`.
    pub passwords: Vec<String>,
    /// Command-specific positional residue.
    pub parameters: Vec<String>,
    /// Final free-text field.
    pub trailing: Option<String>,
    /// `true` when the line ended in a bare `:`, i.e. the trailing field was
    /// given but empty.
    pub trailing_empty: bool,
}

impl ParsedCommand {
    pub(crate) fn new(kind: CommandKind, raw_verb: &str) -> Self {
        Self {
            kind,
            raw_verb: raw_verb.to_string(),
            channels: Vec::new(),
            users: Vec::new(),
            targets: Vec::new(),
            passwords: Vec::new(),
            parameters: Vec::new(),
            trailing: None,
            trailing_empty: false,
        }
    }

    /// The keyword to echo in replies: canonical for known commands, as sent
    /// otherwise.
    pub fn verb(&self) -> &str {
        match self.kind {
            CommandKind::Invalid => &self.raw_verb,
            kind => kind.as_str(),
        }
    }

    /// The `n`th positional parameter.
    pub fn param(&self, n: usize) -> Option<&str> {
        self.parameters.get(n).map(String::as_str)
    }

    /// The first parameter, falling back to the trailing field.
    ///
    /// Covers `PASS secret` and `PASS :secret` alike.
    pub fn param_or_trailing(&self) -> Option<&str> {
        self.param(0).or(self.trailing.as_deref())
    }

    /// The text of a PRIVMSG or NOTICE: the trailing field, or the remaining
    /// middle parameters when the client left out the `:`.
    pub fn message_text(&self) -> Option<String> {
        match &self.trailing {
            Some(text) if !text.is_empty() => Some(text.clone()),
            Some(_) => None,
            None if !self.parameters.is_empty() => Some(self.parameters.join(" ")),
            None => None,
        }
    }

    /// Total number of channel and user targets.
    pub fn target_count(&self) -> usize {
        self.channels.len() + self.users.len()
    }
}

/// Pair channels with users for KICK and INVITE.
///
/// Supported shapes are one channel with N users, N channels with one user,
/// and N channels with N users matched positionally. Any other shape yields
/// `None`.
///
/// ```
/// use ircserv_proto::pair_targets;
///
/// let chans = vec!["a".to_string(), "b".to_string()];
/// let users = vec!["u1".to_string(), "u2".to_string()];
/// assert_eq!(pair_targets(&chans, &users), Some(vec![("a", "u1"), ("b", "u2")]));
/// ```
pub fn pair_targets<'a>(channels: &'a [String], users: &'a [String]) -> Option<Vec<(&'a str, &'a str)>> {
    match (channels.len(), users.len()) {
        (0, _) | (_, 0) => None,
        (1, _) => Some(
            users
                .iter()
                .map(|u| (channels[0].as_str(), u.as_str()))
                .collect(),
        ),
        (_, 1) => Some(
            channels
                .iter()
                .map(|c| (c.as_str(), users[0].as_str()))
                .collect(),
        ),
        (c, u) if c == u => Some(
            channels
                .iter()
                .zip(users)
                .map(|(c, u)| (c.as_str(), u.as_str()))
                .collect(),
        ),
        _ => None,
    }
}
