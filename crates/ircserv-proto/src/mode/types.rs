//! Mode letters and scanned mode changes.

use std::fmt;

use thiserror::Error;

/// A mode letter family that can be scanned from a mode string.
pub trait ModeType: Sized + Copy {
    /// Map a letter to a mode, unknown letters included.
    fn from_char(c: char) -> Self;

    /// The letter for this mode.
    fn to_char(self) -> char;

    /// Whether this mode consumes an argument in the given direction.
    fn takes_arg(self, adding: bool) -> bool;
}

/// Channel modes supported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// `i` - join by invitation only
    InviteOnly,
    /// `t` - only operators may change the topic
    ProtectedTopic,
    /// `k` - join requires a key
    Key,
    /// `l` - member limit
    Limit,
    /// `o` - grant or revoke operator status
    Oper,
    /// Any other letter
    Unknown(char),
}

impl ModeType for ChannelMode {
    fn from_char(c: char) -> Self {
        match c {
            'i' => Self::InviteOnly,
            't' => Self::ProtectedTopic,
            'k' => Self::Key,
            'l' => Self::Limit,
            'o' => Self::Oper,
            other => Self::Unknown(other),
        }
    }

    fn to_char(self) -> char {
        match self {
            Self::InviteOnly => 'i',
            Self::ProtectedTopic => 't',
            Self::Key => 'k',
            Self::Limit => 'l',
            Self::Oper => 'o',
            Self::Unknown(c) => c,
        }
    }

    fn takes_arg(self, adding: bool) -> bool {
        match self {
            Self::Oper => true,
            Self::Key | Self::Limit => adding,
            _ => false,
        }
    }
}

/// User modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserMode {
    /// `i` - invisible
    Invisible,
    /// `w` - receives wallops
    Wallops,
    /// `o` - server operator; can only be removed by the user
    Oper,
    /// Any other letter
    Unknown(char),
}

impl ModeType for UserMode {
    fn from_char(c: char) -> Self {
        match c {
            'i' => Self::Invisible,
            'w' => Self::Wallops,
            'o' => Self::Oper,
            other => Self::Unknown(other),
        }
    }

    fn to_char(self) -> char {
        match self {
            Self::Invisible => 'i',
            Self::Wallops => 'w',
            Self::Oper => 'o',
            Self::Unknown(c) => c,
        }
    }

    fn takes_arg(self, _adding: bool) -> bool {
        false
    }
}

/// One scanned mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange<T> {
    /// `true` for `+`, `false` for `-`.
    pub adding: bool,
    /// The mode letter.
    pub mode: T,
    /// Argument drawn for this letter, if it takes one.
    pub arg: Option<String>,
}

impl<T: ModeType> ModeChange<T> {
    /// A change with no argument.
    pub fn new(adding: bool, mode: T) -> Self {
        Self {
            adding,
            mode,
            arg: None,
        }
    }

    /// A change carrying an argument.
    pub fn with_arg(adding: bool, mode: T, arg: impl Into<String>) -> Self {
        Self {
            adding,
            mode,
            arg: Some(arg.into()),
        }
    }
}

/// Mode-string scanning failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// An argument-taking letter ran out of arguments.
    #[error("mode '{mode}' requires an argument")]
    MissingArg {
        /// The letter missing its argument.
        mode: char,
    },
}

/// Render applied changes as a compact mode string followed by arguments,
/// e.g. `["+kl-i", "secret", "10"]`. Returns an empty vector for no changes.
pub fn render_changes<T: ModeType>(changes: &[ModeChange<T>]) -> Vec<String> {
    let mut flags = String::new();
    let mut args = Vec::new();
    let mut direction = None;

    for change in changes {
        if direction != Some(change.adding) {
            flags.push(if change.adding { '+' } else { '-' });
            direction = Some(change.adding);
        }
        flags.push(change.mode.to_char());
        if let Some(arg) = &change.arg {
            args.push(arg.clone());
        }
    }

    if flags.is_empty() {
        return Vec::new();
    }
    let mut out = vec![flags];
    out.extend(args);
    out
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
