//! Resource limits configuration.

use serde::Deserialize;

/// Resource limits.
///
/// These bound per-connection and per-command work so one client cannot
/// exhaust the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum simultaneous client connections (default: 512).
    /// Connections beyond this are refused at accept time.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Maximum channels one client may be in (default: 10).
    #[serde(default = "default_max_channels_per_user")]
    pub max_channels_per_user: usize,
    /// Maximum targets in one JOIN/PRIVMSG/NOTICE (default: 10).
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,
    /// Maximum nickname length (default: 30).
    #[serde(default = "default_nick_len")]
    pub nick_len: usize,
    /// Maximum channel name length, `#` included (default: 50).
    #[serde(default = "default_channel_len")]
    pub channel_len: usize,
    /// Maximum channel key length (default: 23).
    #[serde(default = "default_key_len")]
    pub key_len: usize,
    /// Maximum inbound line length in bytes, terminator included (default: 512).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Outbound lines queued per client before it is dropped (default: 1024).
    #[serde(default = "default_sendq_lines")]
    pub sendq_lines: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            max_channels_per_user: default_max_channels_per_user(),
            max_targets: default_max_targets(),
            nick_len: default_nick_len(),
            channel_len: default_channel_len(),
            key_len: default_key_len(),
            max_line_len: default_max_line_len(),
            sendq_lines: default_sendq_lines(),
        }
    }
}

fn default_max_connections() -> usize {
    512
}

fn default_max_channels_per_user() -> usize {
    10
}

fn default_max_targets() -> usize {
    ircserv_proto::DEFAULT_MAX_TARGETS
}

fn default_nick_len() -> usize {
    ircserv_proto::DEFAULT_NICK_MAX_LEN
}

fn default_channel_len() -> usize {
    ircserv_proto::DEFAULT_CHANNEL_MAX_LEN
}

fn default_key_len() -> usize {
    ircserv_proto::DEFAULT_KEY_MAX_LEN
}

fn default_max_line_len() -> usize {
    ircserv_proto::DEFAULT_MAX_LINE_LEN
}

fn default_sendq_lines() -> usize {
    1024
}
