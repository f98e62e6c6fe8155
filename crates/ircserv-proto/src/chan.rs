//! Channel name and channel key validation.
//!
//! Only `#` channels exist on this server. Names are compared byte-wise.

/// Default maximum channel name length, `#` included.
pub const DEFAULT_CHANNEL_MAX_LEN: usize = 50;

/// Default maximum channel key length.
pub const DEFAULT_KEY_MAX_LEN: usize = 23;

/// Extension trait for channel names and keys.
pub trait ChannelExt {
    /// Check if this string is a valid channel name of at most
    /// [`DEFAULT_CHANNEL_MAX_LEN`] bytes.
    ///
    /// Valid channel names start with `#`, have at least one character after
    /// it, and contain no space, comma, colon, BEL, NUL or other control
    /// characters.
    ///
    /// ```
    /// use ircserv_proto::ChannelExt;
    ///
    /// assert!("#rust".is_channel_name());
    /// assert!(!"rust".is_channel_name());
    /// assert!(!"#".is_channel_name());
    /// ```
    fn is_channel_name(&self) -> bool;

    /// Like [`is_channel_name`](Self::is_channel_name) with a custom limit.
    fn is_channel_name_len(&self, max_len: usize) -> bool;

    /// Check if this string can be used as a channel key (`+k`).
    ///
    /// Keys are 1..=`max_len` bytes of printable ASCII, excluding space,
    /// comma and colon.
    fn is_valid_key_len(&self, max_len: usize) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.is_channel_name_len(DEFAULT_CHANNEL_MAX_LEN)
    }

    fn is_channel_name_len(&self, max_len: usize) -> bool {
        let Some(body) = self.strip_prefix('#') else {
            return false;
        };
        if body.is_empty() || self.len() > max_len {
            return false;
        }
        !body
            .chars()
            .any(|c| matches!(c, ' ' | ',' | ':' | '\x07' | '\0') || c.is_control())
    }

    fn is_valid_key_len(&self, max_len: usize) -> bool {
        !self.is_empty()
            && self.len() <= max_len
            && self
                .bytes()
                .all(|b| b.is_ascii_graphic() && b != b',' && b != b':')
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn is_channel_name_len(&self, max_len: usize) -> bool {
        self.as_str().is_channel_name_len(max_len)
    }

    fn is_valid_key_len(&self, max_len: usize) -> bool {
        self.as_str().is_valid_key_len(max_len)
    }
}
