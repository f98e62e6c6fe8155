//! Line-based codec for tokio.
//!
//! Reads lines terminated by `\r\n` or a bare `\n` and writes lines with a
//! `\r\n` terminator appended. NUL and stray CR bytes never survive in
//! either direction, so one client line can never become two on the wire.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Line-based codec that handles newline-terminated messages.
///
/// Decoded lines have the terminator stripped. Bytes are decoded lossily, so
/// invalid UTF-8 never tears down a connection. Empty lines are skipped.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default 512-byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                // No complete line yet - remember where we stopped
                self.next_index = src.len();

                if src.len() > self.max_len {
                    return Err(error::ProtocolError::LineTooLong {
                        actual: src.len(),
                        limit: self.max_len,
                    });
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(error::ProtocolError::LineTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            let mut end = line.len() - 1;
            if end > 0 && line[end - 1] == b'\r' {
                end -= 1;
            }
            if end == 0 {
                continue;
            }

            let body: Vec<u8> = line[..end]
                .iter()
                .copied()
                .filter(|b| !is_line_breaking(*b))
                .collect();
            if body.is_empty() {
                continue;
            }

            return Ok(Some(String::from_utf8_lossy(&body).into_owned()));
        }
    }
}

/// Bytes that may not appear inside a line.
fn is_line_breaking(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\r' | b'\n')
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> error::Result<()> {
        let line = line.as_ref();
        // Anything after an embedded line break is dropped.
        let line = line
            .find(|c: char| c.is_ascii() && is_line_breaking(c as u8))
            .map_or(line, |pos| &line[..pos]);
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :test".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_bare_newline() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("NICK alice\nUSER a 0 * :A\r\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("NICK alice".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("USER a 0 * :A".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_partial_line_stays_buffered() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("JOIN #te");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"JOIN #te");

        buf.extend_from_slice(b"st\r\nPRIV");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("JOIN #test".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"PRIV");
    }

    #[test]
    fn test_decode_skips_empty_lines() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("\r\n\nPING x\r\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING x".to_string()));
    }

    #[test]
    fn test_decode_too_long() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(error::ProtocolError::LineTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_unterminated_overflow() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from("PRIVMSG #x");

        assert!(codec.decode(&mut buf).is_err());
    }

    #[test]
    fn test_decode_strips_embedded_cr_and_nul() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PRIVMSG bob :hi\r:irc.test 001 bob :x\0y\r\n");

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("PRIVMSG bob :hi:irc.test 001 bob :xy".to_string())
        );
    }

    #[test]
    fn test_decode_skips_line_of_only_control_bytes() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("\0\r\r\nPING x\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING x".to_string()));
    }

    #[test]
    fn test_encode_truncates_at_line_break() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("NOTICE a :one\r\nQUIT", &mut buf).unwrap();
        assert_eq!(&buf[..], b"NOTICE a :one\r\n");
    }

    #[test]
    fn test_encode_appends_crlf() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("PONG :test", &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }
}
