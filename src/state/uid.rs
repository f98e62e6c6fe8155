//! Session identifiers.

use std::fmt;

/// Stable identifier of one connection for its whole lifetime.
///
/// Displayed as six base36 characters, e.g. `AAAAAC`. Ids are never reused
/// while the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base36_encode_6(self.0))
    }
}

/// Hands out [`Uid`]s in increasing order.
#[derive(Debug, Default)]
pub struct UidGenerator {
    counter: u64,
}

impl UidGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next unique id.
    pub fn next(&mut self) -> Uid {
        let uid = Uid(self.counter);
        self.counter += 1;
        uid
    }
}

/// Encode a number as a 6-character base36 string.
fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for slot in result.iter_mut().rev() {
        *slot = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}
