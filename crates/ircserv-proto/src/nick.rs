//! Nickname rules.

/// Default maximum nickname length in bytes.
pub const DEFAULT_NICK_MAX_LEN: usize = 30;

/// Whether `nick` is acceptable as a nickname of at most `max_len` bytes.
///
/// The first character is an ASCII letter or one of ``[]\`_^{|}``; the rest
/// may also be digits or `-`.
///
/// ```
/// use ircserv_proto::is_valid_nick;
///
/// assert!(is_valid_nick("[cool]-1", 30));
/// assert!(!is_valid_nick("1st", 30));
/// ```
pub fn is_valid_nick(nick: &str, max_len: usize) -> bool {
    let symbol = |c: char| "[]\\`_^{|}".contains(c);
    let mut chars = nick.chars();
    match chars.next() {
        Some(first) if nick.len() <= max_len => {
            (first.is_ascii_alphabetic() || symbol(first))
                && chars.all(|c| c.is_ascii_alphanumeric() || symbol(c) || c == '-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_symbols_and_trailing_digits() {
        for nick in ["alice", "Bob42", "n", "nick-name", "_x_", "{a}", "`q`"] {
            assert!(is_valid_nick(nick, DEFAULT_NICK_MAX_LEN), "{nick}");
        }
    }

    #[test]
    fn rejects_bad_first_char_and_separators() {
        for nick in ["", "9lives", "-dash", "a@b", "a!b", "#chan", "a,b", "a b"] {
            assert!(!is_valid_nick(nick, DEFAULT_NICK_MAX_LEN), "{nick:?}");
        }
    }

    #[test]
    fn honours_length_limit() {
        assert!(is_valid_nick("abcde", 5));
        assert!(!is_valid_nick("abcdef", 5));
    }
}
