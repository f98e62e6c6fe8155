//! Splitting a single line into command, parameters and trailing field.

/// One line split into its lexical parts. Borrows from the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// First whitespace-delimited token (case as sent).
    pub command: &'a str,
    /// Middle parameters, in order, before any comma splitting.
    pub params: Vec<&'a str>,
    /// Text after the first ` :`; `Some("")` when the line ends in a bare `:`.
    pub trailing: Option<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Every parameter split on commas, flattened, empty segments dropped.
    pub fn values(&self) -> Vec<&'a str> {
        self.params.iter().flat_map(|&p| split_list(p)).collect()
    }
}

/// Split a line into command, parameters and trailing field.
///
/// A leading `:prefix` token is skipped. Returns `None` for a line with no
/// command token.
pub fn split_line(line: &str) -> Option<RawLine<'_>> {
    let mut rest = line.trim_start_matches(is_space);

    if rest.starts_with(':') {
        let end = rest.find(is_space)?;
        rest = rest[end..].trim_start_matches(is_space);
    }

    let (command, mut rest) = next_token(rest)?;
    let mut params = Vec::new();
    let mut trailing = None;

    loop {
        rest = rest.trim_start_matches(is_space);
        if rest.is_empty() {
            break;
        }
        if let Some(text) = rest.strip_prefix(':') {
            trailing = Some(text);
            break;
        }
        match next_token(rest) {
            Some((token, remainder)) => {
                params.push(token);
                rest = remainder;
            }
            None => break,
        }
    }

    Some(RawLine {
        command,
        params,
        trailing,
    })
}

/// Split a comma-separated list, preserving order and dropping empty segments.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|s| !s.is_empty())
}

fn next_token(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    match s.find(is_space) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}
