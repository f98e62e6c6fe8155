//! Mode-string scanning.

use super::types::{ChannelMode, ModeChange, ModeError, ModeType, UserMode};

impl ModeChange<ChannelMode> {
    /// Scan a channel mode string against its argument list.
    ///
    /// Fails as a whole if any argument-taking letter finds no argument left.
    /// Unknown letters are returned as [`ChannelMode::Unknown`] so the caller
    /// can report them one by one. Surplus arguments are ignored.
    ///
    /// ```
    /// use ircserv_proto::{ChannelMode, ModeChange};
    ///
    /// let args = vec!["5".to_string(), "key".to_string()];
    /// let changes = ModeChange::<ChannelMode>::parse_channel("+lk", &args).unwrap();
    /// assert_eq!(changes[0].arg.as_deref(), Some("5"));
    /// assert_eq!(changes[1].arg.as_deref(), Some("key"));
    /// ```
    pub fn parse_channel(modes: &str, args: &[String]) -> Result<Vec<Self>, ModeError> {
        scan(modes, args)
    }
}

impl ModeChange<UserMode> {
    /// Scan a user mode string. User modes never take arguments.
    pub fn parse_user(modes: &str) -> Vec<Self> {
        scan(modes, &[]).unwrap_or_default()
    }
}

fn scan<T: ModeType>(modes: &str, args: &[String]) -> Result<Vec<ModeChange<T>>, ModeError> {
    let mut res = Vec::new();
    let mut args = args.iter();
    let mut adding = true;

    for c in modes.chars() {
        match c {
            '+' => adding = true,
            '-' => adding = false,
            _ => {
                let mode = T::from_char(c);
                let change = if mode.takes_arg(adding) {
                    let arg = args.next().ok_or(ModeError::MissingArg { mode: c })?;
                    ModeChange::with_arg(adding, mode, arg.as_str())
                } else {
                    ModeChange::new(adding, mode)
                };
                res.push(change);
            }
        }
    }

    Ok(res)
}
