//! Keyword-specific target classification and validation.

use super::kind::CommandKind;
use super::parsed::{pair_targets, ParsedCommand};
use crate::error::ParseError;
use crate::message::{split_line, split_list, RawLine};

/// Default cap on the number of targets in one command.
pub const DEFAULT_MAX_TARGETS: usize = 10;

/// Turns raw lines into [`ParsedCommand`]s and checks their structure.
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    max_targets: usize,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TARGETS)
    }
}

impl CommandParser {
    /// Create a parser with the given per-command target cap.
    pub fn new(max_targets: usize) -> Self {
        Self { max_targets }
    }

    /// Split and classify one line. Returns `None` for a line with no
    /// command token.
    ///
    /// Unknown keywords are not an error here; they produce
    /// [`CommandKind::Invalid`].
    pub fn parse(&self, line: &str) -> Option<ParsedCommand> {
        let raw = split_line(line)?;
        let kind = CommandKind::from_keyword(raw.command);
        let mut cmd = ParsedCommand::new(kind, raw.command);

        cmd.trailing = raw.trailing.map(str::to_string);
        cmd.trailing_empty = raw.trailing == Some("");

        match kind {
            CommandKind::Join => {
                for value in raw.values() {
                    match value.strip_prefix('#') {
                        Some(name) => cmd.channels.push(name.to_string()),
                        None => cmd.passwords.push(value.to_string()),
                    }
                }
            }
            CommandKind::Part => leading_targets(&mut cmd, &raw, 1),
            CommandKind::Kick => leading_targets(&mut cmd, &raw, 2),
            CommandKind::Invite
            | CommandKind::Topic
            | CommandKind::Names
            | CommandKind::Whois => classify(&mut cmd, raw.values()),
            CommandKind::Privmsg | CommandKind::Notice => {
                if let Some((targets, rest)) = raw.params.split_first() {
                    classify(&mut cmd, split_list(targets).collect());
                    cmd.parameters = owned(rest);
                }
            }
            CommandKind::Mode => mode_targets(&mut cmd, &raw),
            _ => cmd.parameters = owned(&raw.params),
        }

        Some(cmd)
    }

    /// Check the structure of a parsed command.
    ///
    /// Runs before any handler; a failure means the handler is not invoked.
    pub fn validate(&self, cmd: &ParsedCommand) -> Result<(), ParseError> {
        let need_more = || ParseError::NeedMoreParams {
            command: cmd.verb().to_string(),
        };
        let syntax = || ParseError::Syntax {
            command: cmd.verb().to_string(),
        };
        let too_many = |count| ParseError::TooManyTargets {
            command: cmd.verb().to_string(),
            count,
        };

        match cmd.kind {
            CommandKind::Pass => {
                if cmd.param_or_trailing().map_or(true, str::is_empty) {
                    return Err(need_more());
                }
            }
            CommandKind::Nick => {
                if cmd.param_or_trailing().map_or(true, str::is_empty) {
                    return Err(ParseError::NoNicknameGiven);
                }
            }
            CommandKind::User => {
                let fields = cmd.parameters.len() + usize::from(cmd.trailing.is_some());
                if fields < 4 || cmd.parameters[0].is_empty() {
                    return Err(need_more());
                }
            }
            CommandKind::Join => {
                if cmd.channels.is_empty() {
                    return Err(need_more());
                }
                if cmd.channels.len() > self.max_targets {
                    return Err(too_many(cmd.channels.len()));
                }
            }
            CommandKind::Part => {
                if cmd.target_count() == 0 {
                    return Err(need_more());
                }
            }
            CommandKind::Privmsg | CommandKind::Notice => {
                if cmd.target_count() == 0 || cmd.message_text().is_none() {
                    return Err(need_more());
                }
                if cmd.target_count() > self.max_targets {
                    return Err(too_many(cmd.target_count()));
                }
            }
            CommandKind::Kick | CommandKind::Invite => {
                if cmd.channels.is_empty() || cmd.users.is_empty() {
                    return Err(need_more());
                }
                if pair_targets(&cmd.channels, &cmd.users).is_none() {
                    return Err(syntax());
                }
            }
            CommandKind::Topic => match cmd.target_count() {
                0 => return Err(need_more()),
                1 => {}
                _ => return Err(syntax()),
            },
            CommandKind::Mode => {
                if cmd.target_count() == 0 {
                    return Err(need_more());
                }
            }
            CommandKind::Cap => {
                if cmd.param_or_trailing().is_none() {
                    return Err(need_more());
                }
            }
            CommandKind::Ping => {
                if cmd.param_or_trailing().map_or(true, str::is_empty) {
                    return Err(ParseError::NoOrigin);
                }
            }
            CommandKind::Whois => {
                if cmd.users.is_empty() && cmd.channels.is_empty() {
                    return Err(ParseError::NoNicknameGiven);
                }
            }
            CommandKind::Names | CommandKind::Quit | CommandKind::Pong | CommandKind::Invalid => {}
        }

        Ok(())
    }
}

/// Sort values into channels (by `#` prefix) and users.
fn classify(cmd: &mut ParsedCommand, values: Vec<&str>) {
    for value in values {
        cmd.targets.push(value.to_string());
        match value.strip_prefix('#') {
            Some(name) => cmd.channels.push(name.to_string()),
            None => cmd.users.push(value.to_string()),
        }
    }
}

/// Only the first `lists` parameters name targets. Anything after them is a
/// reason sent without a leading `:`.
fn leading_targets(cmd: &mut ParsedCommand, raw: &RawLine<'_>, lists: usize) {
    let (head, rest) = raw.params.split_at(raw.params.len().min(lists));
    classify(cmd, head.iter().flat_map(|&p| split_list(p)).collect());
    if cmd.trailing.is_none() && !rest.is_empty() {
        cmd.trailing = Some(rest.join(" "));
    }
}

/// MODE takes a single target; mode string and arguments stay unsplit, and a
/// trailing field counts as one more argument.
fn mode_targets(cmd: &mut ParsedCommand, raw: &RawLine<'_>) {
    let Some((target, rest)) = raw.params.split_first() else {
        return;
    };
    match target.strip_prefix('#') {
        Some(name) => cmd.channels.push(name.to_string()),
        None => cmd.users.push(target.to_string()),
    }
    cmd.parameters = owned(rest);
    if let Some(trailing) = raw.trailing {
        cmd.parameters.push(trailing.to_string());
    }
}

fn owned(params: &[&str]) -> Vec<String> {
    params.iter().map(|p| p.to_string()).collect()
}
