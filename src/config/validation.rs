//! Configuration validation.
//!
//! Validates the configuration file and the command-line arguments at
//! startup so mistakes surface before the listener is bound.

use super::Config;
use thiserror::Error;

/// Minimum length of the connection password.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Punctuation allowed in the connection password besides ASCII letters and
/// digits.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>?/\\~`";

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain whitespace: '{0}'")]
    InvalidServerName(String),
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("limits.max_line_len must be at least 16, got {0}")]
    LineLimitTooSmall(usize),
    #[error("port must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("password contains an invalid character: {0:?}")]
    PasswordInvalidChar(char),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(config.server.name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("max_connections", limits.max_connections),
        ("max_channels_per_user", limits.max_channels_per_user),
        ("max_targets", limits.max_targets),
        ("nick_len", limits.nick_len),
        ("channel_len", limits.channel_len),
        ("key_len", limits.key_len),
        ("sendq_lines", limits.sendq_lines),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }
    if limits.max_line_len < 16 {
        errors.push(ValidationError::LineLimitTooSmall(limits.max_line_len));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse the `<port>` argument: decimal digits only, 1..=65535.
pub fn parse_port(arg: &str) -> Result<u16, ValidationError> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidPort(arg.to_string()));
    }
    match arg.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ValidationError::InvalidPort(arg.to_string())),
    }
}

/// Check the `<password>` argument: at least [`MIN_PASSWORD_LEN`]
/// characters, each an ASCII letter, digit or allowed symbol.
pub fn parse_password(arg: &str) -> Result<String, ValidationError> {
    if arg.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if let Some(bad) = arg
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SYMBOLS.contains(*c))
    {
        return Err(ValidationError::PasswordInvalidChar(bad));
    }
    Ok(arg.to_string())
}
