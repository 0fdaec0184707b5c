//! Typed access to environment overrides

use std::str::FromStr;
use thiserror::Error;

/// Error raised when an environment variable is set but cannot be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {name}: {value:?}")]
pub struct EnvError {
    pub name: String,
    pub value: String,
}

/// Read and parse an environment variable.
///
/// Returns `Ok(None)` when the variable is unset or empty.
pub fn env_var<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(EnvError {
            name: name.to_string(),
            value,
        }),
    }
}

/// True when the variable is set to anything other than empty, `0` or `false`
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"))
        .unwrap_or(false)
}
