//! Errors raised while loading, storing or parsing the configuration.

use std::path::PathBuf;

/// Errors that can occur while handling the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The store could not be read (for a reason other than absence) or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A zone key did not have exactly four coordinate fields.
    MalformedZoneKey { key: String, fields: usize },
    /// A coordinate field was not an integer.
    InvalidCoordinate { key: String, field: String },
    /// A command list had more entries than the command stack holds.
    TooManyCommands { count: usize },
    /// The `delay` option was not a non-negative integer.
    InvalidDelay(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Configuration I/O error on {}: {}", path.display(), source)
            }
            ConfigError::MalformedZoneKey { key, fields } => write!(
                f,
                "Malformed zone key '{}': expected 4 coordinates, found {}",
                key, fields
            ),
            ConfigError::InvalidCoordinate { key, field } => {
                write!(f, "Invalid coordinate '{}' in zone key '{}'", field, key)
            }
            ConfigError::TooManyCommands { count } => write!(
                f,
                "Too many commands: {} given, at most {} allowed",
                count,
                super::COMMAND_STACK_SIZE
            ),
            ConfigError::InvalidDelay(value) => write!(f, "Invalid delay: '{}'", value),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
