//! Zone configuration.
//!
//! The configuration lives in two shapes:
//! - [`RawConfig`], the flat string map read from and written to the
//!   properties file
//! - [`ZoneMap`], the parsed rectangles and key sequences used at runtime
//!
//! [`ZoneConfig`] converts between them and owns the file handling.

pub mod calculation;
pub mod error;
pub mod keycodes;
pub mod properties;
pub mod types;

pub use calculation::*;
pub use error::*;
pub use keycodes::*;
pub use types::*;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Flat key-value configuration, as stored on disk.
pub type RawConfig = BTreeMap<String, String>;

/// Default location of the configuration file.
pub const CONFIGURATION_FILE_PATH: &str = "./hotcorners.properties";

/// Comment banner written at the top of the configuration file.
pub const CONFIGURATION_FILE_COMMENTS: &str = "See https://en.wikipedia.org/wiki/.properties#Format and https://github.com/machinateur/hotcorners#configuration for more information on the format.";

/// Marker character of zone keys.
pub const ZONE_SIGIL: char = '@';

/// Key of the poll delay option, in milliseconds.
pub const DELAY_KEY: &str = "delay";

/// Poll delay used when the option is absent.
pub const DEFAULT_DELAY_MS: u64 = 10;

/// Number of coordinates in a zone key.
pub const COORDINATE_COUNT: usize = 4;

/// Separator between key names when encoding a zone value.
const COMMAND_JOINER: &str = " + ";

/// Splits on any of `,` `;` `+`, dropping trailing empty fields.
fn split_fields(text: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = text.split(|c: char| matches!(c, ',' | ';' | '+')).collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Encoder, parser and file handling for the zone configuration.
pub struct ZoneConfig;

impl ZoneConfig {
    /// Returns the built-in configuration for a 1920x1080 screen.
    pub fn with_defaults() -> RawConfig {
        let mut config = RawConfig::new();
        config.insert(DELAY_KEY.to_string(), DEFAULT_DELAY_MS.to_string());

        let (width, height) = REFERENCE_SCREEN;
        for (area, codes) in corner_zones(width, height, CALCULATION_THRESHOLD) {
            let (p0, p1) = (area.origin(), area.extent());
            // The corner presets hold at most four keys
            if let Err(e) = Self::put_codes(&mut config, p0.x, p0.y, p1.x, p1.y, &codes) {
                tracing::error!(%e, "Failed to encode default zone");
            }
        }

        config
    }

    /// Overlays the entries of the file at `path` onto `config`.
    ///
    /// A missing file is created from `config` instead.
    pub fn load(path: &Path, config: &mut RawConfig) -> Result<(), ConfigError> {
        match std::fs::read(path) {
            Ok(bytes) => {
                properties::parse_into(&properties::decode_latin1(&bytes), config);
                tracing::info!(path = %path.display(), entries = config.len(), "Configuration loaded");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No configuration file found, writing defaults");
                Self::store(path, config)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes `config` to `path`, replacing any existing file.
    pub fn store(path: &Path, config: &RawConfig) -> Result<(), ConfigError> {
        let timestamp = chrono::Local::now()
            .format("%a %b %d %H:%M:%S %Z %Y")
            .to_string();
        let text = properties::to_text(config, CONFIGURATION_FILE_COMMENTS, &timestamp);

        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), entries = config.len(), "Configuration stored");
        Ok(())
    }

    /// Encodes a zone bound to the given key names.
    pub fn put_names(
        config: &mut RawConfig,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        names: &[&str],
    ) -> Result<(), ConfigError> {
        if names.len() > COMMAND_STACK_SIZE {
            tracing::warn!(count = names.len(), "Command stack too large");
            return Err(ConfigError::TooManyCommands { count: names.len() });
        }

        let key = format!("{ZONE_SIGIL}{x0},{y0},{x1},{y1}");
        config.insert(key, names.join(COMMAND_JOINER));
        Ok(())
    }

    /// Encodes a zone bound to the given key codes.
    pub fn put_codes(
        config: &mut RawConfig,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        codes: &[KeyCode],
    ) -> Result<(), ConfigError> {
        let table = KeyCodeTable::global();
        let names: Vec<&str> = codes.iter().map(|&code| table.name_for(code)).collect();
        Self::put_names(config, x0, y0, x1, y1, &names)
    }

    /// Removes the `delay` option from `config` and returns it.
    pub fn take_delay(config: &mut RawConfig) -> Result<Duration, ConfigError> {
        match config.remove(DELAY_KEY) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDelay(value)),
            None => Ok(Duration::from_millis(DEFAULT_DELAY_MS)),
        }
    }

    /// Parses every zone entry of `config`.
    ///
    /// Keys without the zone sigil are skipped. Unknown key names become
    /// [`KeyCode::UNDEFINED`] instead of failing the parse.
    pub fn parse(config: &RawConfig) -> Result<ZoneMap, ConfigError> {
        let mut zones = ZoneMap::new();

        for (key, value) in config {
            let key = key.trim();
            let Some(coordinates) = key.strip_prefix(ZONE_SIGIL) else {
                tracing::debug!(key, "Skipping non-zone key");
                continue;
            };

            let area = Self::parse_key(key, coordinates)?;
            let sequence = Self::parse_value(value)?;
            tracing::debug!(%area, %sequence, "Parsed zone");

            if zones.insert(area, sequence).is_some() {
                tracing::warn!(%area, "Duplicate zone, keeping the last definition");
            }
        }

        Ok(zones)
    }

    fn parse_key(key: &str, coordinates: &str) -> Result<Rectangle, ConfigError> {
        let fields = split_fields(coordinates);
        if fields.len() != COORDINATE_COUNT {
            return Err(ConfigError::MalformedZoneKey {
                key: key.to_string(),
                fields: fields.len(),
            });
        }

        let mut values = [0i32; COORDINATE_COUNT];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCoordinate {
                    key: key.to_string(),
                    field: field.trim().to_string(),
                })?;
        }

        let [x0, y0, x1, y1] = values;
        Ok(Rectangle::new(x0, y0, x1, y1))
    }

    fn parse_value(value: &str) -> Result<KeyCodeSequence, ConfigError> {
        let tokens = split_fields(value);
        if tokens.len() > COMMAND_STACK_SIZE {
            return Err(ConfigError::TooManyCommands {
                count: tokens.len(),
            });
        }

        let table = KeyCodeTable::global();
        let codes: Vec<KeyCode> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| match table.code_for(token) {
                Ok(code) => code,
                Err(e) => {
                    tracing::warn!(index, %e, "Unknown key, slot left undefined");
                    KeyCode::UNDEFINED
                }
            })
            .collect();

        KeyCodeSequence::from_codes(&codes)
    }
}
