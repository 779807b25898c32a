//! Simple TOML parser for the player configuration
//!
//! This is a minimal parser that handles only the subset used by
//! player.toml. It does NOT support the full TOML format.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown sections and keys are rejected so typos do not go unnoticed.

use kt403a_driver::PlayerConfig;
use kt403a_protocol::{Device, Equalizer};

/// Default seconds between idle state polls
pub const DEFAULT_POLL_INTERVAL_S: u16 = 5;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not valid in its section
    UnknownKey,
    /// Invalid value type or out of range
    InvalidValue,
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareConfig {
    /// Driver start-up configuration
    pub player: PlayerConfig,
    /// Seconds between state polls while no button is pressed
    pub poll_interval_s: u16,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            poll_interval_s: DEFAULT_POLL_INTERVAL_S,
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Player,
    Poll,
}

/// Parse TOML configuration into FirmwareConfig
pub fn parse_config(input: &str) -> Result<FirmwareConfig, ParseError> {
    let mut config = FirmwareConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Remove a trailing comment, ignoring `#` inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse section header like "player" or "poll"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "player" => Ok(Section::Player),
        "poll" => Ok(Section::Poll),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split "key = value"
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an unsigned integer value
fn parse_u16(value: &str) -> Result<u16, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Apply a key/value pair to the config
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut FirmwareConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Player, "device") => {
            config.player.device = parse_string(value)?
                .parse::<Device>()
                .map_err(|_| ParseError::InvalidValue)?;
        }
        (Section::Player, "volume") => {
            let volume = parse_u16(value)?;
            if volume > 100 {
                return Err(ParseError::InvalidValue);
            }
            config.player.volume = Some(volume as u8);
        }
        (Section::Player, "equalizer") => {
            let eq = parse_string(value)?
                .parse::<Equalizer>()
                .map_err(|_| ParseError::InvalidValue)?;
            config.player.equalizer = Some(eq);
        }
        (Section::Poll, "interval_s") => {
            let interval = parse_u16(value)?;
            if interval == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.poll_interval_s = interval;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
