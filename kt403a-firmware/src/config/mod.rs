//! Configuration loading and parsing
//!
//! The player configuration is embedded from player.toml and parsed at
//! boot by a small no_std parser.

pub mod toml;

pub use toml::{parse_config, FirmwareConfig, ParseError};
