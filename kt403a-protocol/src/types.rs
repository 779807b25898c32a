//! Wire-level enumerations
//!
//! Storage devices, equalizer presets and playback states as the module
//! encodes them in command and response data words.

use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage source / device selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Device {
    /// USB mass storage
    Usb = 0x01,
    /// Micro SD card
    #[default]
    Sd = 0x02,
    /// AUX line-in
    Aux = 0x03,
    /// Sleep (no source)
    Sleep = 0x04,
    /// Internal flash
    Flash = 0x05,
}

impl Device {
    /// Data byte sent with the select-device command
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a device by its data byte
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Device::Usb),
            0x02 => Some(Device::Sd),
            0x03 => Some(Device::Aux),
            0x04 => Some(Device::Sleep),
            0x05 => Some(Device::Flash),
            _ => None,
        }
    }
}

/// Error returned when parsing a name that is not a known variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownName;

impl FromStr for Device {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usb" => Ok(Device::Usb),
            "sd" => Ok(Device::Sd),
            "aux" => Ok(Device::Aux),
            "sleep" => Ok(Device::Sleep),
            "flash" => Ok(Device::Flash),
            _ => Err(UnknownName),
        }
    }
}

/// Equalizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Equalizer {
    #[default]
    Normal = 0,
    Pop = 1,
    Rock = 2,
    Jazz = 3,
    Classic = 4,
    Bass = 5,
}

impl Equalizer {
    /// Preset index sent on the wire
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Convert an index to a preset
    ///
    /// Anything outside 0-5 collapses to [`Equalizer::Normal`].
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Equalizer::Pop,
            2 => Equalizer::Rock,
            3 => Equalizer::Jazz,
            4 => Equalizer::Classic,
            5 => Equalizer::Bass,
            _ => Equalizer::Normal,
        }
    }
}

impl FromStr for Equalizer {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Equalizer::Normal),
            "pop" => Ok(Equalizer::Pop),
            "rock" => Ok(Equalizer::Rock),
            "jazz" => Ok(Equalizer::Jazz),
            "classic" => Ok(Equalizer::Classic),
            "bass" => Ok(Equalizer::Bass),
            _ => Err(UnknownName),
        }
    }
}

/// Playback state reported by the state query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum PlaybackState {
    Stopped = 0x0200,
    Playing = 0x0201,
    Paused = 0x0202,
}

impl PlaybackState {
    /// Status code as reported by the module
    pub fn status_code(self) -> u16 {
        self as u16
    }

    /// Map a status code to a state
    ///
    /// Only the three exact codes are recognised; anything else is unknown.
    pub fn from_status(code: u16) -> Option<Self> {
        match code {
            0x0200 => Some(PlaybackState::Stopped),
            0x0201 => Some(PlaybackState::Playing),
            0x0202 => Some(PlaybackState::Paused),
            _ => None,
        }
    }
}
