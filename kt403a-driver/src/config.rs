//! Player start-up configuration

use kt403a_protocol::{Device, Equalizer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration applied when the driver is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerConfig {
    /// Storage device selected at start-up
    pub device: Device,
    /// Initial volume in percent (0-100), left untouched if `None`
    pub volume: Option<u8>,
    /// Initial equalizer preset, left untouched if `None`
    pub equalizer: Option<Equalizer>,
}

impl PlayerConfig {
    /// Configuration that selects `device` and changes nothing else
    pub fn with_device(device: Device) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_sd_card() {
        let config = PlayerConfig::default();

        assert_eq!(config.device, Device::Sd);
        assert_eq!(config.volume, None);
        assert_eq!(config.equalizer, None);
    }

    #[test]
    fn test_with_device() {
        let config = PlayerConfig::with_device(Device::Flash);

        assert_eq!(config.device, Device::Flash);
        assert_eq!(config.volume, None);
    }
}
