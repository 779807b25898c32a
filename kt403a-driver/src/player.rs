//! KT403A player facade
//!
//! Typed playback operations on top of [`CommandLink`]. Bounded inputs are
//! clamped or coerced rather than rejected, and queries that get no answer
//! fall back to defaults:
//!
//! | Query | No response |
//! |---|---|
//! | [`Kt403a::status`] / [`Kt403a::state`] | `None` |
//! | [`Kt403a::volume`] | 0 |
//! | [`Kt403a::equalizer`] | [`Equalizer::Normal`] |
//! | [`Kt403a::files_count`] | 0 |
//!
//! The only exception is construction: a module that does not answer the
//! initial state query fails with [`Error::Init`].

use kt403a_hal::{DelayNs, SerialPort};
use kt403a_protocol::{Command, Device, Equalizer, PlaybackState};

use crate::config::PlayerConfig;
use crate::error::Error;
use crate::resolver::CommandLink;
use crate::volume;

/// KT403A audio module driver
pub struct Kt403a<S, D> {
    link: CommandLink<S, D>,
    device: Device,
}

impl<S: SerialPort, D: DelayNs> Kt403a<S, D> {
    /// Create a driver and bring the module up
    ///
    /// Selects the configured device, then queries the playback state. A
    /// module that does not answer is reported as [`Error::Init`]. The
    /// optional volume and equalizer from `config` are applied afterwards.
    pub fn new(serial: S, delay: D, config: PlayerConfig) -> Result<Self, Error<S::Error>> {
        let mut player = Self {
            link: CommandLink::new(serial, delay),
            device: config.device,
        };

        player.set_device(config.device)?;

        if player.status()?.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("No answer to state query after selecting {:?}", config.device);
            return Err(Error::Init);
        }

        if let Some(percent) = config.volume {
            player.set_volume(i32::from(percent))?;
        }
        if let Some(eq) = config.equalizer {
            player.set_equalizer_preset(eq)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("KT403A ready on {:?}", player.device);

        Ok(player)
    }

    /// Consume the driver and return the serial port and delay
    pub fn release(self) -> (S, D) {
        self.link.release()
    }

    fn send(&mut self, command: Command, data: u16) -> Result<(), Error<S::Error>> {
        self.link.send(command, data).map_err(Error::Serial)
    }

    fn query(&mut self, command: Command, data: u16) -> Result<Option<u16>, Error<S::Error>> {
        let response = self.link.query(command, data).map_err(Error::Serial)?;
        Ok(response.map(|r| r.data))
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    /// Play the next track
    pub fn next(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Next, 0)
    }

    /// Play the previous track
    pub fn previous(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Previous, 0)
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Play, 0)
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Pause, 0)
    }

    /// Stop playback
    pub fn stop(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Stop, 0)
    }

    /// Play a track by its global index
    pub fn play_track(&mut self, index: u16) -> Result<(), Error<S::Error>> {
        self.send(Command::PlayTrack, index)
    }

    /// Play `track` in numbered folder `folder`
    pub fn play_in_folder(&mut self, folder: u8, track: u8) -> Result<(), Error<S::Error>> {
        self.send(Command::PlayInFolder, u16::from_be_bytes([folder, track]))
    }

    /// Play a track from the "MP3" folder by index
    pub fn play_folder_track(&mut self, index: u16) -> Result<(), Error<S::Error>> {
        self.send(Command::PlayFolderTrack, index)
    }

    /// Repeat the track that is currently playing
    pub fn repeat_current(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::RepeatCurrent, 0)
    }

    /// Shuffle all tracks on the current device
    pub fn shuffle(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Shuffle, 0)
    }

    /// Loop all tracks on or off
    pub fn loop_all(&mut self, enabled: bool) -> Result<(), Error<S::Error>> {
        self.send(Command::LoopAll, u16::from(enabled))
    }

    /// Loop every track in a folder
    pub fn loop_folder(&mut self, folder: u8) -> Result<(), Error<S::Error>> {
        self.send(Command::LoopFolder, u16::from(folder))
    }

    /// Loop the current track on or off
    ///
    /// The module uses 0 for on and 1 for off here, the reverse of
    /// [`Kt403a::loop_all`].
    pub fn loop_track(&mut self, enabled: bool) -> Result<(), Error<S::Error>> {
        self.send(Command::LoopTrack, u16::from(!enabled))
    }

    /// Enable or disable the DAC output (0 on, 1 off)
    pub fn set_dac(&mut self, enabled: bool) -> Result<(), Error<S::Error>> {
        self.send(Command::Dac, u16::from(!enabled))
    }

    /// Reset the module
    pub fn reset(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::Reset, 0)
    }

    // ---------------------------------------------------------------------
    // Volume and equalizer
    // ---------------------------------------------------------------------

    /// Raise the volume by one module step
    pub fn volume_up(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::VolumeUp, 0)
    }

    /// Lower the volume by one module step
    pub fn volume_down(&mut self) -> Result<(), Error<S::Error>> {
        self.send(Command::VolumeDown, 0)
    }

    /// Set the volume in percent
    ///
    /// Clamped to 0-100, then scaled to the module's 0-30 range.
    pub fn set_volume(&mut self, percent: i32) -> Result<(), Error<S::Error>> {
        let units = volume::percent_to_units(percent);
        self.send(Command::SetVolume, u16::from(units))
    }

    /// Current volume in percent, 0 if the module does not answer
    pub fn volume(&mut self) -> Result<u8, Error<S::Error>> {
        Ok(self
            .query(Command::QueryVolume, 0)?
            .map(volume::units_to_percent)
            .unwrap_or(0))
    }

    /// Set the equalizer by preset index
    ///
    /// Indices outside 0-5 select [`Equalizer::Normal`].
    pub fn set_equalizer(&mut self, index: i32) -> Result<(), Error<S::Error>> {
        self.set_equalizer_preset(Equalizer::from_index(index))
    }

    /// Set the equalizer preset
    pub fn set_equalizer_preset(&mut self, eq: Equalizer) -> Result<(), Error<S::Error>> {
        self.send(Command::SetEqualizer, u16::from(eq.index()))
    }

    /// Current equalizer preset, [`Equalizer::Normal`] if the module does not answer
    pub fn equalizer(&mut self) -> Result<Equalizer, Error<S::Error>> {
        Ok(self
            .query(Command::QueryEqualizer, 0)?
            .map(|index| Equalizer::from_index(i32::from(index)))
            .unwrap_or_default())
    }

    // ---------------------------------------------------------------------
    // Device selection and power
    // ---------------------------------------------------------------------

    /// Select the storage device and remember it as current
    pub fn set_device(&mut self, device: Device) -> Result<(), Error<S::Error>> {
        self.send(Command::SelectDevice, u16::from(device.code()))?;
        self.device = device;
        Ok(())
    }

    /// Currently selected device
    pub fn device(&self) -> Device {
        self.device
    }

    /// Enter or leave low-power mode
    ///
    /// Leaving low-power mode re-selects the current device.
    pub fn set_low_power(&mut self, enabled: bool) -> Result<(), Error<S::Error>> {
        if enabled {
            self.send(Command::LowPower, 0)
        } else {
            self.set_device(self.device)
        }
    }

    // ---------------------------------------------------------------------
    // State queries
    // ---------------------------------------------------------------------

    /// Raw playback status code, `None` if the module does not answer
    pub fn status(&mut self) -> Result<Option<u16>, Error<S::Error>> {
        self.query(Command::QueryState, 0)
    }

    /// Playback state, `None` if unanswered or the code is not a known state
    pub fn state(&mut self) -> Result<Option<PlaybackState>, Error<S::Error>> {
        Ok(self.status()?.and_then(PlaybackState::from_status))
    }

    /// Check if playback is stopped
    pub fn is_stopped(&mut self) -> Result<bool, Error<S::Error>> {
        Ok(self.status()? == Some(PlaybackState::Stopped.status_code()))
    }

    /// Check if a track is playing
    pub fn is_playing(&mut self) -> Result<bool, Error<S::Error>> {
        Ok(self.status()? == Some(PlaybackState::Playing.status_code()))
    }

    /// Check if playback is paused
    pub fn is_paused(&mut self) -> Result<bool, Error<S::Error>> {
        Ok(self.status()? == Some(PlaybackState::Paused.status_code()))
    }

    /// Number of files on a storage device
    ///
    /// Only USB, SD and flash can be counted; other devices return 0
    /// without touching the line.
    pub fn files_count(&mut self, device: Device) -> Result<u16, Error<S::Error>> {
        match Command::file_count_query(device) {
            Some(command) => Ok(self.query(command, 0)?.unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Number of files on the current device
    pub fn current_files_count(&mut self) -> Result<u16, Error<S::Error>> {
        self.files_count(self.device)
    }

    /// Number of files in a numbered folder
    pub fn folder_files_count(&mut self, folder: u8) -> Result<u16, Error<S::Error>> {
        Ok(self
            .query(Command::QueryFolderFileCount, u16::from(folder))?
            .unwrap_or(0))
    }
}
