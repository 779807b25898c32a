//! Command catalog
//!
//! Every command the driver can send, with the width of its data word and
//! the time the module needs before the line can be used again. The settle
//! delay is not signalled by the module; it is a fixed wait after each send.

use crate::frame::{encode, TX_FRAME_SIZE};
use crate::types::Device;

/// Command opcodes
pub mod opcode {
    /// Play next track
    pub const NEXT: u8 = 0x01;
    /// Play previous track
    pub const PREVIOUS: u8 = 0x02;
    /// Play track by index
    pub const PLAY_TRACK: u8 = 0x03;
    /// Volume up one step
    pub const VOLUME_UP: u8 = 0x04;
    /// Volume down one step
    pub const VOLUME_DOWN: u8 = 0x05;
    /// Set volume (0-30)
    pub const SET_VOLUME: u8 = 0x06;
    /// Set equalizer preset (0-5)
    pub const SET_EQUALIZER: u8 = 0x07;
    /// Repeat the current track
    pub const REPEAT_CURRENT: u8 = 0x08;
    /// Select storage device
    pub const SELECT_DEVICE: u8 = 0x09;
    /// Enter low-power mode
    pub const LOW_POWER: u8 = 0x0A;
    /// Reset the chip
    pub const RESET: u8 = 0x0C;
    /// Resume / start playback
    pub const PLAY: u8 = 0x0D;
    /// Pause playback
    pub const PAUSE: u8 = 0x0E;
    /// Play track in numbered folder
    pub const PLAY_IN_FOLDER: u8 = 0x0F;
    /// Loop all tracks on/off
    pub const LOOP_ALL: u8 = 0x11;
    /// Play track from the "MP3" folder
    pub const PLAY_FOLDER_TRACK: u8 = 0x12;
    /// Stop playback
    pub const STOP: u8 = 0x16;
    /// Loop a folder
    pub const LOOP_FOLDER: u8 = 0x17;
    /// Shuffle all tracks
    pub const SHUFFLE: u8 = 0x18;
    /// Loop the current track on/off
    pub const LOOP_TRACK: u8 = 0x19;
    /// DAC on/off
    pub const DAC: u8 = 0x1A;
    /// Query playback state
    pub const QUERY_STATE: u8 = 0x42;
    /// Query volume
    pub const QUERY_VOLUME: u8 = 0x43;
    /// Query equalizer preset
    pub const QUERY_EQUALIZER: u8 = 0x44;
    /// Query file count on USB storage
    pub const QUERY_USB_FILES: u8 = 0x47;
    /// Query file count on SD card
    pub const QUERY_SD_FILES: u8 = 0x48;
    /// Query file count on internal flash
    pub const QUERY_FLASH_FILES: u8 = 0x49;
    /// Query file count in a folder
    pub const QUERY_FOLDER_FILES: u8 = 0x4E;
}

/// Default settle delay after a command
pub const DEFAULT_SETTLE_MS: u32 = 30;

/// Settle delay after device selection and queries
pub const SLOW_SETTLE_MS: u32 = 200;

/// Settle delay after a chip reset
pub const RESET_SETTLE_MS: u32 = 1000;

/// Number of meaningful bytes in a command's data word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// No data, the word is sent as zero
    None,
    /// Low byte only
    Byte,
    /// Full 16-bit word
    Word,
}

impl DataWidth {
    /// Mask a data word to this width
    pub fn mask(self, data: u16) -> u16 {
        match self {
            DataWidth::None => 0,
            DataWidth::Byte => data & 0x00FF,
            DataWidth::Word => data,
        }
    }
}

/// The closed set of commands understood by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Next,
    Previous,
    PlayTrack,
    VolumeUp,
    VolumeDown,
    SetVolume,
    SetEqualizer,
    RepeatCurrent,
    SelectDevice,
    LowPower,
    Reset,
    Play,
    Pause,
    PlayInFolder,
    LoopAll,
    PlayFolderTrack,
    Stop,
    LoopFolder,
    Shuffle,
    LoopTrack,
    Dac,
    QueryState,
    QueryVolume,
    QueryEqualizer,
    QueryUsbFileCount,
    QuerySdFileCount,
    QueryFlashFileCount,
    QueryFolderFileCount,
}

impl Command {
    /// Opcode byte
    pub fn opcode(self) -> u8 {
        match self {
            Command::Next => opcode::NEXT,
            Command::Previous => opcode::PREVIOUS,
            Command::PlayTrack => opcode::PLAY_TRACK,
            Command::VolumeUp => opcode::VOLUME_UP,
            Command::VolumeDown => opcode::VOLUME_DOWN,
            Command::SetVolume => opcode::SET_VOLUME,
            Command::SetEqualizer => opcode::SET_EQUALIZER,
            Command::RepeatCurrent => opcode::REPEAT_CURRENT,
            Command::SelectDevice => opcode::SELECT_DEVICE,
            Command::LowPower => opcode::LOW_POWER,
            Command::Reset => opcode::RESET,
            Command::Play => opcode::PLAY,
            Command::Pause => opcode::PAUSE,
            Command::PlayInFolder => opcode::PLAY_IN_FOLDER,
            Command::LoopAll => opcode::LOOP_ALL,
            Command::PlayFolderTrack => opcode::PLAY_FOLDER_TRACK,
            Command::Stop => opcode::STOP,
            Command::LoopFolder => opcode::LOOP_FOLDER,
            Command::Shuffle => opcode::SHUFFLE,
            Command::LoopTrack => opcode::LOOP_TRACK,
            Command::Dac => opcode::DAC,
            Command::QueryState => opcode::QUERY_STATE,
            Command::QueryVolume => opcode::QUERY_VOLUME,
            Command::QueryEqualizer => opcode::QUERY_EQUALIZER,
            Command::QueryUsbFileCount => opcode::QUERY_USB_FILES,
            Command::QuerySdFileCount => opcode::QUERY_SD_FILES,
            Command::QueryFlashFileCount => opcode::QUERY_FLASH_FILES,
            Command::QueryFolderFileCount => opcode::QUERY_FOLDER_FILES,
        }
    }

    /// Look up a command by opcode
    pub fn from_opcode(code: u8) -> Option<Self> {
        let command = match code {
            opcode::NEXT => Command::Next,
            opcode::PREVIOUS => Command::Previous,
            opcode::PLAY_TRACK => Command::PlayTrack,
            opcode::VOLUME_UP => Command::VolumeUp,
            opcode::VOLUME_DOWN => Command::VolumeDown,
            opcode::SET_VOLUME => Command::SetVolume,
            opcode::SET_EQUALIZER => Command::SetEqualizer,
            opcode::REPEAT_CURRENT => Command::RepeatCurrent,
            opcode::SELECT_DEVICE => Command::SelectDevice,
            opcode::LOW_POWER => Command::LowPower,
            opcode::RESET => Command::Reset,
            opcode::PLAY => Command::Play,
            opcode::PAUSE => Command::Pause,
            opcode::PLAY_IN_FOLDER => Command::PlayInFolder,
            opcode::LOOP_ALL => Command::LoopAll,
            opcode::PLAY_FOLDER_TRACK => Command::PlayFolderTrack,
            opcode::STOP => Command::Stop,
            opcode::LOOP_FOLDER => Command::LoopFolder,
            opcode::SHUFFLE => Command::Shuffle,
            opcode::LOOP_TRACK => Command::LoopTrack,
            opcode::DAC => Command::Dac,
            opcode::QUERY_STATE => Command::QueryState,
            opcode::QUERY_VOLUME => Command::QueryVolume,
            opcode::QUERY_EQUALIZER => Command::QueryEqualizer,
            opcode::QUERY_USB_FILES => Command::QueryUsbFileCount,
            opcode::QUERY_SD_FILES => Command::QuerySdFileCount,
            opcode::QUERY_FLASH_FILES => Command::QueryFlashFileCount,
            opcode::QUERY_FOLDER_FILES => Command::QueryFolderFileCount,
            _ => return None,
        };
        Some(command)
    }

    /// Width of the data word this command carries
    pub fn data_width(self) -> DataWidth {
        match self {
            Command::PlayTrack | Command::PlayInFolder | Command::PlayFolderTrack => {
                DataWidth::Word
            }
            Command::SetVolume
            | Command::SetEqualizer
            | Command::SelectDevice
            | Command::LoopAll
            | Command::LoopFolder
            | Command::LoopTrack
            | Command::Dac
            | Command::QueryFolderFileCount => DataWidth::Byte,
            _ => DataWidth::None,
        }
    }

    /// Whether the module answers this command with a response frame
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Command::QueryState
                | Command::QueryVolume
                | Command::QueryEqualizer
                | Command::QueryUsbFileCount
                | Command::QuerySdFileCount
                | Command::QueryFlashFileCount
                | Command::QueryFolderFileCount
        )
    }

    /// Time to wait after sending before the line may be used again
    pub fn settle_delay_ms(self) -> u32 {
        match self {
            Command::Reset => RESET_SETTLE_MS,
            Command::SelectDevice => SLOW_SETTLE_MS,
            c if c.is_query() => SLOW_SETTLE_MS,
            _ => DEFAULT_SETTLE_MS,
        }
    }

    /// File-count query for a storage device
    ///
    /// Only USB, SD and flash hold files; other devices have no query.
    pub fn file_count_query(device: Device) -> Option<Self> {
        match device {
            Device::Usb => Some(Command::QueryUsbFileCount),
            Device::Sd => Some(Command::QuerySdFileCount),
            Device::Flash => Some(Command::QueryFlashFileCount),
            Device::Aux | Device::Sleep => None,
        }
    }

    /// Encode this command with a data word
    ///
    /// Bits beyond the command's data width are dropped.
    pub fn encode(self, data: u16) -> [u8; TX_FRAME_SIZE] {
        encode(self.opcode(), self.data_width().mask(data))
    }
}
