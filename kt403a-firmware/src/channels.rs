//! Inter-task communication channels
//!
//! Button tasks feed player commands to the single task that owns the
//! KT403A driver, which keeps every exchange on the serial line in order.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for player commands
const PLAYER_CHANNEL_SIZE: usize = 8;

/// Commands accepted by the player task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerCommand {
    /// Pause if playing, otherwise play
    PlayPause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    Stop,
}

/// Commands from the button tasks to the player task
pub static PLAYER_CHANNEL: Channel<CriticalSectionRawMutex, PlayerCommand, PLAYER_CHANNEL_SIZE> =
    Channel::new();
