//! KT403A audio module driver
//!
//! Blocking driver for KT403A / DFPlayer class MP3 modules on a 9600 baud
//! serial line:
//!
//! - [`resolver`] - send/settle/drain discipline for commands and queries
//! - [`player`] - the [`Kt403a`] facade with typed playback operations
//! - [`volume`] - percent to module volume unit scaling
//! - [`config`] - start-up configuration
//!
//! Every operation is a fixed sequence: write a frame, wait the command's
//! settle delay, then for queries drain the receive buffer and keep the
//! most recent response. The driver owns the serial port for its whole
//! lifetime; callers that share it between tasks must serialize access.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod player;
pub mod resolver;
pub mod volume;

#[cfg(test)]
mod testing;

pub use config::PlayerConfig;
pub use error::Error;
pub use player::Kt403a;
pub use resolver::CommandLink;

pub use kt403a_protocol::{Device, Equalizer, PlaybackState};
