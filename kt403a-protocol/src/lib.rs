//! KT403A Serial Protocol
//!
//! This crate defines the UART protocol spoken by KT403A / DFPlayer class
//! audio modules. Commands and responses are short fixed-size frames; there
//! is no streaming payload.
//!
//! # Protocol Overview
//!
//! Commands sent to the module:
//! ```text
//! ┌───────┬─────────┬────────┬─────┬──────────┬───────┬────────┬──────┐
//! │ START │ VERSION │ LENGTH │ CMD │ FEEDBACK │ DATA  │ DATA   │ END  │
//! │ 0x7E  │ 0xFF    │ 0x06   │ 1B  │ 0x00     │ LOW   │ HIGH   │ 0xEF │
//! └───────┴─────────┴────────┴─────┴──────────┴───────┴────────┴──────┘
//! ```
//!
//! Responses received from the module are 10 bytes:
//! ```text
//! ┌───────┬─────────┬────────┬─────┬──────┬──────┬──────┬────┬────┬──────┐
//! │ 0x7E  │ 0xFF    │ 0x06   │ CMD │ FLAG │ HIGH │ LOW  │ -- │ -- │ 0xEF │
//! └───────┴─────────┴────────┴─────┴──────┴──────┴──────┴────┴────┴──────┘
//! ```
//!
//! Note the data byte order differs between the two directions. Both are
//! kept exactly as the module exhibits them.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod frame;
pub mod types;

pub use command::{Command, DataWidth};
pub use frame::{decode, encode, FrameError, Response, RESPONSE_FRAME_SIZE, TX_FRAME_SIZE};
pub use types::{Device, Equalizer, PlaybackState, UnknownName};
