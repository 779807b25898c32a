//! KT403A Hardware Abstraction Layer
//!
//! This crate defines the transport boundary between the player driver and
//! the board. A board provides a serial line and a blocking delay; the
//! driver never touches pins or peripherals directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kt403a-driver (Kt403a facade)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kt403a-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   IoSerial    │       │ board-specific│
//! │ (embedded-io) │       │  SerialPort   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialPort`] - Byte-stream transport with non-blocking reads
//! - [`DelayNs`] - Blocking delay, re-exported from `embedded-hal`

#![no_std]
#![deny(unsafe_code)]

pub mod serial;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use serial::{IoSerial, SerialPort};
pub use uart::UartConfig;
