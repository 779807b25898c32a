//! KT403A player firmware
//!
//! Button-driven MP3 player for RP2040-based boards with a KT403A /
//! DFPlayer class module on UART0. Configuration comes from player.toml,
//! embedded at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{self, BufferedInterruptHandler, Uart};
use kt403a_hal::uart::{DataBits, Parity, StopBits};
use kt403a_hal::UartConfig;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::channels::PlayerCommand;
use crate::config::{parse_config, FirmwareConfig};

/// Embedded player configuration (compiled into firmware)
/// Edit player.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../player.toml");

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("KT403A player firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // UART0 for the KT403A (GPIO0 TX, GPIO1 RX)
    let line = UartConfig::default();

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, rp_uart_config(&line));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    info!("UART initialized: {:?}", line);

    // Buttons (active low, GPIO2-7)
    let buttons = [
        (Input::new(p.PIN_2, Pull::Up), PlayerCommand::PlayPause),
        (Input::new(p.PIN_3, Pull::Up), PlayerCommand::Next),
        (Input::new(p.PIN_4, Pull::Up), PlayerCommand::Previous),
        (Input::new(p.PIN_5, Pull::Up), PlayerCommand::VolumeUp),
        (Input::new(p.PIN_6, Pull::Up), PlayerCommand::VolumeDown),
        (Input::new(p.PIN_7, Pull::Up), PlayerCommand::Stop),
    ];

    // Spawn tasks
    spawner.spawn(tasks::player_task(uart, config)).unwrap();
    for (pin, command) in buttons {
        spawner.spawn(tasks::button_task(pin, command)).unwrap();
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Translate the module's line settings into an RP2040 UART config
fn rp_uart_config(line: &UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = line.baudrate;
    config.data_bits = match line.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match line.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match line.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}

/// Parse the embedded configuration
///
/// Falls back to defaults if player.toml cannot be parsed. build.rs
/// validates the file, so this only happens during development.
fn load_config() -> FirmwareConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            debug!("  device: {:?}", config.player.device);
            debug!("  volume: {:?}", config.player.volume);
            debug!("  equalizer: {:?}", config.player.equalizer);
            debug!("  poll interval: {}s", config.poll_interval_s);
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            FirmwareConfig::default()
        }
    }
}
