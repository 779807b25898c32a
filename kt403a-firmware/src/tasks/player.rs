//! KT403A player task
//!
//! Owns the driver and the UART. Applies commands from the button tasks
//! and polls the playback state while idle. The driver blocks for each
//! command's settle delay, so this task is the only user of the line.

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_time::{with_timeout, Delay, Duration, Timer};

use kt403a_driver::{Error, Kt403a};
use kt403a_hal::{IoSerial, SerialPort};

use crate::channels::{PlayerCommand, PLAYER_CHANNEL};
use crate::config::FirmwareConfig;

/// Time for the module to mount its storage after power-up
const POWER_UP_MS: u64 = 1500;

type Player = Kt403a<IoSerial<BufferedUart>, Delay>;

/// Player task - initializes the module and serves commands
#[embassy_executor::task]
pub async fn player_task(uart: BufferedUart, config: FirmwareConfig) {
    info!("Player task starting...");

    Timer::after(Duration::from_millis(POWER_UP_MS)).await;

    let mut player = match Kt403a::new(IoSerial::new(uart), Delay, config.player) {
        Ok(player) => player,
        Err(e) if e.is_init() => {
            error!("KT403A did not answer the state query - check wiring and storage");
            return;
        }
        Err(e) => {
            error!("KT403A init failed: {:?}", e);
            return;
        }
    };

    info!("KT403A initialized on {:?}", player.device());
    match player.current_files_count() {
        Ok(count) => info!("  {} files on {:?}", count, player.device()),
        Err(e) => warn!("File count query failed: {:?}", e),
    }

    let poll_interval = Duration::from_secs(u64::from(config.poll_interval_s));

    loop {
        match with_timeout(poll_interval, PLAYER_CHANNEL.receive()).await {
            Ok(command) => {
                if let Err(e) = apply_command(&mut player, command) {
                    warn!("Command {:?} failed: {:?}", command, e);
                }
            }
            Err(_) => match player.state() {
                Ok(Some(state)) => trace!("Playback state: {:?}", state),
                Ok(None) => trace!("Playback state unknown"),
                Err(e) => warn!("State poll failed: {:?}", e),
            },
        }
    }
}

/// Apply a single command to the player
fn apply_command(
    player: &mut Player,
    command: PlayerCommand,
) -> Result<(), Error<<IoSerial<BufferedUart> as SerialPort>::Error>> {
    debug!("Player command: {:?}", command);

    match command {
        PlayerCommand::PlayPause => {
            if player.is_playing()? {
                player.pause()
            } else {
                player.play()
            }
        }
        PlayerCommand::Next => player.next(),
        PlayerCommand::Previous => player.previous(),
        PlayerCommand::VolumeUp => player.volume_up(),
        PlayerCommand::VolumeDown => player.volume_down(),
        PlayerCommand::Stop => player.stop(),
    }
}
