//! Button input task
//!
//! One task instance per button. Buttons are active-low with pull-ups.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use crate::channels::{PlayerCommand, PLAYER_CHANNEL};

/// Debounce time after a falling edge
const DEBOUNCE_MS: u64 = 20;

/// Number of buttons on the board
pub const BUTTON_COUNT: usize = 6;

/// Button task - sends `command` on every debounced press
#[embassy_executor::task(pool_size = BUTTON_COUNT)]
pub async fn button_task(mut pin: Input<'static>, command: PlayerCommand) {
    debug!("Button task started for {:?}", command);

    loop {
        pin.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        if pin.is_low() {
            trace!("Button pressed: {:?}", command);
            if PLAYER_CHANNEL.try_send(command).is_err() {
                warn!("Player channel full, dropping {:?}", command);
            }
        }

        pin.wait_for_high().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    }
}
