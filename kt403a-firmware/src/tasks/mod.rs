//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod buttons;
pub mod player;

pub use buttons::button_task;
pub use player::player_task;
