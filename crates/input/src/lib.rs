//! Input module (engine-facing).
//!
//! Turns raw input into the intents the core understands: `crossterm` key
//! events into [`crate::types::GameAction`], and accelerometer samples into
//! two-axis [`crate::types::MoveIntent`]s. No game state lives here.

pub mod map;
pub mod tilt;

pub use tilt_blocks_types as types;

pub use map::{handle_key_event, should_quit};
pub use tilt::{tilt_to_intent, MoveThrottle, TiltSample};
