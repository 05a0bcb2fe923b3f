//! Terminal "game renderer" module.
//!
//! A small rendering layer for playing in a terminal. It does not use a
//! widget toolkit: a [`GameView`] draws a [`core::GameSnapshot`] into a plain
//! framebuffer, and a [`TerminalRenderer`] flushes that framebuffer through
//! crossterm, rewriting only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tilt_blocks_core as core;
pub use tilt_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{block_color, AnchorY, BoardFrame, GameView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
