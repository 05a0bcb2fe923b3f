//! Tilt Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates as `tilt_blocks::{core,input,term,types}`
//! and hosts the command-line layer shared by the binary and its tests.

pub mod cli;

pub use tilt_blocks_core as core;
pub use tilt_blocks_input as input;
pub use tilt_blocks_term as term;
pub use tilt_blocks_types as types;
