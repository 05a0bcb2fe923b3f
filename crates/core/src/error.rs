//! Error types for the core crate.

use thiserror::Error;

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("block kinds must be in 1..={max}, got {kinds}")]
    InvalidBlockKinds { kinds: u8, max: u8 },

    #[error("invalid {var} value: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Failure of a byte store primitive
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("access of {len} bytes at {addr} exceeds store capacity {capacity}")]
    OutOfBounds {
        addr: usize,
        len: usize,
        capacity: usize,
    },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while saving or loading game state
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("save needs {required} bytes but the store holds {capacity}")]
    Capacity { required: usize, capacity: usize },

    #[error("saved game is corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
