//! Error types for ctc-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid product id: {0}")]
    InvalidProduct(String),

    #[error("Invalid roll {roll} for {dice_sides}-sided dice")]
    InvalidRoll { roll: u32, dice_sides: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
