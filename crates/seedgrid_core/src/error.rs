//! # Grid Error Types
//!
//! All errors that can occur in the core storage.

use thiserror::Error;

/// Errors that can occur in volume or pool operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A box was given with its maximum below its minimum on some axis.
    #[error("inverted bounds on {axis} axis: min {min} exceeds max {max}")]
    InvertedBounds {
        /// The offending axis (`x`, `y` or `z`).
        axis: char,
        /// The requested minimum on that axis.
        min: i32,
        /// The requested maximum on that axis.
        max: i32,
    },

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core storage operations.
pub type GridResult<T> = Result<T, GridError>;
