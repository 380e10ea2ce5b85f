//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::Point;

/// Errors raised by the geometry primitives and token parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The two endpoints share neither (or both) axis values, so they do not
    /// describe an axis-aligned wall.
    #[error("segment {first} -> {second} is not axis-aligned")]
    InvalidGeometry { first: Point, second: Point },

    #[error("point {point} is outside the grid")]
    OutOfBounds { point: Point },

    #[error("unsupported direction {0:?}")]
    UnsupportedDirection(String),
}

/// Shorthand result type for `cr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
