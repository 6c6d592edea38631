//! Construction-time error types.
//!
//! All failures are configuration failures: a malformed level map, a missing
//! head marker, bad reward keys. They surface when an `Environment` is built
//! and never afterward. At runtime every adverse outcome (collision, step
//! limit) is ordinary data on the `TimestepResult`, not an error.

use crate::core::CellType;
use thiserror::Error;

/// Fatal configuration error raised while building an environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The level map contains a character outside the symbol table.
    #[error("unknown level map symbol '{symbol}' at row {row}, column {col}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// 0-based row of the character.
        row: usize,
        /// 0-based column of the character.
        col: usize,
    },

    /// The level map is not a non-empty square of equal-length rows.
    #[error("malformed level map: {0}")]
    MalformedLevel(String),

    /// A required marker (an agent's initial head cell) is absent.
    #[error("initial marker '{}' not found on the level map", .0.symbol())]
    MissingMarker(CellType),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration JSON is malformed or missing required keys.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
