//! Error taxonomy for position generation

use thiserror::Error;

/// Invalid input, detected before any bin is produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The closeness window collapses to a point
    #[error("bounds cannot be equal")]
    EqualBounds,
    /// `liquidityShape` names no known curve
    #[error("unsupported curve kind: {0}")]
    UnsupportedCurve(String),
    /// Bin width must be strictly positive
    #[error("segment width must be > 0 (got {0})")]
    InvalidSegmentWidth(i64),
    /// Lower bound sits above the upper bound
    #[error("lower bound {lower} must not exceed upper bound {upper}")]
    InvertedBounds {
        /// Requested lower bound
        lower: i64,
        /// Requested upper bound
        upper: i64,
    },
    /// Optimizer target outside `1..=positions.len()`
    #[error("bin count must be in 1..={available} (got {requested})")]
    InvalidBinCount {
        /// Requested number of output bins
        requested: usize,
        /// Number of positions available to merge
        available: usize,
    },
    /// The JSON blob could not be decoded
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Any failure of a generation or optimization call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Configuration rejected up front
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// First or last position falls outside the protocol tick bound
    #[error("position ticks out of range: [{start}, {end})")]
    Range {
        /// Start tick of the first position
        start: i64,
        /// End tick of the last position
        end: i64,
    },
    /// A weight survived rescaling above the representable maximum
    #[error("position weight overflow: {weight}")]
    Overflow {
        /// Offending weight
        weight: u64,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        CurveError::Config(err.into())
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, CurveError>;
