//! Weighted tick ranges and their parallel-array form

use serde::Serialize;

/// Lowest tick a position may start at
pub const MIN_TICK: i64 = -887_272;
/// Highest tick a position may end at
pub const MAX_TICK: i64 = 887_272;
/// Largest weight representable by the liquidity manager (uint16)
pub const MAX_WEIGHT: u64 = u16::MAX as u64;

/// A `[start_tick, end_tick)` range with a relative liquidity share
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Inclusive lower tick
    pub start_tick: i64,
    /// Exclusive upper tick
    pub end_tick: i64,
    /// Relative liquidity weight
    pub weight: u64,
}

impl Position {
    /// Creates a position
    pub fn new(start_tick: i64, end_tick: i64, weight: u64) -> Self {
        Self { start_tick, end_tick, weight }
    }
}

/// Positions split into the three parallel arrays a liquidity manager consumes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TendArrays {
    /// Start tick of each position
    pub lower_ticks: Vec<i64>,
    /// End tick of each position
    pub upper_ticks: Vec<i64>,
    /// Weight of each position
    pub weights: Vec<u64>,
}

impl From<&[Position]> for TendArrays {
    fn from(positions: &[Position]) -> Self {
        let mut out = TendArrays {
            lower_ticks: Vec::with_capacity(positions.len()),
            upper_ticks: Vec::with_capacity(positions.len()),
            weights: Vec::with_capacity(positions.len()),
        };
        for p in positions {
            out.lower_ticks.push(p.start_tick);
            out.upper_ticks.push(p.end_tick);
            out.weights.push(p.weight);
        }
        out
    }
}
