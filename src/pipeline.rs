//! Post-processing stages applied to raw bin weights
//!
//! Stages run in a fixed order: [`reflect`], [`invert`], [`float_negative`],
//! [`scale_to_range`], then [`simplify`] and [`validate`] on the assembled
//! positions.

use crate::error::{CurveError, Result};
use crate::position::{Position, MAX_TICK, MAX_WEIGHT, MIN_TICK};
use tracing::{debug, warn};

/// Weights above this are rescaled, leaving headroom under [`MAX_WEIGHT`]
pub const SCALE_CEILING: u64 = 60_000;

/// Extra divisor headroom added on top of `ceil(max / SCALE_CEILING)`
const SCALE_SLACK: u64 = 2;

/// Mirrors weights across the bin-index axis; tick bounds stay put
pub fn reflect(weights: &mut [i64]) {
    weights.reverse();
}

/// Mirrors weights across the midline of their own range: `w -> (low + high) - w`
pub fn invert(weights: &mut [i64]) {
    let (Some(&low), Some(&high)) = (weights.iter().min(), weights.iter().max()) else {
        return;
    };
    for w in weights.iter_mut() {
        *w = low.saturating_add(high.saturating_sub(*w));
    }
}

/// Lifts every weight by `|min|` when the minimum is negative.
///
/// Relative shape is preserved; the result is non-negative by construction.
pub fn float_negative(weights: &[i64]) -> Vec<u64> {
    let min = weights.iter().copied().min().unwrap_or(0);
    let offset = if min < 0 { min } else { 0 };
    if offset < 0 {
        debug!(offset = offset.unsigned_abs(), "floating negative weights");
    }
    weights
        .iter()
        .map(|&w| w.saturating_sub(offset).max(0).unsigned_abs())
        .collect()
}

/// Divides all weights by `ceil(max / SCALE_CEILING) + 2` once `max` exceeds the ceiling.
///
/// Returns the divisor applied, if any. Integer division is monotone, so the
/// relative order of weights never flips.
pub fn scale_to_range(weights: &mut [u64]) -> Option<u64> {
    let max = weights.iter().copied().max()?;
    if max <= SCALE_CEILING {
        return None;
    }
    let divisor = max.div_ceil(SCALE_CEILING) + SCALE_SLACK;
    warn!(max, divisor, "weights exceed scale ceiling, rescaling");
    for w in weights.iter_mut() {
        *w /= divisor;
    }
    Some(divisor)
}

/// Merges runs of adjacent positions with identical weights.
///
/// The merged position spans the run and keeps the shared weight.
pub fn simplify(positions: Vec<Position>) -> Vec<Position> {
    let before = positions.len();
    let mut out: Vec<Position> = Vec::with_capacity(before);
    for p in positions {
        match out.last_mut() {
            Some(last) if last.weight == p.weight => last.end_tick = p.end_tick,
            _ => out.push(p),
        }
    }
    debug!(before, after = out.len(), "simplified equal-weight runs");
    out
}

/// Checks the outer ticks against the protocol bound and every weight against [`MAX_WEIGHT`]
pub fn validate(positions: &[Position]) -> Result<()> {
    if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
        if first.start_tick < MIN_TICK || last.end_tick > MAX_TICK {
            return Err(CurveError::Range { start: first.start_tick, end: last.end_tick });
        }
    }
    if let Some(p) = positions.iter().find(|p| p.weight > MAX_WEIGHT) {
        return Err(CurveError::Overflow { weight: p.weight });
    }
    Ok(())
}
