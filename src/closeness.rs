//! Bound-independent closeness coordinate used as curve input
//!
//! Every curve is authored against the domain `[0, 10]`: 10 sits on the lower
//! bound of the tick window, 1 on the upper bound. Coordinates outside the
//! window fold back into `[0, 9]`.

use crate::error::{ConfigError, Result};

/// Upper end of the closeness domain
pub const CLOSENESS_MAX: f64 = 10.0;

/// Span covered by the window interior (`1..=10`)
const CLOSENESS_SPAN: f64 = 9.0;

/// Distance between two ticks, exact for any pair of `i64` values
#[inline]
pub fn tick_distance(a: i64, b: i64) -> u64 {
    a.abs_diff(b)
}

/// Maps `current` onto the closeness domain of the window `[lower, upper]`.
///
/// Fails with [`ConfigError::EqualBounds`] on a degenerate window.
pub fn compute_closeness(current: f64, lower: i64, upper: i64) -> Result<f64> {
    let total = tick_distance(upper, lower);
    if total == 0 {
        return Err(ConfigError::EqualBounds.into());
    }
    let total = total as f64;
    let (lower, upper) = (lower as f64, upper as f64);

    let closeness = if current > upper {
        1.0 - CLOSENESS_SPAN * ((current - upper).abs() / total).min(1.0)
    } else if current < lower {
        CLOSENESS_SPAN * ((lower - current).abs() / total).min(1.0)
    } else {
        1.0 + CLOSENESS_SPAN * ((current - upper).abs() / total)
    };
    Ok(closeness.abs().max(0.0))
}
