//! Curve-to-position generation

use crate::closeness::compute_closeness;
use crate::curves::{Curve, CurveConfig, Triangle, Wave};
use crate::error::{ConfigError, CurveError, Result};
use crate::pipeline;
use crate::position::{Position, MAX_TICK, MIN_TICK};
use tracing::debug;

/// Multiplier applied to curve output before truncation to an integer weight
pub const WEIGHT_SCALE: f64 = 100.0;

/// Closeness value the sigmoid is centred on
pub const SIGMOID_CENTER: f64 = 5.0;

/// Fixed triangle wave the generator evaluates, whatever the caller configured
const TRIANGLE_WAVE: Wave = Wave { amplitude: 1.0, period: 10.0, phase: 0.0 };

/// One generation call: window, bin width, curve and flip flags
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Exclusive end of the bin walk
    pub upper_bound: i64,
    /// First bin start
    pub lower_bound: i64,
    /// Width of every bin in ticks
    pub segment_width: i64,
    /// Curve shape and parameters
    pub curve: CurveConfig,
    /// Mirror weights left-to-right
    pub reflect: bool,
    /// Mirror weights top-to-bottom
    pub invert: bool,
}

impl GenerationRequest {
    /// A request with both flip flags cleared
    pub fn new(lower_bound: i64, upper_bound: i64, segment_width: i64, curve: CurveConfig) -> Self {
        Self { upper_bound, lower_bound, segment_width, curve, reflect: false, invert: false }
    }

    /// Rejects windows and widths the bin walk cannot handle
    pub fn check(&self) -> Result<()> {
        if self.upper_bound == self.lower_bound {
            return Err(ConfigError::EqualBounds.into());
        }
        if self.lower_bound > self.upper_bound {
            return Err(ConfigError::InvertedBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            }
            .into());
        }
        if self.segment_width <= 0 {
            return Err(ConfigError::InvalidSegmentWidth(self.segment_width).into());
        }
        Ok(())
    }

    /// Generates the validated position list for this request
    pub fn generate(&self) -> Result<Vec<Position>> {
        generate(self)
    }
}

/// The curve as actually sampled for one window.
///
/// Holds parameters derived from the window instead of rewriting the
/// caller's [`CurveConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingPlan {
    /// Curve with window-derived parameters applied
    pub curve: CurveConfig,
    /// Subtracted from the closeness before evaluation
    pub input_shift: f64,
    /// Take the absolute value of the curve output
    pub absolute: bool,
}

impl SamplingPlan {
    /// Derives the sampled curve for the window `[lower, upper]`
    pub fn derive(curve: &CurveConfig, lower: i64, upper: i64) -> Result<Self> {
        let mut plan = SamplingPlan { curve: *curve, input_shift: 0.0, absolute: false };
        match curve {
            CurveConfig::Normalized(normal) => {
                let midpoint = (lower as f64 + upper as f64) / 2.0;
                let mut derived = *normal;
                derived.mean = compute_closeness(midpoint, lower, upper)?;
                plan.curve = CurveConfig::Normalized(derived);
            }
            CurveConfig::Triangle(_) => {
                plan.curve = CurveConfig::Triangle(Triangle(TRIANGLE_WAVE));
                plan.absolute = true;
            }
            CurveConfig::Sigmoid(_) => plan.input_shift = SIGMOID_CENTER,
            _ => {}
        }
        Ok(plan)
    }

    /// Evaluates the plan at a closeness coordinate
    pub fn eval(&self, closeness: f64) -> f64 {
        let y = self.curve.eval(closeness - self.input_shift);
        if self.absolute { y.abs() } else { y }
    }
}

/// Converts a curve sample into a raw bin weight, truncating toward zero.
///
/// NaN maps to 0 and infinities saturate.
#[inline]
pub fn raw_weight(y: f64) -> i64 {
    (y * WEIGHT_SCALE) as i64
}

/// Bins `[start, start + width)` walked while `start < upper`.
///
/// The last bin keeps its full width even when it runs past `upper`.
pub fn bin_ranges(lower: i64, upper: i64, width: i64) -> Vec<(i64, i64)> {
    let mut bins = Vec::new();
    let mut start = lower;
    while start < upper {
        let end = start.saturating_add(width);
        bins.push((start, end));
        start = end;
    }
    bins
}

/// End tick of the last bin [`bin_ranges`] emits, saturating the same way.
///
/// Expects `lower < upper` and `width > 0`.
pub fn last_bin_end(lower: i64, upper: i64, width: i64) -> i64 {
    let bins = upper.abs_diff(lower).div_ceil(width.unsigned_abs());
    let end = i128::from(lower) + i128::from(bins) * i128::from(width);
    i64::try_from(end).unwrap_or(i64::MAX)
}

/// Runs the full curve-to-position pipeline for one request
pub fn generate(req: &GenerationRequest) -> Result<Vec<Position>> {
    req.check()?;
    // first start and last end are known before the walk
    let last_end = last_bin_end(req.lower_bound, req.upper_bound, req.segment_width);
    if req.lower_bound < MIN_TICK || last_end > MAX_TICK {
        return Err(CurveError::Range { start: req.lower_bound, end: last_end });
    }
    let plan = SamplingPlan::derive(&req.curve, req.lower_bound, req.upper_bound)?;
    let bins = bin_ranges(req.lower_bound, req.upper_bound, req.segment_width);

    let mut raw = Vec::with_capacity(bins.len());
    for &(start, end) in &bins {
        let midpoint = (start as f64 + end as f64) / 2.0;
        let closeness = compute_closeness(midpoint, req.lower_bound, req.upper_bound)?;
        raw.push(raw_weight(plan.eval(closeness)));
    }
    debug!(curve = req.curve.name(), bins = bins.len(), "sampled curve");

    if req.reflect {
        pipeline::reflect(&mut raw);
    }
    if req.invert {
        pipeline::invert(&mut raw);
    }
    let mut weights = pipeline::float_negative(&raw);
    pipeline::scale_to_range(&mut weights);

    let positions = bins
        .into_iter()
        .zip(weights)
        .map(|((start, end), weight)| Position::new(start, end, weight))
        .collect();
    let positions = pipeline::simplify(positions);
    pipeline::validate(&positions)?;
    Ok(positions)
}
