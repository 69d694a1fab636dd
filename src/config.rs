//! Flat JSON configuration blob

use crate::curves::{CurveConfig, CurveKind};
use crate::error::{ConfigError, Result};
use crate::generator::GenerationRequest;
use crate::optimizer::optimize;
use crate::position::Position;
use serde::Deserialize;
use serde_json::Value;

/// Shape used when the blob names none
pub const DEFAULT_SHAPE: &str = "Normalized";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    lower_bound: i64,
    upper_bound: i64,
    segment_width: i64,
    #[serde(default)]
    liquidity_shape: Option<String>,
    #[serde(default)]
    reflect: bool,
    #[serde(default)]
    invert: bool,
    #[serde(default)]
    bins: Option<usize>,
}

/// A parsed strategy configuration: one generation request plus an optional rebinning target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyConfig {
    /// What to generate
    pub request: GenerationRequest,
    /// Number of optimizer buckets, if rebinning is wanted
    pub bins: Option<usize>,
}

impl StrategyConfig {
    /// Parses a flat JSON object.
    ///
    /// Curve parameters sit next to the window fields; absent ones fall back to
    /// the per-curve defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Same as [`StrategyConfig::from_json`] for an already-decoded value
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ConfigError::Malformed("configuration must be a JSON object".into()).into());
        }
        let env: Envelope = serde_json::from_value(value.clone())?;
        let kind: CurveKind = env.liquidity_shape.as_deref().unwrap_or(DEFAULT_SHAPE).parse()?;
        let curve = CurveConfig::from_value(kind, value)?;
        let request = GenerationRequest {
            upper_bound: env.upper_bound,
            lower_bound: env.lower_bound,
            segment_width: env.segment_width,
            curve,
            reflect: env.reflect,
            invert: env.invert,
        };
        request.check()?;
        Ok(Self { request, bins: env.bins })
    }

    /// Generates positions and, when `bins` is set, rebins them
    pub fn run(&self) -> Result<Vec<Position>> {
        let positions = self.request.generate()?;
        match self.bins {
            Some(n) => optimize(&positions, n),
            None => Ok(positions),
        }
    }
}
