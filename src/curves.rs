//! Parametric curve shapes evaluated over the closeness domain

use crate::error::ConfigError;
use serde::Deserialize;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// A real-valued shape `y = f(x)` sampled by the position generator
pub trait Curve {
    /// Returns the name/type of this curve implementation
    fn name(&self) -> &'static str;

    /// Evaluates the curve at `x`
    fn eval(&self, x: f64) -> f64;

    /// Samples `n + 1` evenly spaced points over `[lo, hi]`
    fn sample(&self, lo: f64, hi: f64, n: usize) -> Vec<(f64, f64)> {
        let n = n.max(1);
        let step = (hi - lo) / n as f64;
        (0..=n)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.eval(x))
            })
            .collect()
    }
}

/// Remainder of `t / period` folded into `[0, period)`
#[inline]
fn positive_mod(t: f64, period: f64) -> f64 {
    let r = t % period;
    if r < 0.0 { r + period } else { r }
}

/// Constant curve: y = 1
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Basic;
impl Curve for Basic {
    fn name(&self) -> &'static str { "Basic" }
    fn eval(&self, _x: f64) -> f64 { 1.0 }
}

/// Identity curve: y = x
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Linear;
impl Curve for Linear {
    fn name(&self) -> &'static str { "Linear" }
    fn eval(&self, x: f64) -> f64 { x }
}

/// Gaussian density: y = exp(-(x-μ)²/(2σ²)) / (σ√(2π))
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Normal {
    /// Centre μ; the generator re-derives it from the tick window
    pub mean: f64,
    /// Standard deviation σ
    pub std_dev: f64,
}
impl Default for Normal {
    fn default() -> Self { Self { mean: 5.0, std_dev: 2.0 } }
}
impl Curve for Normal {
    fn name(&self) -> &'static str { "Normalized" }
    fn eval(&self, x: f64) -> f64 {
        let num = (-(x - self.mean).powi(2) / (2.0 * self.std_dev * self.std_dev)).exp();
        num / (self.std_dev * (2.0 * PI).sqrt())
    }
}

/// Centred logistic: y = 1/(1+exp(-k·x))
///
/// The generator shifts its input so the inflection lands mid-window.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sigmoid {
    /// Steepness
    pub k: f64,
}
impl Default for Sigmoid {
    fn default() -> Self { Self { k: 1.0 } }
}
impl Curve for Sigmoid {
    fn name(&self) -> &'static str { "Sigmoid" }
    fn eval(&self, x: f64) -> f64 { 1.0 / (1.0 + (-self.k * x).exp()) }
}

/// y = exp(-rate·x)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExponentialDecay {
    /// Decay rate
    pub rate: f64,
}
impl Default for ExponentialDecay {
    fn default() -> Self { Self { rate: 0.5 } }
}
impl Curve for ExponentialDecay {
    fn name(&self) -> &'static str { "ExponentialDecay" }
    fn eval(&self, x: f64) -> f64 { (-self.rate * x).exp() }
}

/// y = exp(rate·x)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExponentialGrowth {
    /// Growth rate
    pub rate: f64,
}
impl Default for ExponentialGrowth {
    fn default() -> Self { Self { rate: 0.5 } }
}
impl Curve for ExponentialGrowth {
    fn name(&self) -> &'static str { "ExponentialGrowth" }
    fn eval(&self, x: f64) -> f64 { (self.rate * x).exp() }
}

/// y = log_base(x), extended to x ≤ 0 through the real part of the complex log
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Logarithmic {
    /// Logarithm base
    pub base: f64,
}
impl Default for Logarithmic {
    fn default() -> Self { Self { base: 10.0 } }
}
impl Curve for Logarithmic {
    fn name(&self) -> &'static str { "Logarithmic" }
    fn eval(&self, x: f64) -> f64 {
        let ln_base = self.base.ln();
        if x > 0.0 {
            x.ln() / ln_base
        } else if x == 0.0 {
            0.0
        } else {
            x.abs().ln() / ln_base + (0.0_f64.atan2(x) / (2.0 * PI)) * ln_base
        }
    }
}

/// y = base^(-rate·x)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogarithmicDecay {
    /// Base of the power
    pub base: f64,
    /// Exponent scale
    pub rate: f64,
}
impl Default for LogarithmicDecay {
    fn default() -> Self { Self { base: 2.0, rate: 0.5 } }
}
impl Curve for LogarithmicDecay {
    fn name(&self) -> &'static str { "LogarithmicDecay" }
    fn eval(&self, x: f64) -> f64 { self.base.powf(-self.rate * x) }
}

/// y = x^exponent
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerLaw {
    /// Exponent
    pub exponent: f64,
}
impl Default for PowerLaw {
    fn default() -> Self { Self { exponent: 2.0 } }
}
impl Curve for PowerLaw {
    fn name(&self) -> &'static str { "PowerLaw" }
    fn eval(&self, x: f64) -> f64 { x.powf(self.exponent) }
}

/// y = 0 below the threshold, 1 from it on
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step {
    /// Switch point
    pub threshold: f64,
}
impl Default for Step {
    fn default() -> Self { Self { threshold: 5.0 } }
}
impl Curve for Step {
    fn name(&self) -> &'static str { "Step" }
    fn eval(&self, x: f64) -> f64 { if x < self.threshold { 0.0 } else { 1.0 } }
}

/// y = A·sin(2π·f·x + φ)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sine {
    /// Peak amplitude A
    pub amplitude: f64,
    /// Cycles per closeness unit
    pub frequency: f64,
    /// Phase offset φ in radians
    pub phase: f64,
}
impl Default for Sine {
    fn default() -> Self { Self { amplitude: 1.0, frequency: 1.0, phase: 0.0 } }
}
impl Curve for Sine {
    fn name(&self) -> &'static str { "Sine" }
    fn eval(&self, x: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * x + self.phase).sin()
    }
}

/// Shared parameters of the periodic waveforms (triangle, sawtooth, square)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wave {
    /// Peak amplitude
    pub amplitude: f64,
    /// Period length in closeness units
    pub period: f64,
    /// Horizontal shift
    pub phase: f64,
}
impl Default for Wave {
    fn default() -> Self { Self { amplitude: 1.0, period: 10.0, phase: 0.0 } }
}

/// Triangle wave rising from `-A` at each period start to `0` mid-period
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Triangle(pub Wave);
impl Curve for Triangle {
    fn name(&self) -> &'static str { "Triangle" }
    fn eval(&self, x: f64) -> f64 {
        let Wave { amplitude, period, phase } = self.0;
        let t = positive_mod(x - phase, period);
        (2.0 * amplitude / period) * (period / 2.0 - (t - period / 2.0).abs()) - amplitude
    }
}

/// Rising ramp in `[-A, A)` that resets every period
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Sawtooth(pub Wave);
impl Curve for Sawtooth {
    fn name(&self) -> &'static str { "Sawtooth" }
    fn eval(&self, x: f64) -> f64 {
        let Wave { amplitude, period, phase } = self.0;
        (2.0 * amplitude / period) * positive_mod(x - phase, period) - amplitude
    }
}

/// ±A depending on the sign of the underlying sine
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SquareWave(pub Wave);
impl Curve for SquareWave {
    fn name(&self) -> &'static str { "SquareWave" }
    fn eval(&self, x: f64) -> f64 {
        let Wave { amplitude, period, phase } = self.0;
        if (2.0 * PI * (x + phase) / period).sin() >= 0.0 { amplitude } else { -amplitude }
    }
}

/// y = a·x² + b·x + c
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quadratic {
    /// Quadratic coefficient
    pub a: f64,
    /// Linear coefficient
    pub b: f64,
    /// Constant term
    pub c: f64,
}
impl Default for Quadratic {
    fn default() -> Self { Self { a: 1.0, b: 0.0, c: 0.0 } }
}
impl Curve for Quadratic {
    fn name(&self) -> &'static str { "Quadratic" }
    fn eval(&self, x: f64) -> f64 { self.a * x * x + self.b * x + self.c }
}

/// y = a·x³ + b·x² + c·x + d
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cubic {
    /// Cubic coefficient
    pub a: f64,
    /// Quadratic coefficient
    pub b: f64,
    /// Linear coefficient
    pub c: f64,
    /// Constant term
    pub d: f64,
}
impl Default for Cubic {
    fn default() -> Self { Self { a: 1.0, b: 0.0, c: 0.0, d: 0.0 } }
}
impl Curve for Cubic {
    fn name(&self) -> &'static str { "Cubic" }
    fn eval(&self, x: f64) -> f64 {
        self.a * x.powi(3) + self.b * x.powi(2) + self.c * x + self.d
    }
}

/// Curve selector without parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Constant
    Basic,
    /// Identity
    Linear,
    /// Gaussian density
    Normalized,
    /// Logistic
    Sigmoid,
    /// exp(-rate·x)
    ExponentialDecay,
    /// log_base(x)
    Logarithmic,
    /// x^exponent
    PowerLaw,
    /// 0/1 threshold
    Step,
    /// Sine wave
    Sine,
    /// Triangle wave
    Triangle,
    /// Second-degree polynomial
    Quadratic,
    /// Third-degree polynomial
    Cubic,
    /// exp(rate·x)
    ExponentialGrowth,
    /// base^(-rate·x)
    LogarithmicDecay,
    /// Sawtooth wave
    Sawtooth,
    /// Square wave
    SquareWave,
}

impl CurveKind {
    /// Every supported kind, in declaration order
    pub const ALL: [CurveKind; 16] = [
        CurveKind::Basic,
        CurveKind::Linear,
        CurveKind::Normalized,
        CurveKind::Sigmoid,
        CurveKind::ExponentialDecay,
        CurveKind::Logarithmic,
        CurveKind::PowerLaw,
        CurveKind::Step,
        CurveKind::Sine,
        CurveKind::Triangle,
        CurveKind::Quadratic,
        CurveKind::Cubic,
        CurveKind::ExponentialGrowth,
        CurveKind::LogarithmicDecay,
        CurveKind::Sawtooth,
        CurveKind::SquareWave,
    ];

    /// Configuration name of this kind (the `liquidityShape` value)
    pub fn as_str(self) -> &'static str {
        match self {
            CurveKind::Basic => "Basic",
            CurveKind::Linear => "Linear",
            CurveKind::Normalized => "Normalized",
            CurveKind::Sigmoid => "Sigmoid",
            CurveKind::ExponentialDecay => "ExponentialDecay",
            CurveKind::Logarithmic => "Logarithmic",
            CurveKind::PowerLaw => "PowerLaw",
            CurveKind::Step => "Step",
            CurveKind::Sine => "Sine",
            CurveKind::Triangle => "Triangle",
            CurveKind::Quadratic => "Quadratic",
            CurveKind::Cubic => "Cubic",
            CurveKind::ExponentialGrowth => "ExponentialGrowth",
            CurveKind::LogarithmicDecay => "LogarithmicDecay",
            CurveKind::Sawtooth => "Sawtooth",
            CurveKind::SquareWave => "SquareWave",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for CurveKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Absolute" is the strategy-side name for the flat shape
        if s == "Absolute" {
            return Ok(CurveKind::Basic);
        }
        CurveKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedCurve(s.to_string()))
    }
}

/// A curve kind together with its parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveConfig {
    /// y = 1
    Basic,
    /// y = x
    Linear,
    /// Gaussian density
    Normalized(Normal),
    /// Logistic
    Sigmoid(Sigmoid),
    /// Exponential decay
    ExponentialDecay(ExponentialDecay),
    /// Logarithm
    Logarithmic(Logarithmic),
    /// Power law
    PowerLaw(PowerLaw),
    /// Step function
    Step(Step),
    /// Sine wave
    Sine(Sine),
    /// Triangle wave
    Triangle(Triangle),
    /// Quadratic polynomial
    Quadratic(Quadratic),
    /// Cubic polynomial
    Cubic(Cubic),
    /// Exponential growth
    ExponentialGrowth(ExponentialGrowth),
    /// Base-power decay
    LogarithmicDecay(LogarithmicDecay),
    /// Sawtooth wave
    Sawtooth(Sawtooth),
    /// Square wave
    SquareWave(SquareWave),
}

impl CurveConfig {
    /// Builds a config of the given kind with its default parameters
    pub fn default_for(kind: CurveKind) -> Self {
        match kind {
            CurveKind::Basic => CurveConfig::Basic,
            CurveKind::Linear => CurveConfig::Linear,
            CurveKind::Normalized => CurveConfig::Normalized(Normal::default()),
            CurveKind::Sigmoid => CurveConfig::Sigmoid(Sigmoid::default()),
            CurveKind::ExponentialDecay => CurveConfig::ExponentialDecay(ExponentialDecay::default()),
            CurveKind::Logarithmic => CurveConfig::Logarithmic(Logarithmic::default()),
            CurveKind::PowerLaw => CurveConfig::PowerLaw(PowerLaw::default()),
            CurveKind::Step => CurveConfig::Step(Step::default()),
            CurveKind::Sine => CurveConfig::Sine(Sine::default()),
            CurveKind::Triangle => CurveConfig::Triangle(Triangle::default()),
            CurveKind::Quadratic => CurveConfig::Quadratic(Quadratic::default()),
            CurveKind::Cubic => CurveConfig::Cubic(Cubic::default()),
            CurveKind::ExponentialGrowth => CurveConfig::ExponentialGrowth(ExponentialGrowth::default()),
            CurveKind::LogarithmicDecay => CurveConfig::LogarithmicDecay(LogarithmicDecay::default()),
            CurveKind::Sawtooth => CurveConfig::Sawtooth(Sawtooth::default()),
            CurveKind::SquareWave => CurveConfig::SquareWave(SquareWave::default()),
        }
    }

    /// Reads the parameters of `kind` out of a flat JSON object.
    ///
    /// Keys the curve does not use are ignored; missing keys take the curve defaults.
    pub fn from_value(kind: CurveKind, value: &serde_json::Value) -> Result<Self, ConfigError> {
        use serde_json::from_value as params;
        let v = value.clone();
        Ok(match kind {
            CurveKind::Basic => CurveConfig::Basic,
            CurveKind::Linear => CurveConfig::Linear,
            CurveKind::Normalized => CurveConfig::Normalized(params(v)?),
            CurveKind::Sigmoid => CurveConfig::Sigmoid(params(v)?),
            CurveKind::ExponentialDecay => CurveConfig::ExponentialDecay(params(v)?),
            CurveKind::Logarithmic => CurveConfig::Logarithmic(params(v)?),
            CurveKind::PowerLaw => CurveConfig::PowerLaw(params(v)?),
            CurveKind::Step => CurveConfig::Step(params(v)?),
            CurveKind::Sine => CurveConfig::Sine(params(v)?),
            CurveKind::Triangle => CurveConfig::Triangle(params(v)?),
            CurveKind::Quadratic => CurveConfig::Quadratic(params(v)?),
            CurveKind::Cubic => CurveConfig::Cubic(params(v)?),
            CurveKind::ExponentialGrowth => CurveConfig::ExponentialGrowth(params(v)?),
            CurveKind::LogarithmicDecay => CurveConfig::LogarithmicDecay(params(v)?),
            CurveKind::Sawtooth => CurveConfig::Sawtooth(params(v)?),
            CurveKind::SquareWave => CurveConfig::SquareWave(params(v)?),
        })
    }

    /// The parameterless tag of this config
    pub fn kind(&self) -> CurveKind {
        match self {
            CurveConfig::Basic => CurveKind::Basic,
            CurveConfig::Linear => CurveKind::Linear,
            CurveConfig::Normalized(_) => CurveKind::Normalized,
            CurveConfig::Sigmoid(_) => CurveKind::Sigmoid,
            CurveConfig::ExponentialDecay(_) => CurveKind::ExponentialDecay,
            CurveConfig::Logarithmic(_) => CurveKind::Logarithmic,
            CurveConfig::PowerLaw(_) => CurveKind::PowerLaw,
            CurveConfig::Step(_) => CurveKind::Step,
            CurveConfig::Sine(_) => CurveKind::Sine,
            CurveConfig::Triangle(_) => CurveKind::Triangle,
            CurveConfig::Quadratic(_) => CurveKind::Quadratic,
            CurveConfig::Cubic(_) => CurveKind::Cubic,
            CurveConfig::ExponentialGrowth(_) => CurveKind::ExponentialGrowth,
            CurveConfig::LogarithmicDecay(_) => CurveKind::LogarithmicDecay,
            CurveConfig::Sawtooth(_) => CurveKind::Sawtooth,
            CurveConfig::SquareWave(_) => CurveKind::SquareWave,
        }
    }

    fn as_curve(&self) -> &dyn Curve {
        match self {
            CurveConfig::Basic => &Basic,
            CurveConfig::Linear => &Linear,
            CurveConfig::Normalized(c) => c,
            CurveConfig::Sigmoid(c) => c,
            CurveConfig::ExponentialDecay(c) => c,
            CurveConfig::Logarithmic(c) => c,
            CurveConfig::PowerLaw(c) => c,
            CurveConfig::Step(c) => c,
            CurveConfig::Sine(c) => c,
            CurveConfig::Triangle(c) => c,
            CurveConfig::Quadratic(c) => c,
            CurveConfig::Cubic(c) => c,
            CurveConfig::ExponentialGrowth(c) => c,
            CurveConfig::LogarithmicDecay(c) => c,
            CurveConfig::Sawtooth(c) => c,
            CurveConfig::SquareWave(c) => c,
        }
    }
}

impl Default for CurveConfig {
    fn default() -> Self { CurveConfig::default_for(CurveKind::Normalized) }
}

impl Curve for CurveConfig {
    fn name(&self) -> &'static str { self.as_curve().name() }
    fn eval(&self, x: f64) -> f64 { self.as_curve().eval(x) }
}
