#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for tickcurve.
//!
//! Turns a parametric curve into a list of weighted tick ranges for a
//! concentrated-liquidity pool: bins are sampled over a normalized closeness
//! domain, post-processed into small integer weights and validated against
//! protocol bounds.
//!
//! # Modules
//! - [`curves`]: Parametric shapes and the curve selector
//! - [`closeness`]: Tick window to closeness transform
//! - [`generator`]: Bin walk and curve sampling
//! - [`pipeline`]: Weight post-processing stages
//! - [`optimizer`]: Weight-sorted rebinning
//! - [`config`]: Flat JSON configuration
//! - [`verifier`]: Structural checks on generated positions
//! - [`plot`]: Visualization (optional in binaries)

/// Parametric curve shapes and the tagged curve configuration
pub mod curves;

/// Closeness transform over a tick window
pub mod closeness;

/// Error taxonomy
pub mod error;

/// Positions and their parallel-array form
pub mod position;

/// Weight post-processing stages
pub mod pipeline;

/// Curve-to-position generation
pub mod generator;

/// Rebinning of generated positions
pub mod optimizer;

/// JSON configuration parsing
pub mod config;

/// Verification tools for generated position lists
pub mod verifier;

/// Visualization utilities for generating charts
pub mod plot;

pub use config::StrategyConfig;
pub use curves::{Curve, CurveConfig, CurveKind};
pub use error::{ConfigError, CurveError, Result};
pub use generator::{generate, GenerationRequest};
pub use optimizer::optimize;
pub use position::{Position, TendArrays};
