use tickcurve::closeness::compute_closeness;
use tickcurve::config::{StrategyConfig, DEFAULT_SHAPE};
use tickcurve::curves::Curve;
use tickcurve::generator::SamplingPlan;
use tickcurve::plot::{plot_curve_shape, plot_weights_per_tick};
use tickcurve::position::{Position, TendArrays};
use tickcurve::verifier::verify_positions;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use std::fs::{create_dir_all, File};
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tickcurve",
    version,
    about = "Curve-shaped liquidity positions for concentrated-liquidity pools"
)]
struct Args {
    /// Flat JSON configuration; replaces the window/shape flags below
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value = DEFAULT_SHAPE)]
    shape: String,
    #[arg(long, default_value_t = -500, allow_negative_numbers = true)]
    lower_bound: i64,
    #[arg(long, default_value_t = 500, allow_negative_numbers = true)]
    upper_bound: i64,
    #[arg(long, default_value_t = 100)]
    segment_width: i64,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    reflect: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    invert: bool,

    /// Curve parameter as key=value (e.g. stdDev=1.5); repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Rebin the generated positions into this many weight buckets
    #[arg(long)]
    bins: Option<usize>,

    #[arg(long, default_value = "out")]
    out_dir: String,
    #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
    draw: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("TICKCURVE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_param(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("--param expects KEY=VALUE (got {})", raw))?;
    let number: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("--param {}: not a number", key))?;
    let number = serde_json::Number::from_f64(number)
        .ok_or_else(|| anyhow!("--param {}: value must be finite", key))?;
    Ok((key.trim().to_string(), Value::Number(number)))
}

fn config_from_args(args: &Args) -> Result<Value> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        return serde_json::from_str(&text).with_context(|| format!("parsing {}", path));
    }
    let mut blob = Map::new();
    blob.insert("lowerBound".into(), args.lower_bound.into());
    blob.insert("upperBound".into(), args.upper_bound.into());
    blob.insert("segmentWidth".into(), args.segment_width.into());
    blob.insert("liquidityShape".into(), args.shape.clone().into());
    blob.insert("reflect".into(), args.reflect.into());
    blob.insert("invert".into(), args.invert.into());
    if let Some(n) = args.bins {
        blob.insert("bins".into(), n.into());
    }
    for raw in &args.params {
        let (key, value) = parse_param(raw)?;
        blob.insert(key, value);
    }
    Ok(Value::Object(blob))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let blob = config_from_args(&args)?;
    let cfg = StrategyConfig::from_value(&blob)?;
    let req = cfg.request;
    info!(
        shape = %req.curve.kind(),
        lower = req.lower_bound,
        upper = req.upper_bound,
        width = req.segment_width,
        reflect = req.reflect,
        invert = req.invert,
        "generating positions"
    );

    let generated = req.generate()?;
    let rep = verify_positions(&generated, req.segment_width)?;
    info!(
        positions = rep.positions,
        weight_sum = rep.weight_sum,
        weight_max = rep.weight_max,
        span = rep.span,
        "generated"
    );
    debug!(max_gap = rep.max_gap, non_increasing = rep.non_increasing, "verified");

    let positions = match cfg.bins {
        Some(n) => {
            let merged = tickcurve::optimize(&generated, n)?;
            info!(requested = n, buckets = merged.len(), "rebinned");
            merged
        }
        None => generated.clone(),
    };

    create_dir_all(&args.out_dir)?;
    write_positions_csv(&args.out_dir, &cfg, &positions)?;
    write_tend_json(&args.out_dir, &positions)?;

    if args.draw {
        plot_weights_per_tick(&generated, &format!("{}/weights_per_tick.png", &args.out_dir))?;
        let plan = SamplingPlan::derive(&req.curve, req.lower_bound, req.upper_bound)?;
        plot_curve_shape(&plan.curve, &format!("{}/curve_shape.png", &args.out_dir))?;
    }
    Ok(())
}

fn write_positions_csv(out_dir: &str, cfg: &StrategyConfig, positions: &[Position]) -> Result<()> {
    let req = &cfg.request;
    let file_path = format!("{}/positions.csv", out_dir);
    let mut file = File::create(&file_path)?;

    // Write metadata header
    writeln!(file, "# Liquidity Positions")?;
    writeln!(file, "# Shape: {}", req.curve.name())?;
    writeln!(
        file,
        "# Window: [{}, {}) width {}",
        req.lower_bound, req.upper_bound, req.segment_width
    )?;
    writeln!(file, "# Reflect: {}, Invert: {}", req.reflect, req.invert)?;
    if let Some(n) = cfg.bins {
        writeln!(file, "# Rebinned into {} weight buckets", n)?;
    }
    let mid = (req.lower_bound as f64 + req.upper_bound as f64) / 2.0;
    writeln!(
        file,
        "# Closeness at window midpoint: {:.4}",
        compute_closeness(mid, req.lower_bound, req.upper_bound)?
    )?;
    writeln!(file)?;

    // Create CSV writer from the file
    let mut wtr = csv::Writer::from_writer(file);
    for p in positions {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_tend_json(out_dir: &str, positions: &[Position]) -> Result<()> {
    let arrays = TendArrays::from(positions);
    let file = File::create(format!("{}/tend.json", out_dir))?;
    serde_json::to_writer_pretty(file, &arrays)?;
    Ok(())
}
