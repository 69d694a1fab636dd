//! Visualization utilities for generating charts

use crate::closeness::CLOSENESS_MAX;
use crate::curves::Curve;
use crate::position::Position;
use anyhow::{anyhow, Result};
use plotters::prelude::*;

/// Draws the weight of every position as a step line over ticks
pub fn plot_weights_per_tick(positions: &[Position], out_path: &str) -> Result<()> {
    let first = positions.first().ok_or_else(|| anyhow!("nothing to plot"))?;
    let last = positions.last().ok_or_else(|| anyhow!("nothing to plot"))?;
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut data: Vec<(f64, f64)> = Vec::with_capacity(2 * positions.len());
    for p in positions {
        data.push((p.start_tick as f64, p.weight as f64));
        data.push((p.end_tick as f64, p.weight as f64)); // step
    }
    let x_min = first.start_tick as f64;
    let x_max = (last.end_tick as f64).max(x_min + 1.0);
    let y_max = data.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Liquidity Weight per Tick", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(data, &BLACK))?;
    root.present()?;
    Ok(())
}

/// Draws the raw curve shape over the closeness domain `[0, 10]`
pub fn plot_curve_shape<C: Curve>(c: &C, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let pts: Vec<(f64, f64)> = c
        .sample(0.0, CLOSENESS_MAX, 500)
        .into_iter()
        .filter(|(_, y)| y.is_finite())
        .collect();
    let y_min = pts.iter().map(|(_, y)| *y).fold(0.0, f64::min);
    let y_max = pts.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(y_min + 1e-12);
    let pad = (y_max - y_min) * 0.05;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("{} over closeness", c.name()), ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..CLOSENESS_MAX, (y_min - pad)..(y_max + pad))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(pts, &BLACK))?;
    root.present()?;
    Ok(())
}
