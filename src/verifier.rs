//! Structural checks over a generated position list

use crate::position::{Position, MAX_TICK, MAX_WEIGHT, MIN_TICK};
use anyhow::{anyhow, Result};

/// Verification report for one position list
#[derive(Debug)]
pub struct Report {
    /// Number of positions checked
    pub positions: usize,
    /// Sum of all weights
    pub weight_sum: u64,
    /// Largest weight seen
    pub weight_max: u64,
    /// Widest gap between one position's end and the next one's start
    pub max_gap: u64,
    /// Ticks covered from first start to last end
    pub span: u64,
    /// Whether consecutive weights never increase
    pub non_increasing: bool,
}

/// Checks ordering, overlap, gap size, tick bounds and weight cap.
///
/// Gaps between consecutive positions may not exceed `segment_width`.
pub fn verify_positions(positions: &[Position], segment_width: i64) -> Result<Report> {
    let first = positions.first().ok_or_else(|| anyhow!("no positions"))?;
    let last = positions.last().ok_or_else(|| anyhow!("no positions"))?;
    if first.start_tick < MIN_TICK || last.end_tick > MAX_TICK {
        return Err(anyhow!(
            "ticks [{}, {}) outside [{}, {}]",
            first.start_tick,
            last.end_tick,
            MIN_TICK,
            MAX_TICK
        ));
    }

    let mut weight_sum = 0u64;
    let mut weight_max = 0u64;
    let mut max_gap = 0u64;
    let mut non_increasing = true;

    for (i, p) in positions.iter().enumerate() {
        if p.start_tick >= p.end_tick {
            return Err(anyhow!("position {} is empty: [{}, {})", i, p.start_tick, p.end_tick));
        }
        if p.weight > MAX_WEIGHT {
            return Err(anyhow!("position {} weight {} > {}", i, p.weight, MAX_WEIGHT));
        }
        weight_sum = weight_sum.saturating_add(p.weight);
        weight_max = weight_max.max(p.weight);

        if let Some(prev) = i.checked_sub(1).map(|j| positions[j]) {
            if p.start_tick < prev.end_tick {
                return Err(anyhow!("position {} overlaps its predecessor", i));
            }
            let gap = p.start_tick.abs_diff(prev.end_tick);
            if gap > segment_width.unsigned_abs() {
                return Err(anyhow!("gap of {} ticks before position {}", gap, i));
            }
            max_gap = max_gap.max(gap);
            if p.weight > prev.weight {
                non_increasing = false;
            }
        }
    }

    Ok(Report {
        positions: positions.len(),
        weight_sum,
        weight_max,
        max_gap,
        span: first.start_tick.abs_diff(last.end_tick),
        non_increasing,
    })
}
