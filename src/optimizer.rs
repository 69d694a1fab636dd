//! Lossy rebinning of positions into weight-sorted buckets

use crate::error::{ConfigError, Result};
use crate::position::Position;
use tracing::debug;

/// Merges `positions` into at most `num_bins` aggregate positions.
///
/// Positions are stably sorted by ascending weight and cut into chunks of
/// `ceil(len / num_bins)`; the final chunk may be shorter, so fewer than
/// `num_bins` buckets come out when the length does not divide evenly. Each
/// bucket spans `[min start, max end]` of its members and carries their summed
/// weight. Output follows weight order, not tick order.
pub fn optimize(positions: &[Position], num_bins: usize) -> Result<Vec<Position>> {
    if num_bins == 0 || num_bins > positions.len() {
        return Err(ConfigError::InvalidBinCount {
            requested: num_bins,
            available: positions.len(),
        }
        .into());
    }
    let mut sorted = positions.to_vec();
    sorted.sort_by_key(|p| p.weight);

    let chunk = positions.len().div_ceil(num_bins);
    let merged: Vec<Position> = sorted.chunks(chunk).map(merge_bucket).collect();
    debug!(input = positions.len(), requested = num_bins, output = merged.len(), "rebinned positions");
    Ok(merged)
}

fn merge_bucket(bucket: &[Position]) -> Position {
    let start = bucket.iter().map(|p| p.start_tick).min().unwrap_or_default();
    let end = bucket.iter().map(|p| p.end_tick).max().unwrap_or_default();
    let weight = bucket.iter().fold(0u64, |acc, p| acc.saturating_add(p.weight));
    Position::new(start, end, weight)
}
