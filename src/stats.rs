//! Statistical helpers shared by both evaluation strategies
//!
//! Every helper treats `None` as "no reading for that date": it is dropped
//! from samples and never counts towards a threshold, but callers decide
//! which length they divide by.

use serde::{Deserialize, Serialize};

/// Ascending sample of every non-null value.
#[must_use]
pub fn sorted_sample(values: &[Option<f64>]) -> Vec<f64> {
    let mut sample: Vec<f64> = values.iter().flatten().copied().collect();
    sample.sort_by(f64::total_cmp);
    sample
}

/// Nearest-rank percentile of an ascending sample, no interpolation.
///
/// The zero-based rank is `floor(fraction * len)`, clamped to the last index
/// so small samples never read past the end. Returns `None` for an empty
/// sample.
#[must_use]
pub fn nearest_rank(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (fraction * sorted.len() as f64).floor();
    let index = if rank <= 0.0 { 0 } else { (rank as usize).min(last) };
    sorted.get(index).copied()
}

/// Number of readings strictly above `cutoff`.
#[must_use]
pub fn count_above(values: &[Option<f64>], cutoff: f64) -> usize {
    values.iter().flatten().filter(|&&v| v > cutoff).count()
}

/// `count / total` as a percentage, zero for an empty denominator.
#[must_use]
pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}

/// Clamp to [0, 100], then round half away from zero.
#[must_use]
pub fn round_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

/// Range and mean of a temperature sample, as drawn by the report chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSpread {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl TemperatureSpread {
    /// Summarise a sample; `None` when it is empty.
    #[must_use]
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }

        let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = sample.iter().sum::<f64>() / sample.len() as f64;

        Some(Self { min, max, mean })
    }

    /// Format the range the way the report tooltip shows it
    #[must_use]
    pub fn format_range(&self) -> String {
        format!("{:.1}°C to {:.1}°C", self.min, self.max)
    }
}
