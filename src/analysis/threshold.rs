//! Threshold-count evaluation over annual summaries

use crate::models::{
    BandCutoffs, RiskBand, ThresholdAssessment, ThresholdOutcome, Thresholds, Trend,
    YearlyRecord,
};
use crate::stats;

/// Temperature change (°C) between first and last year below which the
/// series counts as stable
const TREND_BAND: f64 = 1.0;

const NO_DATA_MESSAGE: &str = "No historical data available.";

/// Counts the years that breach any threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdCountEvaluator;

impl ThresholdCountEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the records in the order given; the first and last
    /// entries drive the trend.
    #[must_use]
    pub fn evaluate(&self, records: &[YearlyRecord], thresholds: &Thresholds) -> ThresholdOutcome {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            tracing::debug!("no yearly records supplied");
            return ThresholdOutcome::NoData {
                error: NO_DATA_MESSAGE.to_string(),
            };
        };

        let unfavorable = records
            .iter()
            .filter(|record| record.is_unfavorable(thresholds))
            .count();
        let probability = stats::round_score(stats::percent_of(unfavorable, records.len()));
        let trend = classify_trend(first.avg_temp, last.avg_temp);

        tracing::debug!(
            years = records.len(),
            unfavorable,
            probability,
            %trend,
            "threshold count evaluated"
        );

        ThresholdOutcome::Assessed(ThresholdAssessment {
            probability,
            trend,
            summary: summary_for(probability).to_string(),
        })
    }
}

fn classify_trend(first_temp: f64, last_temp: f64) -> Trend {
    if last_temp > first_temp + TREND_BAND {
        Trend::Warming
    } else if last_temp < first_temp - TREND_BAND {
        Trend::Cooling
    } else {
        Trend::Stable
    }
}

fn summary_for(probability: u8) -> &'static str {
    match BandCutoffs::THRESHOLD_COUNT.classify(probability) {
        RiskBand::High => "A high probability of unfavorable weather. Plan accordingly.",
        RiskBand::Moderate => "A moderate probability of unfavorable weather.",
        RiskBand::Low => "A low probability of unfavorable weather.",
    }
}
