//! Climate risk engine
//!
//! Two independent strategies answer "how risky is this day for my plan":
//! - Threshold count: share of historical years breaching absolute limits
//! - Percentile weighted: activity-weighted chance of extreme heat and rain
//!
//! Both are pure functions of their inputs. [`ClimateRiskEngine`] exposes
//! them behind one tagged request type so callers pick a strategy
//! explicitly.

pub mod percentile;
pub mod threshold;

use serde::{Deserialize, Serialize};

use crate::models::{
    HistoricalSeries, ProfileRegistry, RiskOutcome, ThresholdOutcome, Thresholds, YearlyRecord,
};

pub use percentile::PercentileWeightedScorer;
pub use threshold::ThresholdCountEvaluator;

/// Input for one evaluation, tagged by strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisRequest {
    ThresholdCount {
        #[serde(default)]
        records: Vec<YearlyRecord>,
        thresholds: Thresholds,
    },
    PercentileWeighted {
        #[serde(default = "HistoricalSeries::empty")]
        series: HistoricalSeries,
        activity: String,
    },
}

/// Result of one evaluation, tagged like the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    ThresholdCount(ThresholdOutcome),
    PercentileWeighted(RiskOutcome),
}

/// Stateless entry point to both strategies
#[derive(Debug, Clone, Default)]
pub struct ClimateRiskEngine {
    threshold: ThresholdCountEvaluator,
    percentile: PercentileWeightedScorer,
}

impl ClimateRiskEngine {
    #[must_use]
    pub fn new(profiles: ProfileRegistry) -> Self {
        Self {
            threshold: ThresholdCountEvaluator::new(),
            percentile: PercentileWeightedScorer::new(profiles),
        }
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileRegistry {
        self.percentile.profiles()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    #[must_use]
    pub fn evaluate(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        match request {
            AnalysisRequest::ThresholdCount {
                records,
                thresholds,
            } => AnalysisOutcome::ThresholdCount(self.threshold_count(records, thresholds)),
            AnalysisRequest::PercentileWeighted { series, activity } => {
                AnalysisOutcome::PercentileWeighted(self.percentile_weighted(series, activity))
            }
        }
    }

    #[must_use]
    pub fn threshold_count(
        &self,
        records: &[YearlyRecord],
        thresholds: &Thresholds,
    ) -> ThresholdOutcome {
        self.threshold.evaluate(records, thresholds)
    }

    #[must_use]
    pub fn percentile_weighted(&self, series: &HistoricalSeries, activity: &str) -> RiskOutcome {
        self.percentile.evaluate(series, activity)
    }
}
