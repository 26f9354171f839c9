//! Result shapes returned by the two evaluation strategies
//!
//! Both strategies report thin or missing data as a regular variant rather
//! than an error, and serialise to the JSON shapes the report layer expects.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Severity band of a probability or score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

/// Strict lower bounds of the moderate and high bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandCutoffs {
    pub moderate_above: u8,
    pub high_above: u8,
}

impl BandCutoffs {
    /// Cutoffs for the share of unfavorable years
    pub const THRESHOLD_COUNT: BandCutoffs = BandCutoffs {
        moderate_above: 30,
        high_above: 60,
    };

    /// Cutoffs for the weighted risk score
    pub const PERCENTILE_WEIGHTED: BandCutoffs = BandCutoffs {
        moderate_above: 35,
        high_above: 65,
    };

    #[must_use]
    pub fn classify(&self, value: u8) -> RiskBand {
        if value > self.high_above {
            RiskBand::High
        } else if value > self.moderate_above {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }
}

impl RiskBand {
    /// Colour used by the report for this band
    #[must_use]
    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskBand::Low => "#10b981",
            RiskBand::Moderate => "#f59e0b",
            RiskBand::High => "#ef4444",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Moderate => write!(f, "Moderate"),
            RiskBand::High => write!(f, "High"),
        }
    }
}

/// Direction of the first-to-last year temperature change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "Warming Trend")]
    Warming,
    #[serde(rename = "Cooling Trend")]
    Cooling,
    #[serde(rename = "Stable")]
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Warming => write!(f, "Warming Trend"),
            Trend::Cooling => write!(f, "Cooling Trend"),
            Trend::Stable => write!(f, "Stable"),
        }
    }
}

/// Threshold-count result for a non-empty set of years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdAssessment {
    /// Share of unfavorable years, 0-100
    pub probability: u8,
    pub trend: Trend,
    pub summary: String,
}

impl ThresholdAssessment {
    #[must_use]
    pub fn band(&self) -> RiskBand {
        BandCutoffs::THRESHOLD_COUNT.classify(self.probability)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ThresholdOutcome {
    Assessed(ThresholdAssessment),
    /// No yearly records were supplied
    NoData { error: String },
}

impl ThresholdOutcome {
    #[must_use]
    pub fn assessment(&self) -> Option<&ThresholdAssessment> {
        match self {
            ThresholdOutcome::Assessed(assessment) => Some(assessment),
            ThresholdOutcome::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        match self {
            ThresholdOutcome::Assessed(assessment) => &assessment.summary,
            ThresholdOutcome::NoData { error } => error,
        }
    }
}

/// Chance of each adverse condition, in percent of sampled days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    #[serde(rename = "chanceOfExtremeHeat")]
    pub chance_of_extreme_heat: f64,
    #[serde(rename = "chanceOfRain")]
    pub chance_of_rain: f64,
}

/// Percentile-weighted risk assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
    /// Weighted score, 0-100
    #[serde(rename = "riskScore")]
    pub risk_score: u8,
    pub summary: String,
    pub insights: Insights,
    /// Extreme-heat cutoff; `None` when no temperature was recorded
    pub p90_temp: Option<f64>,
    /// Ascending non-null daily maximum temperatures
    #[serde(rename = "historicalTemps")]
    pub historical_temps: Vec<f64>,
}

impl RiskResult {
    #[must_use]
    pub fn band(&self) -> RiskBand {
        BandCutoffs::PERCENTILE_WEIGHTED.classify(self.risk_score)
    }
}

/// Too few samples for reliable percentiles
#[derive(Debug, Clone, PartialEq)]
pub struct InsufficientData {
    pub summary: String,
}

impl Serialize for InsufficientData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct NoInsights {}

        let mut state = serializer.serialize_struct("InsufficientData", 4)?;
        state.serialize_field("riskScore", "N/A")?;
        state.serialize_field("summary", &self.summary)?;
        state.serialize_field("insights", &NoInsights {})?;
        state.serialize_field("historicalTemps", &[] as &[f64])?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RiskOutcome {
    Scored(RiskResult),
    InsufficientData(InsufficientData),
}

impl RiskOutcome {
    #[must_use]
    pub fn result(&self) -> Option<&RiskResult> {
        match self {
            RiskOutcome::Scored(result) => Some(result),
            RiskOutcome::InsufficientData(_) => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        match self {
            RiskOutcome::Scored(result) => &result.summary,
            RiskOutcome::InsufficientData(data) => &data.summary,
        }
    }

    /// Temperatures behind the score; empty for the degenerate outcome
    #[must_use]
    pub fn historical_temps(&self) -> &[f64] {
        match self {
            RiskOutcome::Scored(result) => &result.historical_temps,
            RiskOutcome::InsufficientData(_) => &[],
        }
    }
}
