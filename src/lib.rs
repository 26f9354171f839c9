//! Climate risk engine - historical odds of bad weather for a planned day
//!
//! This library scores how likely a calendar day is to be spoiled by the
//! weather, using decades of daily history for one location. It provides
//! the evaluation strategies, the `OpenMeteo` archive adapter, the CSV
//! report and the configuration and logging around them.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod stats;
pub mod weather;

// Re-export core types for public API
pub use analysis::{
    AnalysisOutcome, AnalysisRequest, ClimateRiskEngine, PercentileWeightedScorer,
    ThresholdCountEvaluator,
};
pub use config::ClimateRiskConfig;
pub use error::ClimateRiskError;
pub use models::{
    ActivityProfile, HistoricalSeries, ProfileRegistry, RiskBand, RiskOutcome, RiskResult,
    ThresholdOutcome, Thresholds, Trend, VibeWeights, YearlyRecord,
};
pub use weather::{ArchiveResponse, ArchiveWindow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateRiskError>;
