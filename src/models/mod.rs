//! Data models for the climate risk engine
//!
//! This module contains the core domain models organized by concern:
//! - Series: the daily multi-year history for one location
//! - Yearly: annual summaries and the thresholds they are checked against
//! - Profile: activity profiles and their risk weights
//! - Outcome: the result shapes produced by both evaluation strategies

pub mod outcome;
pub mod profile;
pub mod series;
pub mod yearly;

// Re-export all public types for convenient access
pub use outcome::{
    BandCutoffs, InsufficientData, Insights, RiskBand, RiskOutcome, RiskResult,
    ThresholdAssessment, ThresholdOutcome, Trend,
};
pub use profile::{ActivityProfile, ProfileRegistry, VibeWeights};
pub use series::HistoricalSeries;
pub use yearly::{Thresholds, YearlyRecord};
