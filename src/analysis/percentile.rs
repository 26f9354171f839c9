//! Percentile-weighted risk scoring over a daily series
//!
//! The scorer takes the 90th percentile of daily maximum temperature as the
//! extreme-heat cutoff, measures how often the cutoff is exceeded and how
//! often meaningful rain fell, and blends both through the activity
//! profile's weights.

use crate::models::{
    ActivityProfile, BandCutoffs, HistoricalSeries, InsufficientData, Insights, ProfileRegistry,
    RiskBand, RiskOutcome, RiskResult,
};
use crate::stats;

/// Below this many dates percentile statistics are not trusted
pub const MIN_SAMPLES: usize = 10;

/// Rank of the extreme-heat cutoff
pub const HEAT_PERCENTILE: f64 = 0.9;

/// Daily precipitation (mm) that must be exceeded to count as rain
pub const MEANINGFUL_RAIN_MM: f64 = 1.0;

const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient historical data for a reliable analysis.";

const HIGH_RISK_TEMPLATE: &str = "HIGH RISK. There's a significant chance of disruptive weather \
                                  for a {activity}. A backup plan is strongly advised.";
const MODERATE_RISK_TEMPLATE: &str = "MODERATE RISK. While you might get a good day, be prepared \
                                      for a notable chance of challenging conditions for your \
                                      {activity}.";
const LOW_RISK_TEMPLATE: &str =
    "Historically, this looks like a great day for a {activity}. Conditions appear favorable.";

/// Scores a series for an activity looked up in its profile registry
#[derive(Debug, Clone, Default)]
pub struct PercentileWeightedScorer {
    profiles: ProfileRegistry,
}

impl PercentileWeightedScorer {
    #[must_use]
    pub fn new(profiles: ProfileRegistry) -> Self {
        Self { profiles }
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Score `series` for the named activity
    #[must_use]
    pub fn evaluate(&self, series: &HistoricalSeries, activity: &str) -> RiskOutcome {
        self.evaluate_profile(series, &self.profiles.resolve(activity))
    }

    /// Score `series` for an already resolved profile
    #[must_use]
    pub fn evaluate_profile(
        &self,
        series: &HistoricalSeries,
        profile: &ActivityProfile,
    ) -> RiskOutcome {
        let days = series.len();
        if days < MIN_SAMPLES {
            tracing::debug!(days, "not enough samples for percentile scoring");
            return RiskOutcome::InsufficientData(InsufficientData {
                summary: INSUFFICIENT_DATA_MESSAGE.to_string(),
            });
        }

        let historical_temps = stats::sorted_sample(series.temperature_2m_max());
        let p90_temp = stats::nearest_rank(&historical_temps, HEAT_PERCENTILE);

        // Both chances divide by every sampled date, nulls included, while the
        // cutoff only sees non-null readings. Missing days therefore dilute the
        // heat chance below the nominal 10%.
        let hot_days = p90_temp.map_or(0, |cutoff| {
            stats::count_above(series.temperature_2m_max(), cutoff)
        });
        let rainy_days = stats::count_above(series.precipitation_sum(), MEANINGFUL_RAIN_MM);
        let insights = Insights {
            chance_of_extreme_heat: stats::percent_of(hot_days, days),
            chance_of_rain: stats::percent_of(rainy_days, days),
        };

        let risk_score = stats::round_score(
            profile
                .weights
                .combine(insights.chance_of_rain, insights.chance_of_extreme_heat),
        );
        let summary = narrative(profile, BandCutoffs::PERCENTILE_WEIGHTED.classify(risk_score));

        tracing::debug!(
            days,
            samples = historical_temps.len(),
            p90_temp = ?p90_temp,
            risk_score,
            activity = %profile.name,
            "percentile score evaluated"
        );

        RiskOutcome::Scored(RiskResult {
            risk_score,
            summary,
            insights,
            p90_temp,
            historical_temps,
        })
    }
}

fn narrative(profile: &ActivityProfile, band: RiskBand) -> String {
    let template = match band {
        RiskBand::High => profile.high_risk_message.as_deref().unwrap_or(HIGH_RISK_TEMPLATE),
        RiskBand::Moderate => profile
            .moderate_risk_message
            .as_deref()
            .unwrap_or(MODERATE_RISK_TEMPLATE),
        RiskBand::Low => LOW_RISK_TEMPLATE,
    };
    profile.render(template)
}
