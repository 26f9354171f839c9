//! Activity profiles ("vibes") and their risk weights
//!
//! A profile maps a planned activity to the weight given to the chance of
//! meaningful rain and to the chance of extreme heat. Profiles live in a
//! registry so new activities can be added from configuration without
//! touching the scorer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the lower-cased activity name in narratives
pub const ACTIVITY_PLACEHOLDER: &str = "{activity}";

pub const BEACH_DAY: &str = "Beach Day";
pub const HIKING_TRIP: &str = "Hiking Trip";

/// Weights applied to rain and heat percentages. They need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibeWeights {
    pub rain: f64,
    pub heat: f64,
}

impl VibeWeights {
    /// Weights used for any activity the registry does not know
    pub const DEFAULT: VibeWeights = VibeWeights {
        rain: 0.8,
        heat: 0.2,
    };

    #[must_use]
    pub const fn new(rain: f64, heat: f64) -> Self {
        Self { rain, heat }
    }

    /// Weighted sum of the two percentages, unclamped
    #[must_use]
    pub fn combine(&self, chance_of_rain: f64, chance_of_extreme_heat: f64) -> f64 {
        self.rain * chance_of_rain + self.heat * chance_of_extreme_heat
    }
}

/// A named activity with its weights and optional narrative overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    pub name: String,
    pub weights: VibeWeights,
    /// Replaces the generic high-risk narrative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_risk_message: Option<String>,
    /// Replaces the generic moderate-risk narrative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderate_risk_message: Option<String>,
}

impl ActivityProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, weights: VibeWeights) -> Self {
        Self {
            name: name.into(),
            weights,
            high_risk_message: None,
            moderate_risk_message: None,
        }
    }

    #[must_use]
    pub fn with_high_risk_message(mut self, message: impl Into<String>) -> Self {
        self.high_risk_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_moderate_risk_message(mut self, message: impl Into<String>) -> Self {
        self.moderate_risk_message = Some(message.into());
        self
    }

    /// Substitute the activity name into a narrative template
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        template.replace(ACTIVITY_PLACEHOLDER, &self.name.to_lowercase())
    }
}

/// Lookup from activity name to profile, with a fallback weight pair
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRegistry {
    profiles: HashMap<String, ActivityProfile>,
    default_weights: VibeWeights,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileRegistry {
    /// Registry without any named profile
    #[must_use]
    pub fn empty(default_weights: VibeWeights) -> Self {
        Self {
            profiles: HashMap::new(),
            default_weights,
        }
    }

    /// The stock profiles
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty(VibeWeights::DEFAULT);
        registry.insert(
            ActivityProfile::new(BEACH_DAY, VibeWeights::new(0.7, 0.2)).with_high_risk_message(
                "HIGH RISK. Historically, there's a strong chance of rain or storms. \
                 Maybe pack an umbrella instead of sunscreen? ⛈️",
            ),
        );
        registry.insert(
            ActivityProfile::new(HIKING_TRIP, VibeWeights::new(0.4, 0.6))
                .with_moderate_risk_message(
                    "MODERATE RISK. The weather is a real gamble on this day. \
                     Be prepared for anything from sun to a sudden downpour. Pack layers! 🌦️",
                ),
        );
        registry
    }

    /// Add or replace a profile, returning the one it replaced
    pub fn insert(&mut self, profile: ActivityProfile) -> Option<ActivityProfile> {
        self.profiles.insert(profile.name.clone(), profile)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ActivityProfile> {
        self.profiles.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    #[must_use]
    pub fn default_weights(&self) -> VibeWeights {
        self.default_weights
    }

    /// Profile for `name`; unknown names get the default weights and
    /// generic narratives under the requested name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> ActivityProfile {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| ActivityProfile::new(name, self.default_weights))
    }

    /// Known profile names in alphabetical order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
