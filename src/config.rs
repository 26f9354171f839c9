//! Configuration management for the climate risk engine
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ClimateRiskError;
use crate::models::{ActivityProfile, ProfileRegistry, VibeWeights};
use crate::weather::DEFAULT_ARCHIVE_BASE_URL;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateRiskConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Historical archive settings
    pub archive: ArchiveConfig,
    /// Extra or overriding activity profiles, keyed by table name
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Historical archive settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// How many past years the archive window spans
    #[serde(default = "default_archive_years")]
    pub years: u32,
    /// Base URL of the `OpenMeteo` archive API
    #[serde(default = "default_archive_base_url")]
    pub base_url: String,
}

/// One configured activity profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Activity name as users type it. Defaults to the table key, which the
    /// config loader may have lower-cased.
    #[serde(default)]
    pub name: Option<String>,
    pub rain_weight: f64,
    pub heat_weight: f64,
    #[serde(default)]
    pub high_risk_message: Option<String>,
    #[serde(default)]
    pub moderate_risk_message: Option<String>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_archive_years() -> u32 {
    30
}

fn default_archive_base_url() -> String {
    DEFAULT_ARCHIVE_BASE_URL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            years: default_archive_years(),
            base_url: default_archive_base_url(),
        }
    }
}

impl ClimateRiskConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path.
    ///
    /// An explicit path must exist; the default locations are optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ClimateRiskError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                path
            }
            None => Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml")),
        };

        if config_file.exists() {
            tracing::debug!(path = %config_file.display(), "loading config file");
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // CLIMATE_RISK_ARCHIVE__YEARS=20 -> archive.years
        builder = builder.add_source(
            Environment::with_prefix("CLIMATE_RISK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateRiskConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("climate-risk").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.archive.base_url.is_empty() {
            self.archive.base_url = default_archive_base_url();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_profiles()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=100).contains(&self.archive.years) {
            return Err(ClimateRiskError::config(format!(
                "Archive window must span 1 to 100 years, got {}",
                self.archive.years
            ))
            .into());
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimateRiskError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClimateRiskError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.archive.base_url.starts_with("http://")
            && !self.archive.base_url.starts_with("https://")
        {
            return Err(ClimateRiskError::config(
                "Archive API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    fn validate_profiles(&self) -> Result<()> {
        for (key, profile) in &self.profiles {
            for (label, weight) in [("rain", profile.rain_weight), ("heat", profile.heat_weight)] {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ClimateRiskError::config(format!(
                        "Profile '{key}' has an invalid {label} weight: {weight}"
                    ))
                    .into());
                }
            }
            if profile.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(
                    ClimateRiskError::config(format!("Profile '{key}' has an empty name")).into(),
                );
            }
        }
        Ok(())
    }

    /// Built-in profiles plus the configured ones, which win on name clashes
    #[must_use]
    pub fn profile_registry(&self) -> ProfileRegistry {
        let mut registry = ProfileRegistry::builtin();
        for (key, entry) in &self.profiles {
            let name = entry.name.clone().unwrap_or_else(|| key.clone());
            let mut profile =
                ActivityProfile::new(name, VibeWeights::new(entry.rain_weight, entry.heat_weight));
            if let Some(message) = &entry.high_risk_message {
                profile = profile.with_high_risk_message(message.clone());
            }
            if let Some(message) = &entry.moderate_risk_message {
                profile = profile.with_moderate_risk_message(message.clone());
            }
            if registry.insert(profile).is_some() {
                tracing::debug!(profile = %key, "configured profile replaces a built-in");
            }
        }
        registry
    }
}
