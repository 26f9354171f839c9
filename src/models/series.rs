//! Daily historical series for a single location

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ClimateRiskError, Result};

/// Aligned daily observations spanning several years.
///
/// Every column has the same length as `time`, and `time` is strictly
/// increasing. A `None` entry means no reading was recorded for that date.
/// Construction (including deserialisation) enforces both invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct HistoricalSeries {
    time: Vec<NaiveDate>,
    /// Daily maximum temperature in Celsius
    temperature_2m_max: Vec<Option<f64>>,
    /// Daily precipitation sum in mm
    precipitation_sum: Vec<Option<f64>>,
    /// Daily maximum wind speed at 10 m in km/h
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_speed_10m_max: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize)]
struct RawSeries {
    #[serde(default)]
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(default)]
    wind_speed_10m_max: Option<Vec<Option<f64>>>,
}

impl TryFrom<RawSeries> for HistoricalSeries {
    type Error = ClimateRiskError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        Self::from_columns(
            raw.time,
            raw.temperature_2m_max,
            raw.precipitation_sum,
            raw.wind_speed_10m_max,
        )
    }
}

impl HistoricalSeries {
    /// Build a validated series
    pub fn new(
        time: Vec<NaiveDate>,
        temperature_2m_max: Vec<Option<f64>>,
        precipitation_sum: Vec<Option<f64>>,
        wind_speed_10m_max: Option<Vec<Option<f64>>>,
    ) -> Result<Self> {
        let len = time.len();
        check_column("temperature_2m_max", temperature_2m_max.len(), len)?;
        check_column("precipitation_sum", precipitation_sum.len(), len)?;
        if let Some(wind) = &wind_speed_10m_max {
            check_column("wind_speed_10m_max", wind.len(), len)?;
        }

        if let Some(pair) = time.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ClimateRiskError::validation(format!(
                "dates must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            time,
            temperature_2m_max,
            precipitation_sum,
            wind_speed_10m_max,
        })
    }

    /// Build a series where an absent temperature or precipitation column
    /// means no reading on any date. An absent wind column stays absent.
    pub fn from_columns(
        time: Vec<NaiveDate>,
        temperature_2m_max: Option<Vec<Option<f64>>>,
        precipitation_sum: Option<Vec<Option<f64>>>,
        wind_speed_10m_max: Option<Vec<Option<f64>>>,
    ) -> Result<Self> {
        let len = time.len();
        Self::new(
            time,
            temperature_2m_max.unwrap_or_else(|| vec![None; len]),
            precipitation_sum.unwrap_or_else(|| vec![None; len]),
            wind_speed_10m_max,
        )
    }

    /// A series with no samples, standing in for absent data
    #[must_use]
    pub fn empty() -> Self {
        Self {
            time: Vec::new(),
            temperature_2m_max: Vec::new(),
            precipitation_sum: Vec::new(),
            wind_speed_10m_max: None,
        }
    }

    #[must_use]
    pub fn time(&self) -> &[NaiveDate] {
        &self.time
    }

    #[must_use]
    pub fn temperature_2m_max(&self) -> &[Option<f64>] {
        &self.temperature_2m_max
    }

    #[must_use]
    pub fn precipitation_sum(&self) -> &[Option<f64>] {
        &self.precipitation_sum
    }

    #[must_use]
    pub fn wind_speed_10m_max(&self) -> Option<&[Option<f64>]> {
        self.wind_speed_10m_max.as_deref()
    }

    /// Number of sampled dates, nulls included
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// First and last sampled date
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}

fn check_column(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(ClimateRiskError::validation(format!(
            "{name} has {actual} values but time has {expected}"
        )));
    }
    Ok(())
}
