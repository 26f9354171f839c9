//! `OpenMeteo` historical archive: request window and response decoding
//!
//! Only the shapes are handled here. Fetching the archive, retrying and
//! geocoding belong to whoever calls the engine.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::models::HistoricalSeries;
use crate::{ClimateRiskError, Result};

pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://archive-api.open-meteo.com/v1";

/// Daily variables requested from the archive
pub const DAILY_VARIABLES: &str = "temperature_2m_max,precipitation_sum,wind_speed_10m_max";

/// Archive API response (only the fields the engine consumes)
#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub daily: Option<DailyArchive>,
}

/// Daily block of the archive response
#[derive(Debug, Deserialize)]
pub struct DailyArchive {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    pub wind_speed_10m_max: Option<Vec<Option<f64>>>,
}

impl ArchiveResponse {
    /// Parse a raw archive response body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Convert into a validated series.
    ///
    /// A missing `daily` block gives an empty series; a missing temperature
    /// or precipitation column is read as "no readings" for every date.
    pub fn into_series(self) -> Result<HistoricalSeries> {
        let Some(daily) = self.daily else {
            tracing::debug!("archive response has no daily block");
            return Ok(HistoricalSeries::empty());
        };

        HistoricalSeries::from_columns(
            daily.time,
            daily.temperature_2m_max,
            daily.precipitation_sum,
            daily.wind_speed_10m_max,
        )
    }
}

/// Date range covering the same calendar day over the last `years` years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ArchiveWindow {
    /// Window from `current_year - years` to last year, anchored on the
    /// month and day of `target`. 29 February becomes 28 February in
    /// non-leap years.
    pub fn for_day(target: NaiveDate, current_year: i32, years: u32) -> Result<Self> {
        if years == 0 {
            return Err(ClimateRiskError::validation(
                "archive window must span at least one year",
            ));
        }
        let years = i32::try_from(years)
            .map_err(|_| ClimateRiskError::validation("archive window is too long"))?;

        let year_back = |by: i32| {
            current_year.checked_sub(by).ok_or_else(|| {
                ClimateRiskError::validation(format!(
                    "archive window of {by} years before {current_year} is out of range"
                ))
            })
        };

        let start = same_day_in(target, year_back(years)?)?;
        let end = same_day_in(target, year_back(1)?)?;
        Ok(Self { start, end })
    }

    /// Archive request URL for a coordinate
    pub fn request_url(&self, base_url: &str, latitude: f64, longitude: f64) -> Result<String> {
        validate_coordinates(latitude, longitude)?;

        Ok(format!(
            "{}/archive?latitude={latitude}&longitude={longitude}\
             &start_date={}&end_date={}&daily={DAILY_VARIABLES}&timezone=auto",
            base_url.trim_end_matches('/'),
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d"),
        ))
    }
}

fn same_day_in(target: NaiveDate, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, target.month(), target.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, target.month(), target.day() - 1))
        .ok_or_else(|| {
            ClimateRiskError::validation(format!("no {} in year {year}", target.format("%m-%d")))
        })
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ClimateRiskError::validation(format!(
            "latitude {latitude} is outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ClimateRiskError::validation(format!(
            "longitude {longitude} is outside [-180, 180]"
        )));
    }
    Ok(())
}
