//! CSV export of the raw daily series
//!
//! One row per sampled date, labelled by its year, with `N/A` for missing
//! readings. Numbers are written in their shortest round-trip form so the
//! file reads back to exactly the same values.

use std::io::{Read, Write};

use chrono::Datelike;

use crate::models::HistoricalSeries;
use crate::{ClimateRiskError, Result};

pub const HEADER: [&str; 4] = [
    "Year",
    "Max_Temperature_C",
    "Precipitation_mm",
    "Max_Wind_Speed_kmh",
];

const MISSING: &str = "N/A";

/// One exported sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRow {
    pub year: i32,
    pub max_temperature_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub max_wind_speed_kmh: Option<f64>,
}

/// Rows in series order. An absent wind column exports as `N/A`.
#[must_use]
pub fn rows(series: &HistoricalSeries) -> Vec<ExportRow> {
    let wind = series.wind_speed_10m_max();
    series
        .time()
        .iter()
        .enumerate()
        .map(|(i, date)| ExportRow {
            year: date.year(),
            max_temperature_c: series.temperature_2m_max()[i],
            precipitation_mm: series.precipitation_sum()[i],
            max_wind_speed_kmh: wind.and_then(|w| w[i]),
        })
        .collect()
}

/// Write the series as CRLF-terminated CSV
pub fn write_csv<W: Write>(series: &HistoricalSeries, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    writer.write_record(HEADER)?;
    for row in rows(series) {
        writer.write_record([
            row.year.to_string(),
            format_value(row.max_temperature_c),
            format_value(row.precipitation_mm),
            format_value(row.max_wind_speed_kmh),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(series: &HistoricalSeries) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(series, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ClimateRiskError::validation(format!("CSV output is not UTF-8: {e}")))
}

/// Read an exported report back into rows
pub fn read_csv<R: Read>(input: R) -> Result<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers = reader.headers()?;
    if !headers.iter().eq(HEADER.iter().copied()) {
        return Err(ClimateRiskError::validation(format!(
            "unexpected CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut parsed = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or_default();

        let year = field(0).parse::<i32>().map_err(|e| {
            ClimateRiskError::validation(format!("invalid year '{}': {e}", field(0)))
        })?;
        parsed.push(ExportRow {
            year,
            max_temperature_c: parse_value(field(1))?,
            precipitation_mm: parse_value(field(2))?,
            max_wind_speed_kmh: parse_value(field(3))?,
        });
    }
    Ok(parsed)
}

/// Download name for a report, e.g. `Climate_Report_Zurich_2026-07-14.csv`.
/// Only the part of `place` before the first comma is used. Path separators
/// become `_` so the name is always a single file in the current directory.
#[must_use]
pub fn export_filename(place: &str, date: &str) -> String {
    let city = place.split(',').next().unwrap_or_default().trim();
    format!(
        "Climate_Report_{}_{}.csv",
        file_safe(city),
        file_safe(date.trim())
    )
}

fn file_safe(part: &str) -> String {
    part.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn parse_value(field: &str) -> Result<Option<f64>> {
    if field == MISSING {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|e| ClimateRiskError::validation(format!("invalid value '{field}': {e}")))
}
