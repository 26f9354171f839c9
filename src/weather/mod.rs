//! Weather data sources feeding the engine

pub mod open_meteo;

pub use open_meteo::{ArchiveResponse, ArchiveWindow, DEFAULT_ARCHIVE_BASE_URL};

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::HistoricalSeries;

/// Load a saved archive response from disk into a validated series
pub fn load_archive(path: &Path) -> Result<HistoricalSeries> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read archive file: {}", path.display()))?;
    let response = ArchiveResponse::from_json(&body).with_context(|| {
        format!("Failed to parse OpenMeteo archive response: {}", path.display())
    })?;
    let series = response.into_series()?;
    tracing::debug!(days = series.len(), path = %path.display(), "archive loaded");
    Ok(series)
}
