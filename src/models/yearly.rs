//! Annual summaries and the absolute thresholds they are checked against

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::HistoricalSeries;

const KMH_TO_MPH: f64 = 0.621_371;

/// Pre-aggregated conditions for one historical year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    /// Average temperature in Celsius
    pub avg_temp: f64,
    /// Precipitation in mm
    pub precipitation_mm: f64,
    /// Wind speed in mph
    pub wind_speed_mph: f64,
}

/// Caller-supplied limits; a year breaching any of them is unfavorable.
///
/// `min_temp <= max_temp` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub max_temp: f64,
    pub min_temp: f64,
    pub max_precipitation: f64,
    pub max_wind: f64,
}

impl YearlyRecord {
    /// Check the record against every threshold
    #[must_use]
    pub fn is_unfavorable(&self, thresholds: &Thresholds) -> bool {
        let too_hot = self.avg_temp > thresholds.max_temp;
        let too_cold = self.avg_temp < thresholds.min_temp;
        let too_wet = self.precipitation_mm > thresholds.max_precipitation;
        let too_windy = self.wind_speed_mph > thresholds.max_wind;

        too_hot || too_cold || too_wet || too_windy
    }

    /// Collapse a daily series into one record per calendar year, oldest first.
    ///
    /// Years without a single temperature reading are skipped since they
    /// cannot be classified. Missing precipitation sums to zero and missing
    /// wind reads as calm.
    #[must_use]
    pub fn from_series(series: &HistoricalSeries) -> Vec<YearlyRecord> {
        #[derive(Default)]
        struct Accumulator {
            temp_sum: f64,
            temp_count: usize,
            precipitation: f64,
            wind_kmh: Option<f64>,
        }

        let mut years: BTreeMap<i32, Accumulator> = BTreeMap::new();
        let wind = series.wind_speed_10m_max();

        for (i, date) in series.time().iter().enumerate() {
            let acc = years.entry(date.year()).or_default();

            if let Some(temp) = series.temperature_2m_max()[i] {
                acc.temp_sum += temp;
                acc.temp_count += 1;
            }
            if let Some(precip) = series.precipitation_sum()[i] {
                acc.precipitation += precip;
            }
            if let Some(speed) = wind.and_then(|w| w[i]) {
                acc.wind_kmh = Some(acc.wind_kmh.map_or(speed, |max| max.max(speed)));
            }
        }

        years
            .into_values()
            .filter(|acc| acc.temp_count > 0)
            .map(|acc| YearlyRecord {
                avg_temp: acc.temp_sum / acc.temp_count as f64,
                precipitation_mm: acc.precipitation,
                wind_speed_mph: acc.wind_kmh.unwrap_or(0.0) * KMH_TO_MPH,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn thresholds() -> Thresholds {
        Thresholds {
            max_temp: 30.0,
            min_temp: 5.0,
            max_precipitation: 10.0,
            max_wind: 20.0,
        }
    }

    fn record(avg_temp: f64, precipitation_mm: f64, wind_speed_mph: f64) -> YearlyRecord {
        YearlyRecord {
            avg_temp,
            precipitation_mm,
            wind_speed_mph,
        }
    }

    #[rstest]
    #[case(record(20.0, 2.0, 10.0), false)]
    #[case(record(30.5, 2.0, 10.0), true)]
    #[case(record(4.9, 2.0, 10.0), true)]
    #[case(record(20.0, 10.1, 10.0), true)]
    #[case(record(20.0, 2.0, 20.1), true)]
    #[case(record(30.0, 10.0, 20.0), false)]
    #[case(record(40.0, 50.0, 60.0), true)]
    fn test_is_unfavorable(#[case] record: YearlyRecord, #[case] expected: bool) {
        assert_eq!(record.is_unfavorable(&thresholds()), expected);
    }

    #[test]
    fn test_thresholds_use_camel_case() {
        let parsed: Thresholds = serde_json::from_str(
            r#"{"maxTemp":32,"minTemp":10,"maxPrecipitation":5,"maxWind":25}"#,
        )
        .unwrap();
        assert_eq!(parsed.max_temp, 32.0);
        assert_eq!(parsed.max_wind, 25.0);
    }

    #[test]
    fn test_from_series_groups_by_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let series = HistoricalSeries::new(
            vec![d(2019, 7, 14), d(2019, 7, 15), d(2020, 7, 14), d(2021, 7, 14)],
            vec![Some(20.0), Some(24.0), Some(30.0), None],
            vec![Some(1.5), None, Some(4.0), Some(9.0)],
            Some(vec![Some(10.0), Some(30.0), None, Some(5.0)]),
        )
        .unwrap();

        let records = YearlyRecord::from_series(&series);

        // 2021 has no temperature reading
        assert_eq!(records.len(), 2);
        assert_relative_eq!(records[0].avg_temp, 22.0);
        assert_relative_eq!(records[0].precipitation_mm, 1.5);
        assert_relative_eq!(records[0].wind_speed_mph, 30.0 * KMH_TO_MPH);
        assert_relative_eq!(records[1].avg_temp, 30.0);
        assert_eq!(records[1].wind_speed_mph, 0.0);
    }

    #[test]
    fn test_from_series_without_wind_column() {
        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let series =
            HistoricalSeries::new(vec![d(2000)], vec![Some(3.0)], vec![None], None).unwrap();

        let records = YearlyRecord::from_series(&series);
        assert_eq!(records, vec![record(3.0, 0.0, 0.0)]);
    }
}
