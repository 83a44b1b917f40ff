//! Timeline operations - Pure DOP functions
//!
//! Parsing, validation and normalization of the daily series.

use super::timeline_data::{
    DailyRecord, NormalizedDay, NormalizerConfig, RawRecord, TimelineDocument,
};
use crate::error::{SerraError, SerraResult};
use chrono::NaiveDate;

// ============================================================================
// PARSING
// ============================================================================

/// Parse timeline JSON (bare array or envelope) into validated records
pub fn parse_timeline_json(json: &str) -> SerraResult<Vec<DailyRecord>> {
    let document: TimelineDocument = serde_json::from_str(json)?;

    let raw = match document {
        TimelineDocument::Records(records) => records,
        TimelineDocument::Envelope(envelope) => {
            log::debug!(
                "[parse_timeline_json] Envelope source={:?} generated_at={:?}",
                envelope.source,
                envelope.generated_at
            );
            envelope.records
        }
    };

    records_from_raw(&raw)
}

/// Convert raw records into dated, indexed records
///
/// Dates must be strictly ascending; gaps are allowed.
pub fn records_from_raw(raw: &[RawRecord]) -> SerraResult<Vec<DailyRecord>> {
    let mut records = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let date = NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d").map_err(|_| {
            SerraError::InvalidDate {
                value: entry.date.clone(),
                index,
            }
        })?;

        records.push(DailyRecord {
            date,
            cases: entry.cases,
            deaths: entry.deaths,
            sequence_index: index,
        });
    }

    validate_records(&records)?;
    Ok(records)
}

/// Check ordering and index density of an in-memory series
pub fn validate_records(records: &[DailyRecord]) -> SerraResult<()> {
    for (index, record) in records.iter().enumerate() {
        if record.sequence_index != index {
            return Err(SerraError::InvalidTimeline {
                reason: format!(
                    "sequence index {} at position {}",
                    record.sequence_index, index
                ),
            });
        }
    }

    for (index, pair) in records.windows(2).enumerate() {
        if pair[0].date >= pair[1].date {
            return Err(SerraError::UnorderedDates {
                index: index + 1,
                previous: pair[0].date.to_string(),
                current: pair[1].date.to_string(),
            });
        }
    }

    Ok(())
}

/// Find the record index for a calendar date
pub fn day_index_for_date(records: &[DailyRecord], date: NaiveDate) -> Option<usize> {
    records.binary_search_by(|record| record.date.cmp(&date)).ok()
}

/// Parse an ISO date and find its record index
pub fn day_index_for_iso(records: &[DailyRecord], iso: &str) -> Option<usize> {
    let date = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").ok()?;
    day_index_for_date(records, date)
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize cases and deaths against their series maximum, then smooth
///
/// The maximum is floored at 1 so an all-zero series normalizes to zeros.
pub fn normalize_series(records: &[DailyRecord], config: &NormalizerConfig) -> Vec<NormalizedDay> {
    if records.is_empty() {
        return Vec::new();
    }

    let max_cases = records.iter().map(|r| r.cases).max().unwrap_or(0).max(1) as f64;
    let max_deaths = records.iter().map(|r| r.deaths).max().unwrap_or(0).max(1) as f64;

    let cases: Vec<f32> = records
        .iter()
        .map(|r| (r.cases as f64 / max_cases) as f32)
        .collect();
    let deaths: Vec<f32> = records
        .iter()
        .map(|r| (r.deaths as f64 / max_deaths) as f32)
        .collect();

    let radius = effective_radius(records.len(), config);
    let cases = gaussian_smooth(&cases, radius);
    let deaths = gaussian_smooth(&deaths, radius);

    log::debug!(
        "[normalize_series] {} records, kernel radius {} (configured {})",
        records.len(),
        radius,
        config.smoothing_radius
    );

    cases
        .into_iter()
        .zip(deaths)
        .map(|(cases_norm, deaths_norm)| NormalizedDay {
            cases_norm: cases_norm.clamp(0.0, 1.0),
            deaths_norm: deaths_norm.clamp(0.0, 1.0),
        })
        .collect()
}

/// Kernel radius actually used for a series of `len` records
pub fn effective_radius(len: usize, config: &NormalizerConfig) -> usize {
    let divisor = config.radius_length_divisor.max(1);
    config.smoothing_radius.min(len / divisor)
}

/// Symmetric Gaussian smoothing with the window truncated at the series bounds
///
/// sigma = radius / 2. Weights inside the window are renormalized, so a
/// constant series stays constant up to the edges.
pub fn gaussian_smooth(values: &[f32], radius: usize) -> Vec<f32> {
    if radius == 0 || values.len() < 2 {
        return values.to_vec();
    }

    let sigma = radius as f32 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let kernel: Vec<f32> = (0..=radius)
        .map(|offset| (-((offset * offset) as f32) / denom).exp())
        .collect();

    let last = values.len() - 1;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(radius);
            let end = (i + radius).min(last);
            let mut sum = 0.0;
            let mut weight = 0.0;
            for (j, value) in values.iter().enumerate().take(end + 1).skip(start) {
                let w = kernel[i.abs_diff(j)];
                sum += value * w;
                weight += w;
            }
            sum / weight
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, cases: u64, deaths: u64) -> RawRecord {
        RawRecord {
            date: date.to_string(),
            cases,
            deaths,
        }
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"date": "2020-01-01", "cases": 10, "deaths": 0},
            {"date": "2020-01-02", "cases": 50, "deaths": 5},
            {"date": "2020-01-03", "cases": 20, "deaths": 1}
        ]"#;
        let records = parse_timeline_json(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].cases, 50);
        assert_eq!(records[2].sequence_index, 2);
    }

    #[test]
    fn test_parse_envelope_with_aliases_and_extra_fields() {
        let json = r#"{
            "source": "https://example.invalid/archive.zip",
            "archiveName": "HIST_PAINEL.zip",
            "generatedAt": "2024-01-01T00:00:00Z",
            "records": [
                {"date": "2020-02-26", "new_cases": 1, "new_deaths": 0, "casesAcc": 1, "dayIndex": 0},
                {"date": "2020-02-28", "cases": 1, "deaths": 0, "casesAcc": 2, "dayIndex": 1}
            ]
        }"#;
        let records = parse_timeline_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2020, 2, 26).unwrap());
    }

    #[test]
    fn test_rejects_duplicate_and_unordered_dates() {
        let duplicate = records_from_raw(&[raw("2020-01-01", 1, 0), raw("2020-01-01", 2, 0)]);
        assert!(matches!(duplicate, Err(SerraError::UnorderedDates { index: 1, .. })));

        let unordered = records_from_raw(&[raw("2020-01-03", 1, 0), raw("2020-01-02", 2, 0)]);
        assert!(unordered.is_err());
    }

    #[test]
    fn test_rejects_bad_date_and_negative_counts() {
        let bad = records_from_raw(&[raw("01/02/2020", 1, 0)]);
        assert!(matches!(bad, Err(SerraError::InvalidDate { index: 0, .. })));

        let negative = parse_timeline_json(r#"[{"date": "2020-01-01", "cases": -3, "deaths": 0}]"#);
        assert!(matches!(negative, Err(SerraError::DeserializationError { .. })));
    }

    #[test]
    fn test_truncated_json_is_a_deserialization_error() {
        let truncated = parse_timeline_json(r#"[{"date": "2020-01-01", "cases": 3"#);
        match truncated {
            Err(SerraError::DeserializationError { context, .. }) => assert_eq!(context, "json"),
            other => panic!("expected deserialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_without_smoothing_on_short_series() {
        let records =
            records_from_raw(&[raw("2020-01-01", 10, 0), raw("2020-01-02", 50, 5), raw("2020-01-03", 20, 1)])
                .unwrap();
        let normalized = normalize_series(&records, &NormalizerConfig::default());
        assert_eq!(normalized.len(), 3);
        assert!((normalized[0].cases_norm - 0.2).abs() < 1e-6);
        assert!((normalized[1].deaths_norm - 1.0).abs() < 1e-6);
        assert!((normalized[2].deaths_norm - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_series_normalizes_to_zero() {
        let records = records_from_raw(&[raw("2020-01-01", 0, 0), raw("2020-01-02", 0, 0)]).unwrap();
        let normalized = normalize_series(&records, &NormalizerConfig::default());
        assert!(normalized.iter().all(|d| d.cases_norm == 0.0 && d.deaths_norm == 0.0));
    }

    #[test]
    fn test_gaussian_smoothing_suppresses_spike_and_keeps_constants() {
        let mut values = vec![0.0f32; 41];
        values[20] = 1.0;
        let smoothed = gaussian_smooth(&values, 6);
        assert!(smoothed[20] < 0.5);
        assert!(smoothed[19] > 0.0 && smoothed[21] > 0.0);
        assert!((smoothed[19] - smoothed[21]).abs() < 1e-6);

        let flat = gaussian_smooth(&[0.4f32; 10], 6);
        assert!(flat.iter().all(|v| (v - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let raw_records: Vec<RawRecord> = (0..200)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap() + chrono::Duration::days(i);
                raw(&date.to_string(), (i * 37 % 101) as u64, (i * 13 % 17) as u64)
            })
            .collect();
        let records = records_from_raw(&raw_records).unwrap();
        let a = normalize_series(&records, &NormalizerConfig::default());
        let b = normalize_series(&records, &NormalizerConfig::default());
        assert_eq!(a, b);
        assert_eq!(effective_radius(records.len(), &NormalizerConfig::default()), 6);
    }

    #[test]
    fn test_day_index_lookup() {
        let records =
            records_from_raw(&[raw("2020-01-01", 1, 0), raw("2020-01-05", 1, 0), raw("2020-01-09", 1, 0)])
                .unwrap();
        assert_eq!(day_index_for_iso(&records, "2020-01-05"), Some(1));
        assert_eq!(day_index_for_iso(&records, "2020-01-04"), None);
        assert_eq!(day_index_for_iso(&records, "garbage"), None);
    }
}
