//! Timeline data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in timeline_operations.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One day of the processed series
///
/// Records are sorted ascending by date and `sequence_index` is dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
    pub sequence_index: usize,
}

/// Record as it appears in the timeline JSON
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// ISO-8601 calendar date (yyyy-mm-dd)
    pub date: String,
    #[serde(alias = "new_cases")]
    pub cases: u64,
    #[serde(alias = "new_deaths")]
    pub deaths: u64,
}

/// Envelope written by the data preparation script
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEnvelope {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub archive_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    pub records: Vec<RawRecord>,
}

/// Either a bare record array or the envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimelineDocument {
    Records(Vec<RawRecord>),
    Envelope(TimelineEnvelope),
}

/// Per-record normalized values in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalizedDay {
    pub cases_norm: f32,
    pub deaths_norm: f32,
}

/// Normalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Gaussian kernel radius in records (0 disables smoothing)
    pub smoothing_radius: usize,
    /// Effective radius is capped at len / radius_length_divisor
    pub radius_length_divisor: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            smoothing_radius: crate::constants::normalizer::SMOOTHING_RADIUS,
            radius_length_divisor: crate::constants::normalizer::RADIUS_LENGTH_DIVISOR,
        }
    }
}

/// Fixed-count retry policy for the one-shot timeline load
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}
