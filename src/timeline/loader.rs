//! One-shot timeline loading with a fixed retry budget
//!
//! Transport is pluggable: the caller supplies an async fetch that yields the
//! JSON body. Fetch failures are retried, parse failures are not.

use super::timeline_data::{DailyRecord, RetryPolicy};
use super::timeline_operations::parse_timeline_json;
use crate::error::{SerraError, SerraResult};
use futures_timer::Delay;
use std::future::Future;
use std::path::Path;

/// Fetch and parse a timeline, retrying fetch failures up to `policy.attempts`
///
/// `fetch` receives the 1-based attempt number.
pub async fn load_with_retry<F, Fut>(
    mut fetch: F,
    policy: &RetryPolicy,
) -> SerraResult<Vec<DailyRecord>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = SerraResult<String>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match fetch(attempt).await {
            Ok(body) => {
                let records = parse_timeline_json(&body)?;
                log::info!(
                    "[load_with_retry] Loaded {} records on attempt {}/{}",
                    records.len(),
                    attempt,
                    attempts
                );
                return Ok(records);
            }
            Err(e) => {
                log::warn!(
                    "[load_with_retry] Attempt {}/{} failed: {}",
                    attempt,
                    attempts,
                    e
                );
                last_error = e.to_string();
                if attempt < attempts && !policy.delay.is_zero() {
                    Delay::new(policy.delay).await;
                }
            }
        }
    }

    log::error!(
        "[load_with_retry] Giving up after {} attempts: {}",
        attempts,
        last_error
    );
    Err(SerraError::LoadExhausted {
        attempts,
        last_error,
    })
}

/// Load a timeline JSON file from disk
pub async fn load_timeline_file(
    path: impl AsRef<Path>,
    policy: &RetryPolicy,
) -> SerraResult<Vec<DailyRecord>> {
    let path = path.as_ref();
    load_with_retry(
        |_| futures::future::ready(std::fs::read_to_string(path).map_err(|e| SerraError::io(path, e))),
        policy,
    )
    .await
}
