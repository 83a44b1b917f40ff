/// Timeline Module - Data-Oriented Programming (DOP) style
///
/// - timeline_data.rs: raw and validated daily records, normalizer config (NO methods)
/// - timeline_operations.rs: parsing, validation, normalization
/// - loader.rs: one-shot async load with a fixed retry budget

pub mod loader;
pub mod timeline_data;
pub mod timeline_operations;

// Re-export data structures
pub use loader::{load_timeline_file, load_with_retry};
pub use timeline_data::{
    DailyRecord, NormalizedDay, NormalizerConfig, RawRecord, RetryPolicy, TimelineDocument,
    TimelineEnvelope,
};

// Re-export operations
pub use timeline_operations::{
    day_index_for_date, day_index_for_iso, effective_radius, gaussian_smooth, normalize_series,
    parse_timeline_json, records_from_raw, validate_records,
};
