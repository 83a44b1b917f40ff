/// Markers Module - things placed on the walkway
///
/// - markers_data.rs: event, plaque and memorial records (NO methods)
/// - markers_operations.rs: placement against the walkway and the sampler

pub mod markers_data;
pub mod markers_operations;

pub use markers_data::{
    EventMarker, MarkerConfig, MemorialEntry, MemorialPin, MonthlyPlaque, TimelineEvent,
};
pub use markers_operations::{
    active_event_marker, pin_nearby, place_event_markers, place_memorial_pins,
    place_monthly_plaques, plaque_active, plaque_visible, stable_string_hash,
};
