//! Marker operations - Pure DOP functions
//!
//! Markers are read-only consumers of the walkway and the terrain sampler.
//! Nothing here mutates terrain state.

use super::markers_data::{
    EventMarker, MarkerConfig, MemorialEntry, MemorialPin, MonthlyPlaque, TimelineEvent,
};
use crate::sampler::{sample_height, sample_normal, TerrainSampler};
use crate::terrain::{day_to_distance, sample_walkway, walkway_right, WalkwaySample};
use crate::timeline::{day_index_for_iso, DailyRecord};
use chrono::Datelike;
use glam::Vec3;

/// Ground height under `(x, z)`, or `fallback` without a sampler
fn ground_height(sampler: Option<&TerrainSampler>, x: f32, z: f32, fallback: f32) -> f32 {
    sampler.map(|s| sample_height(s, x, z)).unwrap_or(fallback)
}

/// Walkway sample sitting on record `day`
fn walkway_at_day(walkway: &[WalkwaySample], day: usize, record_count: usize) -> WalkwaySample {
    sample_walkway(walkway, day_to_distance(walkway, day, record_count))
}

/// Walkway tangent flattened onto the ground plane
fn horizontal_tangent(forward: Vec3) -> Vec3 {
    Vec3::new(forward.x, 0.0, forward.z)
        .try_normalize()
        .unwrap_or(Vec3::X)
}

/// Rotation about +Y that faces along `direction`
fn facing_yaw(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

// ============================================================================
// EVENT MARKERS
// ============================================================================

/// Place every event whose date matches a record
///
/// Events on unknown dates are skipped.
pub fn place_event_markers(
    events: &[TimelineEvent],
    records: &[DailyRecord],
    walkway: &[WalkwaySample],
    sampler: Option<&TerrainSampler>,
    config: &MarkerConfig,
) -> Vec<EventMarker> {
    let markers: Vec<EventMarker> = events
        .iter()
        .filter_map(|event| {
            let day_index = day_index_for_iso(records, &event.date)?;
            let sample = walkway_at_day(walkway, day_index, records.len());
            let tangent = horizontal_tangent(sample.forward);
            let offset = if day_index == 0 {
                config.event_offset_first
            } else {
                config.event_offset
            };
            let anchor = sample.position + tangent * offset;
            let ground = ground_height(sampler, anchor.x, anchor.z, sample.position.y);

            Some(EventMarker {
                day_index,
                title: event.title.clone(),
                description: event.description.clone(),
                source: event.source.clone(),
                position: Vec3::new(anchor.x, ground + config.event_lift, anchor.z),
                rotation_y: facing_yaw(-tangent),
            })
        })
        .collect();

    log::debug!(
        "[place_event_markers] {} of {} events matched a record",
        markers.len(),
        events.len()
    );
    markers
}

/// Event shown for the current day, if any
pub fn active_event_marker(markers: &[EventMarker], current_day: usize) -> Option<&EventMarker> {
    markers.iter().find(|marker| marker.day_index == current_day)
}

// ============================================================================
// MONTHLY PLAQUES
// ============================================================================

/// One plaque per calendar month, on its last record
pub fn place_monthly_plaques(
    records: &[DailyRecord],
    walkway: &[WalkwaySample],
    sampler: Option<&TerrainSampler>,
    config: &MarkerConfig,
) -> Vec<MonthlyPlaque> {
    let month_ends = records.iter().enumerate().filter(|(index, record)| {
        records
            .get(index + 1)
            .map_or(true, |next| !same_month(record, next))
    });

    month_ends
        .enumerate()
        .map(|(order, (day_index, record))| {
            let sample = walkway_at_day(walkway, day_index, records.len());
            let tangent = horizontal_tangent(sample.forward);
            let side = if order % 2 == 0 { 1.0 } else { -1.0 };
            let anchor = sample.position
                + tangent * config.plaque_forward_offset
                + walkway_right(tangent) * (config.plaque_lateral_offset * side);
            let ground = ground_height(sampler, anchor.x, anchor.z, sample.position.y);

            MonthlyPlaque {
                day_index,
                year: record.date.year(),
                month: record.date.month(),
                cases: record.cases,
                deaths: record.deaths,
                order,
                position: Vec3::new(anchor.x, ground + config.plaque_ground_lift, anchor.z),
                rotation_y: facing_yaw(-tangent),
            }
        })
        .collect()
}

fn same_month(a: &DailyRecord, b: &DailyRecord) -> bool {
    a.date.year() == b.date.year() && a.date.month() == b.date.month()
}

/// Plaques stand once the reveal front is close enough
pub fn plaque_visible(plaque: &MonthlyPlaque, revealed_x: f32, config: &MarkerConfig) -> bool {
    plaque.position.x <= revealed_x + config.plaque_reveal_lead
}

/// True while the walker's current day falls in the plaque's month
pub fn plaque_active(plaque: &MonthlyPlaque, records: &[DailyRecord], current_day: usize) -> bool {
    records.get(current_day).map_or(false, |record| {
        record.date.year() == plaque.year && record.date.month() == plaque.month
    })
}

// ============================================================================
// MEMORIAL PINS
// ============================================================================

/// 31-multiplier string hash over UTF-16 units, absolute value
///
/// Stable across runs so a memorial always lands on the same side.
pub fn stable_string_hash(value: &str) -> u32 {
    let hash = value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32));
    hash.unsigned_abs()
}

/// Resolve memorial entries onto the walkway
///
/// An explicit `date_index` wins over the date string; unresolved entries are skipped.
pub fn place_memorial_pins(
    entries: &[MemorialEntry],
    records: &[DailyRecord],
    walkway: &[WalkwaySample],
    sampler: Option<&TerrainSampler>,
    config: &MarkerConfig,
) -> Vec<MemorialPin> {
    if walkway.is_empty() || records.len() <= 1 {
        return Vec::new();
    }

    entries
        .iter()
        .filter_map(|entry| {
            let day_index = entry
                .date_index
                .filter(|index| *index < records.len())
                .or_else(|| day_index_for_iso(records, &entry.date))?;
            let sample = walkway_at_day(walkway, day_index, records.len());

            let lateral = (sample.half_width * config.pin_lateral_fraction).min(config.pin_lateral_max);
            let owner = if entry.uid.is_empty() { &entry.id } else { &entry.uid };
            let side = if stable_string_hash(&format!("{}-{}", owner, day_index)) % 2 == 0 {
                -1.0
            } else {
                1.0
            };
            let anchor = sample.position + walkway_right(sample.forward) * (lateral * side);
            let ground = ground_height(sampler, anchor.x, anchor.z, sample.position.y);
            let ground_normal = sampler
                .map(|s| sample_normal(s, anchor.x, anchor.z, config.normal_probe))
                .unwrap_or(Vec3::Y);

            Some(MemorialPin {
                id: entry.id.clone(),
                day_index,
                position: Vec3::new(anchor.x, ground, anchor.z),
                rotation_y: facing_yaw(horizontal_tangent(sample.forward)),
                ground_normal,
            })
        })
        .collect()
}

/// Horizontal proximity test against the camera
pub fn pin_nearby(pin: &MemorialPin, camera_position: Vec3, config: &MarkerConfig) -> bool {
    let dx = camera_position.x - pin.position.x;
    let dz = camera_position.z - pin.position.z;
    dx.hypot(dz) <= config.pin_proximity_radius
}
