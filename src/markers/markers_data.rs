//! Marker data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! Placement happens in markers_operations.rs

use crate::constants::markers::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Placement tuning shared by every marker kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Push along the tangent for an event on the first day
    pub event_offset_first: f32,
    pub event_offset: f32,
    /// Height of an event board above the ground
    pub event_lift: f32,
    pub plaque_forward_offset: f32,
    pub plaque_lateral_offset: f32,
    pub plaque_ground_lift: f32,
    /// Plaques appear this far ahead of the revealed front
    pub plaque_reveal_lead: f32,
    /// Pin lateral offset as a fraction of the walkway half-width
    pub pin_lateral_fraction: f32,
    pub pin_lateral_max: f32,
    pub pin_proximity_radius: f32,
    /// Central-difference step for ground normals
    pub normal_probe: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            event_offset_first: EVENT_OFFSET_FIRST,
            event_offset: EVENT_OFFSET,
            event_lift: EVENT_LIFT,
            plaque_forward_offset: PLAQUE_FORWARD_OFFSET,
            plaque_lateral_offset: PLAQUE_LATERAL_OFFSET,
            plaque_ground_lift: PLAQUE_GROUND_LIFT,
            plaque_reveal_lead: PLAQUE_REVEAL_LEAD,
            pin_lateral_fraction: PIN_LATERAL_FRACTION,
            pin_lateral_max: PIN_LATERAL_MAX,
            pin_proximity_radius: PIN_PROXIMITY_RADIUS,
            normal_probe: NORMAL_PROBE,
        }
    }
}

/// Curated timeline event, keyed by ISO date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Event board standing on the walkway
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub day_index: usize,
    pub title: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub position: Vec3,
    /// Rotation about +Y, board faces back along the walkway
    pub rotation_y: f32,
}

/// Plaque at the last record of a calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPlaque {
    pub day_index: usize,
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
    pub cases: u64,
    pub deaths: u64,
    /// Position among plaques; even and odd orders sit on opposite sides
    pub order: usize,
    pub position: Vec3,
    pub rotation_y: f32,
}

/// User-submitted memorial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorialEntry {
    pub id: String,
    #[serde(default)]
    pub uid: String,
    pub date: String,
    #[serde(default)]
    pub date_index: Option<usize>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Memorial pin resolved onto the terrain
#[derive(Debug, Clone, PartialEq)]
pub struct MemorialPin {
    pub id: String,
    pub day_index: usize,
    pub position: Vec3,
    pub rotation_y: f32,
    pub ground_normal: Vec3,
}
