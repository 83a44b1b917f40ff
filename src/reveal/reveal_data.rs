//! Reveal data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in reveal_operations.rs

use crate::constants::reveal::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Progressive reveal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Segments within this X distance of the viewer are fully risen
    pub active_radius: f32,
    /// Width of the smoothstep band beyond the active radius
    pub falloff_radius: f32,
    /// Exponential approach rate of segment progress (1/s)
    pub approach_rate: f32,
    /// Progress closer than this to its target snaps and goes idle
    pub progress_epsilon: f32,
    /// Target changes smaller than this are ignored
    pub target_epsilon: f32,
    /// Seconds between normal recomputations while segments move
    pub normals_interval: f32,
    /// Keep everything behind the viewer fully risen
    pub retain_behind: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            active_radius: ACTIVE_RADIUS,
            falloff_radius: FALLOFF_RADIUS,
            approach_rate: APPROACH_RATE,
            progress_epsilon: PROGRESS_EPSILON,
            target_epsilon: TARGET_EPSILON,
            normals_interval: NORMALS_INTERVAL,
            retain_behind: false,
        }
    }
}

/// Where a segment is in its reveal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPhase {
    /// At baseline, idle
    Dormant,
    /// Moving up toward its target
    Rising,
    /// At a non-zero target, idle
    Risen,
    /// Moving down toward its target
    Falling,
}

/// Per-segment reveal progress
///
/// Only segments in `active` are touched by a step.
#[derive(Debug, Clone, Default)]
pub struct RevealState {
    pub progress: Vec<f32>,
    pub targets: Vec<f32>,
    pub active: BTreeSet<usize>,
    pub normals_timer: f32,
    /// Vertex heights changed since the last normal recomputation
    pub normals_dirty: bool,
}

/// Summary of one reveal step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealStep {
    pub segments_touched: usize,
    pub segments_completed: usize,
    pub normals_recomputed: bool,
}
