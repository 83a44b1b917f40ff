//! Terrain data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! Synthesis happens in profile_operations.rs, mesh_operations.rs and
//! walkway_operations.rs.

use crate::constants::terrain::*;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Repeated 3-tap smoothing: pass count and blend factor toward the local mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingPass {
    pub passes: usize,
    pub influence: f32,
}

/// Terrain synthesis configuration
///
/// Widths are half-widths in world units measured from the centerline (z = 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // Resolution
    pub time_segment_multiplier: usize,
    pub min_time_segments: usize,
    pub max_time_segments: usize,
    pub lateral_segments: usize,

    // Extent
    pub track_length: f32,
    pub max_half_width: f32,
    pub min_half_width: f32,
    pub width_exponent: f32,

    // Height drivers
    pub max_peak_height: f32,
    pub base_ridge_height: f32,

    // Nested band widths
    pub walkway_width_fraction: f32,
    pub walkway_width_floor: f32,
    pub walkway_width_smoothed_floor: f32,
    pub plateau_width_fraction: f32,
    pub plateau_gap: f32,
    pub plateau_smoothed_gap: f32,
    pub shoulder_min: f32,

    // Ridge settling
    pub settle_passes: usize,
    pub ridge_smoothed_blend: f32,

    // Walkway rate limiting
    pub max_ascent: f32,
    pub max_descent: f32,
    pub walkway_target_pull: f32,
    pub walkway_wiggle: f32,
    pub ridge_margin: f32,
    pub walkway_ripple: f32,

    // Pre-reveal slab
    pub baseline_y: f32,
    pub min_walkway_base: f32,
    pub walkway_thickness: f32,
    pub plateau_thickness: f32,

    // Paved strip
    pub strip_width_ratio: f32,
    pub strip_min_half_width: f32,
    pub strip_bevel_inner: f32,
    pub strip_bevel_outer: f32,
    pub strip_surface_offset: f32,
    pub strip_tile_u: f32,
    pub strip_tile_v: f32,

    // Smoothing (tables last so the struct serializes to TOML)
    pub width_smoothing: SmoothingPass,
    pub walkway_smoothing: SmoothingPass,
    pub ridge_smoothing: SmoothingPass,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            time_segment_multiplier: TIME_SEGMENT_MULTIPLIER,
            min_time_segments: MIN_TIME_SEGMENTS,
            max_time_segments: MAX_TIME_SEGMENTS,
            lateral_segments: LATERAL_SEGMENTS,
            track_length: TRACK_LENGTH,
            max_half_width: MAX_HALF_WIDTH,
            min_half_width: MIN_HALF_WIDTH,
            width_exponent: WIDTH_EXPONENT,
            max_peak_height: MAX_PEAK_HEIGHT,
            base_ridge_height: BASE_RIDGE_HEIGHT,
            walkway_width_fraction: WALKWAY_WIDTH_FRACTION,
            walkway_width_floor: WALKWAY_WIDTH_FLOOR,
            walkway_width_smoothed_floor: WALKWAY_WIDTH_SMOOTHED_FLOOR,
            plateau_width_fraction: PLATEAU_WIDTH_FRACTION,
            plateau_gap: PLATEAU_GAP,
            plateau_smoothed_gap: PLATEAU_SMOOTHED_GAP,
            shoulder_min: SHOULDER_MIN,
            width_smoothing: SmoothingPass {
                passes: WIDTH_SMOOTH_PASSES,
                influence: WIDTH_SMOOTH_INFLUENCE,
            },
            walkway_smoothing: SmoothingPass {
                passes: WALKWAY_SMOOTH_PASSES,
                influence: WALKWAY_SMOOTH_INFLUENCE,
            },
            ridge_smoothing: SmoothingPass {
                passes: RIDGE_SMOOTH_PASSES,
                influence: RIDGE_SMOOTH_INFLUENCE,
            },
            settle_passes: SETTLE_PASSES,
            ridge_smoothed_blend: RIDGE_SMOOTHED_BLEND,
            max_ascent: MAX_ASCENT,
            max_descent: MAX_DESCENT,
            walkway_target_pull: WALKWAY_TARGET_PULL,
            walkway_wiggle: WALKWAY_WIGGLE,
            ridge_margin: RIDGE_MARGIN,
            walkway_ripple: WALKWAY_RIPPLE,
            baseline_y: BASELINE_Y,
            min_walkway_base: MIN_WALKWAY_BASE,
            walkway_thickness: WALKWAY_THICKNESS,
            plateau_thickness: PLATEAU_THICKNESS,
            strip_width_ratio: WALKWAY_WIDTH_RATIO,
            strip_min_half_width: MIN_WALKWAY_HALF,
            strip_bevel_inner: WALKWAY_BEVEL_INNER,
            strip_bevel_outer: WALKWAY_BEVEL_OUTER,
            strip_surface_offset: WALKWAY_SURFACE_OFFSET,
            strip_tile_u: WALKWAY_TILE_U,
            strip_tile_v: WALKWAY_TILE_V,
        }
    }
}

/// Geometric parameters of one time segment
///
/// Invariants after synthesis:
/// `walkway_half_width < plateau_half_width < half_width` and
/// `walkway_height + ridge_margin <= ridge_height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TerrainProfile {
    pub world_x: f32,
    /// Daily record this segment was resampled from
    pub record_index: usize,
    pub cases_norm: f32,
    pub deaths_norm: f32,
    pub ridge_height: f32,
    pub walkway_height: f32,
    pub half_width: f32,
    pub walkway_half_width: f32,
    pub plateau_half_width: f32,
}

/// GPU vertex: position, normal, uv (32 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<TerrainVertex>(), 32);

/// Closed terrain mesh
///
/// The first `top_vertex_count` vertices form the top surface, laid out
/// segment-major: vertex `(segment, lateral)` is at `segment * row + lateral`.
/// The bottom shell mirrors that layout starting at `top_vertex_count`.
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    /// Fully risen top surface heights
    pub target_heights: Vec<f32>,
    /// Pre-reveal top surface heights
    pub baseline_heights: Vec<f32>,
    pub time_segments: usize,
    pub lateral_segments: usize,
    /// Vertices per time segment (`lateral_segments + 1`)
    pub row: usize,
    pub top_vertex_count: usize,
    pub segment_xs: Vec<f32>,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

/// One point of the walkway centerline, indexed by arc length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkwaySample {
    pub position: Vec3,
    /// Underside of the walkway slab
    pub base_y: f32,
    /// Walkable half-width of the paved strip
    pub half_width: f32,
    /// Half-width including the outer bevel
    pub outer_width: f32,
    /// Cumulative horizontal arc length from the first sample
    pub distance: f32,
    /// Unit tangent along increasing distance
    pub forward: Vec3,
}

impl Default for WalkwaySample {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            base_y: 0.0,
            half_width: 6.0,
            outer_width: 8.0,
            distance: 0.0,
            forward: Vec3::X,
        }
    }
}

/// Paved path drawn on top of the walkway band
#[derive(Debug, Clone, Default)]
pub struct WalkwayStrip {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

/// Everything produced by one synthesis run
#[derive(Debug, Clone, Default)]
pub struct TerrainBuild {
    pub profiles: Vec<TerrainProfile>,
    pub mesh: TerrainMesh,
    pub walkway: Vec<WalkwaySample>,
    pub strip: WalkwayStrip,
    pub record_count: usize,
}
