//! Walkway operations - Pure DOP functions
//!
//! The walkway is parameterized by horizontal arc length. Lookups never fail:
//! an empty profile answers with a degenerate sample at the origin.

use super::mesh_operations::compute_vertex_normals;
use super::terrain_data::{TerrainConfig, TerrainProfile, TerrainVertex, WalkwaySample, WalkwayStrip};
use glam::Vec3;

// ============================================================================
// SAMPLES
// ============================================================================

/// Pure function - half-width of the paved strip for a profile
pub fn strip_half_width(profile: &TerrainProfile, config: &TerrainConfig) -> f32 {
    (profile.walkway_half_width * config.strip_width_ratio).max(config.strip_min_half_width)
}

/// One walkway sample per time segment, with cumulative arc length
pub fn build_walkway_samples(profiles: &[TerrainProfile], config: &TerrainConfig) -> Vec<WalkwaySample> {
    let positions: Vec<Vec3> = profiles
        .iter()
        .map(|p| Vec3::new(p.world_x, p.walkway_height + config.strip_surface_offset, 0.0))
        .collect();

    let mut distance = 0.0f32;
    let mut samples = Vec::with_capacity(profiles.len());

    for (i, profile) in profiles.iter().enumerate() {
        if i > 0 {
            let delta = positions[i] - positions[i - 1];
            distance += Vec3::new(delta.x, 0.0, delta.z).length();
        }

        let prev = positions[i.saturating_sub(1)];
        let next = positions[(i + 1).min(positions.len() - 1)];
        let half_width = strip_half_width(profile, config);

        samples.push(WalkwaySample {
            position: positions[i],
            base_y: profile.walkway_height - config.walkway_thickness,
            half_width,
            outer_width: half_width + config.strip_bevel_outer,
            distance,
            forward: (next - prev).try_normalize().unwrap_or(Vec3::X),
        });
    }

    samples
}

/// Total arc length of the walkway
pub fn walkway_length(samples: &[WalkwaySample]) -> f32 {
    samples.last().map(|s| s.distance).unwrap_or(0.0)
}

/// Interpolated walkway sample at arc length `distance`
///
/// Binary search over the monotonic `distance` field; the query is clamped
/// to `[0, walkway_length]`.
pub fn sample_walkway(samples: &[WalkwaySample], distance: f32) -> WalkwaySample {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return WalkwaySample::default(),
    };

    let d = if distance.is_finite() {
        distance.clamp(0.0, last.distance.max(0.0))
    } else {
        0.0
    };

    let upper = samples.partition_point(|s| s.distance < d);
    if upper == 0 {
        return WalkwaySample { distance: d, ..first };
    }
    if upper >= samples.len() {
        return WalkwaySample { distance: d, ..last };
    }

    let lo = samples[upper - 1];
    let hi = samples[upper];
    let span = (hi.distance - lo.distance).max(1e-6);
    let t = ((d - lo.distance) / span).clamp(0.0, 1.0);

    WalkwaySample {
        position: lo.position.lerp(hi.position, t),
        base_y: lerp(lo.base_y, hi.base_y, t),
        half_width: lerp(lo.half_width, hi.half_width, t),
        outer_width: lerp(lo.outer_width, hi.outer_width, t),
        distance: d,
        forward: (hi.position - lo.position).try_normalize().unwrap_or(Vec3::X),
    }
}

/// Pure function - horizontal right vector for a walkway tangent
pub fn walkway_right(forward: Vec3) -> Vec3 {
    Vec3::new(-forward.z, 0.0, forward.x)
        .try_normalize()
        .unwrap_or(Vec3::Z)
}

// ============================================================================
// DAY <-> DISTANCE
// ============================================================================

/// Arc length at which record `day` sits
pub fn day_to_distance(samples: &[WalkwaySample], day: usize, record_count: usize) -> f32 {
    if record_count <= 1 {
        return 0.0;
    }
    let day = day.min(record_count - 1);
    day as f32 / (record_count - 1) as f32 * walkway_length(samples)
}

/// Record index nearest to arc length `distance`
pub fn distance_to_day(samples: &[WalkwaySample], distance: f32, record_count: usize) -> usize {
    let total = walkway_length(samples);
    if record_count <= 1 || total <= 0.0 || !distance.is_finite() {
        return 0;
    }
    let t = (distance / total).clamp(0.0, 1.0);
    ((t * (record_count - 1) as f32).round() as usize).min(record_count - 1)
}

// ============================================================================
// PAVED STRIP
// ============================================================================

/// Paved strip mesh: six vertices per segment, five quads per span
///
/// Cross-section from -Z to +Z: outer bevel, edge, crown, crown, edge, outer bevel.
pub fn build_walkway_strip(profiles: &[TerrainProfile], config: &TerrainConfig) -> WalkwayStrip {
    let first_x = match profiles.first() {
        Some(p) => p.world_x,
        None => return WalkwayStrip::default(),
    };

    let mut vertices = Vec::with_capacity(profiles.len() * 6);
    for profile in profiles {
        let half = strip_half_width(profile, config);
        let inner = (half - config.strip_bevel_inner).max(half * 0.6);
        let outer = half + config.strip_bevel_outer;
        let edge_y = profile.walkway_height + config.strip_surface_offset * 0.35;
        let crown_y = profile.walkway_height + config.strip_surface_offset;
        let u = (profile.world_x - first_x) * config.strip_tile_u;
        let v = config.strip_tile_v;

        let cross_section = [
            (-outer, edge_y, 0.0),
            (-half, edge_y, v * 0.25),
            (-inner, crown_y, v * 0.55),
            (inner, crown_y, v * 0.55),
            (half, edge_y, v * 0.25),
            (outer, edge_y, 0.0),
        ];
        for (z, y, tex_v) in cross_section {
            vertices.push(TerrainVertex {
                position: [profile.world_x, y, z],
                normal: [0.0, 1.0, 0.0],
                uv: [u, tex_v],
            });
        }
    }

    let mut indices = Vec::with_capacity(profiles.len().saturating_sub(1) * 30);
    for segment in 0..profiles.len().saturating_sub(1) {
        let base = (segment * 6) as u32;
        let next = base + 6;
        for k in 0..5 {
            indices.extend_from_slice(&[
                base + k,
                base + k + 1,
                next + k,
                base + k + 1,
                next + k + 1,
                next + k,
            ]);
        }
    }

    compute_vertex_normals(&mut vertices, &indices);
    WalkwayStrip { vertices, indices }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
