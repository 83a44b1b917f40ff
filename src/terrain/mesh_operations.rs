//! Mesh operations - Pure DOP functions
//!
//! Turns segment profiles into a closed, indexed heightfield mesh: a top
//! surface shaped by three lateral zones, a bottom shell, and skirts on all
//! four borders. Triangles wind counter-clockwise seen from outside.

use super::noise_field::{create_noise_field, noise2, noise3, NoiseField};
use super::profile_operations::{build_profiles, lerp};
use super::terrain_data::{TerrainBuild, TerrainConfig, TerrainMesh, TerrainProfile, TerrainVertex};
use super::walkway_operations::{build_walkway_samples, build_walkway_strip};
use crate::timeline::{normalize_series, DailyRecord, NormalizerConfig};
use glam::Vec3;
use rayon::prelude::*;

// ============================================================================
// SYNTHESIS ENTRY POINT
// ============================================================================

/// Run the whole synthesis pipeline for a validated series
///
/// An empty series yields an empty build (zero-length mesh, no walkway).
pub fn synthesize_terrain(
    records: &[DailyRecord],
    normalizer: &NormalizerConfig,
    config: &TerrainConfig,
    seed: &str,
) -> TerrainBuild {
    if records.is_empty() {
        log::warn!("[synthesize_terrain] Empty series, producing empty terrain");
        return TerrainBuild::default();
    }

    let normalized = normalize_series(records, normalizer);
    let noise = create_noise_field(seed);
    let profiles = build_profiles(&normalized, &noise, config);
    let mesh = build_terrain_mesh(&profiles, &noise, config);
    let walkway = build_walkway_samples(&profiles, config);
    let strip = build_walkway_strip(&profiles, config);

    log::info!(
        "[synthesize_terrain] {} records -> {} segments, {} vertices, {} triangles, walkway length {:.2}",
        records.len(),
        mesh.time_segments,
        mesh.vertices.len(),
        mesh.indices.len() / 3,
        walkway.last().map(|s| s.distance).unwrap_or(0.0)
    );

    TerrainBuild {
        profiles,
        mesh,
        walkway,
        strip,
        record_count: records.len(),
    }
}

// ============================================================================
// CROSS SECTION
// ============================================================================

/// Pure function - lateral position of grid row `lateral`
///
/// Even `lateral_segments` puts the middle row exactly on z = 0.
pub fn lateral_z(lateral: usize, lateral_segments: usize, extent: f32) -> f32 {
    let segments = lateral_segments.max(1) as f32;
    extent * ((2 * lateral) as f32 - segments) / segments
}

/// Pure function - fully risen surface height at lateral position `z`
pub fn cross_section_height(
    profile: &TerrainProfile,
    segment: usize,
    z: f32,
    noise: &NoiseField,
    config: &TerrainConfig,
) -> f32 {
    let x = profile.world_x;
    let dist = z.abs();
    let walkway = profile.walkway_height;
    let ridge = profile.ridge_height;
    let plateau_range = (profile.plateau_half_width - profile.walkway_half_width).max(0.001);
    let ramp_range = (profile.half_width - profile.plateau_half_width).max(0.001);

    if dist <= profile.walkway_half_width {
        // Ripple fades to nothing on the centerline
        let ripple = noise2(noise, x * 0.1, segment as f32 * 0.022) * config.walkway_ripple;
        return walkway + ripple * (dist / profile.walkway_half_width.max(0.001));
    }

    let primary_fold = noise3(noise, x * 0.035, z * 0.045, segment as f32 * 0.02);
    let secondary_fold = noise3(noise, x * 0.12 + 50.0, z * 0.12, segment as f32 * 0.05);

    if dist <= profile.plateau_half_width {
        let center_t = (dist - profile.walkway_half_width) / plateau_range;
        let plateau_ease = 1.0 - center_t * center_t * 0.18;
        let undulation = ((x * 0.22 + z * 0.06).sin() * 0.22 + (x * 0.14 + z * 0.18).cos() * 0.16)
            * (1.0 - center_t);
        let folds = (primary_fold * 2.4 + secondary_fold * 1.1) * (1.0 - center_t);
        return lerp(walkway, ridge, plateau_ease) + undulation + folds;
    }

    let outer_t = ((dist - profile.plateau_half_width) / ramp_range).clamp(0.0, 1.0);
    let falloff = 1.0 - smoothstep(outer_t);
    let shoulder = 1.0 - (dist / profile.half_width).clamp(0.0, 1.0);
    let broken_edge = ((x * 0.18 + dist * 0.12).sin() + (x * 0.26 + z * 0.2).cos())
        * 0.22
        * shoulder
        * (1.0 - falloff);
    let folds = (primary_fold * 3.2 + secondary_fold * 1.8) * shoulder * (1.0 - falloff);

    falloff * ridge + broken_edge + folds
}

/// Pure function - pre-reveal height at lateral position `z`
///
/// A slab under the walkway, tapering across the plateau, flat elsewhere.
pub fn baseline_height(profile: &TerrainProfile, z: f32, config: &TerrainConfig) -> f32 {
    let dist = z.abs();
    let walkway = profile.walkway_height;
    let plateau_range = profile.plateau_half_width - profile.walkway_half_width;

    let base = if dist <= profile.walkway_half_width {
        walkway - config.walkway_thickness
    } else if dist <= profile.plateau_half_width && plateau_range > 1e-5 {
        let t = ((dist - profile.walkway_half_width) / plateau_range).clamp(0.0, 1.0);
        lerp(walkway - config.plateau_thickness, config.baseline_y, t * t)
    } else {
        config.baseline_y
    };

    base.min(walkway - 0.1).max(config.min_walkway_base)
}

// ============================================================================
// MESH
// ============================================================================

/// Build the closed terrain mesh
///
/// The top surface starts at its baseline; the reveal animator raises it.
pub fn build_terrain_mesh(
    profiles: &[TerrainProfile],
    noise: &NoiseField,
    config: &TerrainConfig,
) -> TerrainMesh {
    let segments = profiles.len();
    if segments == 0 {
        return TerrainMesh::default();
    }

    let lateral_segments = config.lateral_segments.max(2);
    let row = lateral_segments + 1;
    let top_vertex_count = segments * row;
    let extent = config.max_half_width;
    let u_scale = 1.0 / (segments.max(2) - 1) as f32;

    let mut target_heights = vec![0.0f32; top_vertex_count];
    let mut baseline_heights = vec![0.0f32; top_vertex_count];

    // Rows are independent, so the parallel result matches a serial run
    target_heights
        .par_chunks_mut(row)
        .zip(baseline_heights.par_chunks_mut(row))
        .enumerate()
        .for_each(|(segment, (targets, baselines))| {
            let profile = &profiles[segment];
            for lateral in 0..row {
                let z = lateral_z(lateral, lateral_segments, extent);
                targets[lateral] = cross_section_height(profile, segment, z, noise, config);
                baselines[lateral] = baseline_height(profile, z, config);
            }
        });

    let mut vertices = Vec::with_capacity(top_vertex_count * 2);
    for (segment, profile) in profiles.iter().enumerate() {
        for lateral in 0..row {
            let z = lateral_z(lateral, lateral_segments, extent);
            vertices.push(TerrainVertex {
                position: [profile.world_x, baseline_heights[segment * row + lateral], z],
                normal: [0.0, 1.0, 0.0],
                uv: [segment as f32 * u_scale, lateral as f32 / lateral_segments as f32],
            });
        }
    }
    for index in 0..top_vertex_count {
        let top = vertices[index];
        vertices.push(TerrainVertex {
            position: [
                top.position[0],
                target_heights[index].min(config.baseline_y),
                top.position[2],
            ],
            normal: [0.0, -1.0, 0.0],
            uv: top.uv,
        });
    }

    let indices = build_closed_indices(segments, lateral_segments);

    let mut mesh = TerrainMesh {
        vertices,
        indices,
        target_heights,
        baseline_heights,
        time_segments: segments,
        lateral_segments,
        row,
        top_vertex_count,
        segment_xs: profiles.iter().map(|p| p.world_x).collect(),
        min_x: profiles[0].world_x,
        max_x: profiles[segments - 1].world_x,
        min_z: -extent,
        max_z: extent,
    };
    compute_vertex_normals(&mut mesh.vertices, &mesh.indices);
    mesh
}

/// Index buffer for top, bottom, side skirts and end caps
pub fn build_closed_indices(segments: usize, lateral_segments: usize) -> Vec<u32> {
    if segments < 2 || lateral_segments == 0 {
        return Vec::new();
    }

    let row = lateral_segments + 1;
    let bottom = (segments * row) as u32;
    let quads = (segments - 1) * lateral_segments * 2 + (segments - 1) * 2 + lateral_segments * 2;
    let mut indices = Vec::with_capacity(quads * 6);
    let at = |segment: usize, lateral: usize| (segment * row + lateral) as u32;

    for i in 0..segments - 1 {
        for j in 0..lateral_segments {
            let a = at(i, j);
            let b = at(i, j + 1);
            let c = at(i + 1, j);
            let d = at(i + 1, j + 1);
            // Top faces up
            indices.extend_from_slice(&[a, b, c, b, d, c]);
            // Bottom faces down
            indices.extend_from_slice(&[a + bottom, c + bottom, b + bottom]);
            indices.extend_from_slice(&[b + bottom, c + bottom, d + bottom]);
        }
    }

    for i in 0..segments - 1 {
        // -Z side
        let a = at(i, 0);
        let c = at(i + 1, 0);
        indices.extend_from_slice(&[a, c, c + bottom, a, c + bottom, a + bottom]);

        // +Z side
        let a = at(i, lateral_segments);
        let c = at(i + 1, lateral_segments);
        indices.extend_from_slice(&[c, a, a + bottom, c, a + bottom, c + bottom]);
    }

    for j in 0..lateral_segments {
        // -X end
        let a = at(0, j);
        let b = at(0, j + 1);
        indices.extend_from_slice(&[b, a, a + bottom, b, a + bottom, b + bottom]);

        // +X end
        let a = at(segments - 1, j);
        let b = at(segments - 1, j + 1);
        indices.extend_from_slice(&[a, b, b + bottom, a, b + bottom, a + bottom]);
    }

    indices
}

/// Area-weighted vertex normals; isolated or degenerate vertices get +Y
pub fn compute_vertex_normals(vertices: &mut [TerrainVertex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let pa = Vec3::from(vertices[a].position);
        let pb = Vec3::from(vertices[b].position);
        let pc = Vec3::from(vertices[c].position);
        let face = (pb - pa).cross(pc - pa);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    for (vertex, normal) in vertices.iter_mut().zip(accumulated) {
        vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y).to_array();
    }
}

/// Pure function - index of top vertex `(segment, lateral)`
#[inline]
pub fn top_vertex_index(mesh: &TerrainMesh, segment: usize, lateral: usize) -> usize {
    segment * mesh.row + lateral
}

/// Pure function - cubic smoothstep on [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::records_from_raw;
    use crate::timeline::RawRecord;

    fn small_config() -> TerrainConfig {
        TerrainConfig {
            lateral_segments: 40,
            ..TerrainConfig::default()
        }
    }

    fn records(values: &[(u64, u64)]) -> Vec<DailyRecord> {
        let raw: Vec<RawRecord> = values
            .iter()
            .enumerate()
            .map(|(i, &(cases, deaths))| RawRecord {
                date: format!("2020-01-{:02}", i + 1),
                cases,
                deaths,
            })
            .collect();
        records_from_raw(&raw).unwrap()
    }

    #[test]
    fn test_empty_series_gives_empty_build() {
        let build = synthesize_terrain(&[], &NormalizerConfig::default(), &small_config(), "seed");
        assert!(build.mesh.vertices.is_empty());
        assert!(build.mesh.indices.is_empty());
        assert!(build.walkway.is_empty());
        assert_eq!(build.record_count, 0);
    }

    #[test]
    fn test_mesh_layout_and_closure() {
        let config = small_config();
        let build = synthesize_terrain(
            &records(&[(10, 0), (50, 5), (20, 1)]),
            &NormalizerConfig::default(),
            &config,
            "layout",
        );
        let mesh = &build.mesh;
        let n = mesh.time_segments;
        let lat = mesh.lateral_segments;

        assert_eq!(n, 90);
        assert_eq!(mesh.row, lat + 1);
        assert_eq!(mesh.vertices.len(), 2 * n * (lat + 1));
        assert_eq!(mesh.target_heights.len(), mesh.top_vertex_count);
        let expected_quads = 2 * (n - 1) * lat + 2 * (n - 1) + 2 * lat;
        assert_eq!(mesh.indices.len(), expected_quads * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        assert_eq!(lateral_z(lat / 2, lat, config.max_half_width), 0.0);

        // Every edge of a closed mesh is shared by exactly two triangles
        let mut edges = std::collections::HashMap::new();
        for tri in mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *edges.entry((a.min(b), a.max(b))).or_insert(0u32) += 1;
            }
        }
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn test_top_faces_up_when_risen() {
        let mut vertices: Vec<TerrainVertex> = (0..3)
            .flat_map(|i| {
                (0..3).map(move |j| TerrainVertex {
                    position: [i as f32, 0.0, j as f32],
                    ..Default::default()
                })
            })
            .collect();
        let bottom: Vec<TerrainVertex> = vertices
            .iter()
            .map(|v| TerrainVertex {
                position: [v.position[0], -1.0, v.position[2]],
                ..Default::default()
            })
            .collect();
        vertices.extend(bottom);
        let indices = build_closed_indices(3, 2);
        compute_vertex_normals(&mut vertices, &indices);

        // Center top vertex only touches top triangles
        assert!((vertices[4].normal[1] - 1.0).abs() < 1e-5);
        assert!((vertices[9 + 4].normal[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let series = records(&[(3, 0), (40, 2), (90, 7), (60, 9), (20, 3), (5, 1)]);
        let config = small_config();
        let a = synthesize_terrain(&series, &NormalizerConfig::default(), &config, "same-seed");
        let b = synthesize_terrain(&series, &NormalizerConfig::default(), &config, "same-seed");
        assert_eq!(a.mesh.target_heights, b.mesh.target_heights);
        assert_eq!(a.mesh.baseline_heights, b.mesh.baseline_heights);
        assert_eq!(a.profiles, b.profiles);
    }

    #[test]
    fn test_centerline_matches_walkway_height() {
        let config = small_config();
        let build = synthesize_terrain(
            &records(&[(10, 0), (50, 5), (20, 1)]),
            &NormalizerConfig::default(),
            &config,
            "centerline",
        );
        let mesh = &build.mesh;
        let center = mesh.lateral_segments / 2;
        for (segment, profile) in build.profiles.iter().enumerate() {
            let height = mesh.target_heights[top_vertex_index(mesh, segment, center)];
            assert!((height - profile.walkway_height).abs() < 1e-5);
        }
    }

    #[test]
    fn test_baseline_stays_below_walkway() {
        let config = TerrainConfig::default();
        let profile = TerrainProfile {
            walkway_height: 12.0,
            ridge_height: 20.0,
            half_width: 40.0,
            walkway_half_width: 10.0,
            plateau_half_width: 20.0,
            ..Default::default()
        };
        for z in [0.0, 5.0, 15.0, 30.0, 70.0] {
            let base = baseline_height(&profile, z, &config);
            assert!(base <= profile.walkway_height - 0.1);
            assert!(base >= config.min_walkway_base);
        }
        assert_eq!(baseline_height(&profile, 0.0, &config), 7.0);
    }
}
