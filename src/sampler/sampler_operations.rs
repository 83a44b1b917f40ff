//! Sampler operations - Pure DOP functions
//!
//! O(1) bilinear height lookups over an immutable grid. Queries outside the
//! bounding box saturate to the boundary.

use super::sampler_data::{SamplerHandle, TerrainSampler};
use crate::terrain::TerrainMesh;
use glam::Vec3;
use std::sync::Arc;

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Build a sampler, sanitizing degenerate input
///
/// Columns and rows are floored at 1, a short height buffer is replaced by
/// zeros, and inverted bounds collapse onto the minimum.
pub fn create_terrain_sampler(
    heights: Vec<f32>,
    columns: usize,
    rows: usize,
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
) -> TerrainSampler {
    let columns = columns.max(1);
    let rows = rows.max(1);
    let heights = if heights.len() >= columns * rows {
        heights
    } else {
        log::warn!(
            "[create_terrain_sampler] Height buffer has {} values, grid needs {}; using zeros",
            heights.len(),
            columns * rows
        );
        vec![0.0; columns * rows]
    };

    TerrainSampler {
        heights,
        columns,
        rows,
        min_x,
        max_x: max_x.max(min_x),
        min_z,
        max_z: max_z.max(min_z),
    }
}

/// Sampler over the fully risen top surface of a mesh
///
/// Returns `None` for an empty mesh.
pub fn sampler_from_mesh(mesh: &TerrainMesh) -> Option<TerrainSampler> {
    if mesh.time_segments == 0 || mesh.row == 0 {
        return None;
    }
    Some(create_terrain_sampler(
        mesh.target_heights.clone(),
        mesh.time_segments,
        mesh.row,
        mesh.min_x,
        mesh.max_x,
        mesh.min_z,
        mesh.max_z,
    ))
}

// ============================================================================
// QUERIES
// ============================================================================

#[inline]
fn height_at(sampler: &TerrainSampler, column: usize, row: usize) -> f32 {
    let c = column.min(sampler.columns - 1);
    let r = row.min(sampler.rows - 1);
    sampler.heights.get(c * sampler.rows + r).copied().unwrap_or(0.0)
}

#[inline]
fn grid_coordinate(value: f32, min: f32, max: f32, cells: usize) -> f32 {
    if cells <= 1 || value.is_nan() {
        return 0.0;
    }
    let range = (max - min).max(1e-5);
    (value.clamp(min, max) - min) / range * (cells - 1) as f32
}

/// Bilinear ground height at world `(x, z)`
pub fn sample_height(sampler: &TerrainSampler, x: f32, z: f32) -> f32 {
    if sampler.heights.is_empty() {
        return 0.0;
    }

    let column_f = grid_coordinate(x, sampler.min_x, sampler.max_x, sampler.columns);
    let row_f = grid_coordinate(z, sampler.min_z, sampler.max_z, sampler.rows);

    let c0 = column_f.floor() as usize;
    let r0 = row_f.floor() as usize;
    let tx = column_f - c0 as f32;
    let tz = row_f - r0 as f32;

    let h00 = height_at(sampler, c0, r0);
    let h10 = height_at(sampler, c0 + 1, r0);
    let h01 = height_at(sampler, c0, r0 + 1);
    let h11 = height_at(sampler, c0 + 1, r0 + 1);

    let near = h00 + (h10 - h00) * tx;
    let far = h01 + (h11 - h01) * tx;
    near + (far - near) * tz
}

/// Ground normal at `(x, z)` from central differences
///
/// Falls back to +Y if the gradient is degenerate.
pub fn sample_normal(sampler: &TerrainSampler, x: f32, z: f32, step: f32) -> Vec3 {
    let step = step.abs().max(1e-3);
    let left = sample_height(sampler, x - step, z);
    let right = sample_height(sampler, x + step, z);
    let back = sample_height(sampler, x, z - step);
    let front = sample_height(sampler, x, z + step);

    Vec3::new(left - right, 2.0 * step, back - front)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// Empty handle: samples 0 until a snapshot is installed
pub fn create_sampler_handle() -> SamplerHandle {
    SamplerHandle::default()
}

/// Swap in a new snapshot
pub fn install_sampler(handle: &SamplerHandle, sampler: TerrainSampler) {
    log::info!(
        "[install_sampler] Installing {}x{} height grid, x [{:.2}, {:.2}] z [{:.2}, {:.2}]",
        sampler.columns,
        sampler.rows,
        sampler.min_x,
        sampler.max_x,
        sampler.min_z,
        sampler.max_z
    );
    *handle.slot.write() = Some(Arc::new(sampler));
}

/// Drop the current snapshot
pub fn clear_sampler(handle: &SamplerHandle) {
    if handle.slot.write().take().is_some() {
        log::info!("[clear_sampler] Sampler snapshot released");
    }
}

/// Current snapshot, if any
pub fn sampler_snapshot(handle: &SamplerHandle) -> Option<Arc<TerrainSampler>> {
    handle.slot.read().clone()
}

/// `sample_height` through the handle; 0 with no snapshot installed
pub fn handle_sample_height(handle: &SamplerHandle, x: f32, z: f32) -> f32 {
    sampler_snapshot(handle)
        .map(|sampler| sample_height(&sampler, x, z))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 columns (x = 0, 5, 10) by 2 rows (z = -1, 1); height = column * 10 + row
    fn grid() -> TerrainSampler {
        create_terrain_sampler(vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0], 3, 2, 0.0, 10.0, -1.0, 1.0)
    }

    #[test]
    fn test_grid_points_and_bilinear_interpolation() {
        let sampler = grid();
        assert_eq!(sample_height(&sampler, 0.0, -1.0), 0.0);
        assert_eq!(sample_height(&sampler, 5.0, 1.0), 11.0);
        assert_eq!(sample_height(&sampler, 10.0, 1.0), 21.0);
        assert!((sample_height(&sampler, 2.5, 0.0) - 5.5).abs() < 1e-5);
        assert!((sample_height(&sampler, 7.5, -1.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_range_saturates_to_boundary() {
        let sampler = grid();
        assert_eq!(sample_height(&sampler, -500.0, -500.0), sample_height(&sampler, 0.0, -1.0));
        assert_eq!(sample_height(&sampler, 1.0e9, 3.0), sample_height(&sampler, 10.0, 1.0));
        assert_eq!(sample_height(&sampler, 7.5, 99.0), sample_height(&sampler, 7.5, 1.0));
        assert_eq!(
            sample_height(&sampler, f32::INFINITY, f32::NEG_INFINITY),
            sample_height(&sampler, 10.0, -1.0)
        );
    }

    #[test]
    fn test_degenerate_construction() {
        let short = create_terrain_sampler(vec![1.0], 4, 4, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(short.heights.len(), 16);
        assert_eq!(sample_height(&short, 0.5, 0.5), 0.0);

        let single = create_terrain_sampler(vec![3.0], 0, 0, 2.0, 1.0, 0.0, 0.0);
        assert_eq!(single.columns, 1);
        assert_eq!(sample_height(&single, 100.0, -100.0), 3.0);
        assert_eq!(sample_height(&single, f32::NAN, 0.0), 3.0);
    }

    #[test]
    fn test_normal_on_slope() {
        // Height rises 2 per unit of x
        let sampler = create_terrain_sampler(vec![0.0, 0.0, 20.0, 20.0], 2, 2, 0.0, 10.0, 0.0, 10.0);
        let normal = sample_normal(&sampler, 5.0, 5.0, 0.5);
        let expected = Vec3::new(-2.0, 1.0, 0.0).normalize();
        assert!((normal - expected).length() < 1e-4);

        let flat = create_terrain_sampler(vec![4.0; 4], 2, 2, 0.0, 1.0, 0.0, 1.0);
        assert!((sample_normal(&flat, 0.5, 0.5, 0.5) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_handle_swap_and_clear() {
        let handle = create_sampler_handle();
        assert_eq!(handle_sample_height(&handle, 1.0, 1.0), 0.0);

        install_sampler(&handle, grid());
        let before = sampler_snapshot(&handle).unwrap();
        assert_eq!(handle_sample_height(&handle, 10.0, 1.0), 21.0);

        install_sampler(&handle, create_terrain_sampler(vec![7.0], 1, 1, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(handle_sample_height(&handle, 10.0, 1.0), 7.0);
        // Old snapshot is untouched by the swap
        assert_eq!(sample_height(&before, 10.0, 1.0), 21.0);

        clear_sampler(&handle);
        assert!(sampler_snapshot(&handle).is_none());
    }

    #[test]
    fn test_centerline_height_matches_walkway_for_three_day_series() {
        let records = crate::timeline::parse_timeline_json(
            r#"[
                {"date": "2020-01-01", "cases": 10, "deaths": 0},
                {"date": "2020-01-02", "cases": 50, "deaths": 5},
                {"date": "2020-01-03", "cases": 20, "deaths": 1}
            ]"#,
        )
        .unwrap();
        let build = crate::terrain::synthesize_terrain(
            &records,
            &crate::timeline::NormalizerConfig::default(),
            &crate::terrain::TerrainConfig::default(),
            "centerline",
        );
        let sampler = sampler_from_mesh(&build.mesh).unwrap();

        let segment_two = &build.profiles[2];
        let height = sample_height(&sampler, segment_two.world_x, 0.0);
        assert!((height - segment_two.walkway_height).abs() < 1e-3);

        for profile in &build.profiles {
            let height = sample_height(&sampler, profile.world_x, 0.0);
            assert!((height - profile.walkway_height).abs() < 1e-3, "{:?}", profile);
        }
    }

    #[test]
    fn test_concurrent_readers() {
        let handle = create_sampler_handle();
        install_sampler(&handle, grid());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let reader = handle.clone();
                scope.spawn(move || {
                    for _ in 0..1000 {
                        let h = handle_sample_height(&reader, 5.0, 1.0);
                        assert!(h == 11.0 || h == 7.0);
                    }
                });
            }
            install_sampler(&handle, create_terrain_sampler(vec![7.0], 1, 1, 0.0, 0.0, 0.0, 0.0));
        });
    }
}
