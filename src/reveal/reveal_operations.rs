//! Reveal Operations - Pure DOP Functions
//!
//! Segments rise from their baseline to their target heights as the viewer
//! approaches along X, and sink back when it moves away.

use super::reveal_data::{RevealConfig, RevealState, RevealStep, SegmentPhase};
use crate::terrain::{compute_vertex_normals, smoothstep, TerrainMesh};

/// Create reveal state with every segment dormant
pub fn create_reveal_state(segment_count: usize) -> RevealState {
    RevealState {
        progress: vec![0.0; segment_count],
        targets: vec![0.0; segment_count],
        ..Default::default()
    }
}

/// Eased height blend factor for a progress value
#[inline]
pub fn ease_height(progress: f32) -> f32 {
    smoothstep(progress)
}

/// Frame-rate independent exponential approach
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, delta_time: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * delta_time).exp())
}

/// Pure function - reveal target for a segment at `segment_x`
pub fn reveal_target(segment_x: f32, viewer_x: f32, config: &RevealConfig) -> f32 {
    let delta = segment_x - viewer_x;
    let distance = if config.retain_behind && delta <= 0.0 {
        0.0
    } else {
        delta.abs()
    };

    if distance <= config.active_radius {
        1.0
    } else if distance <= config.active_radius + config.falloff_radius {
        let t = (distance - config.active_radius) / config.falloff_radius.max(1e-3);
        1.0 - smoothstep(t)
    } else {
        0.0
    }
}

/// Retarget every segment for the viewer position
///
/// Segments whose target moved by more than `target_epsilon` become active.
/// Returns the furthest segment X with a non-zero target.
pub fn update_reveal_targets(
    state: &mut RevealState,
    segment_xs: &[f32],
    viewer_x: f32,
    config: &RevealConfig,
) -> Option<f32> {
    let mut revealed_x: Option<f32> = None;

    for (segment, &x) in segment_xs.iter().enumerate().take(state.targets.len()) {
        let target = reveal_target(x, viewer_x, config);

        if (state.targets[segment] - target).abs() > config.target_epsilon {
            state.targets[segment] = target;
            state.active.insert(segment);
        }

        if target > 0.0 {
            revealed_x = Some(revealed_x.map_or(x, |furthest| furthest.max(x)));
        }
    }

    revealed_x
}

/// Advance active segments and write their vertex heights
///
/// Cost scales with the number of active segments. Normals are recomputed
/// at most every `normals_interval` seconds, and once more when motion stops.
pub fn step_reveal(
    state: &mut RevealState,
    mesh: &mut TerrainMesh,
    delta_time: f32,
    config: &RevealConfig,
) -> RevealStep {
    let mut step = RevealStep::default();
    if state.active.is_empty() && !state.normals_dirty {
        state.normals_timer = (state.normals_timer - delta_time).max(0.0);
        return step;
    }

    let row = mesh.row;
    let progress = &mut state.progress;
    let targets = &state.targets;

    state.active.retain(|&segment| {
        let (Some(current), Some(&target)) = (progress.get(segment).copied(), targets.get(segment))
        else {
            return false;
        };

        let next = damp(current, target, config.approach_rate, delta_time);
        let mut value = if (next - current).abs() < config.progress_epsilon {
            target
        } else {
            next
        };
        if (value - target).abs() < config.progress_epsilon {
            value = target;
        }
        progress[segment] = value;

        let eased = ease_height(value);
        let start = segment * row;
        let end = (start + row).min(mesh.top_vertex_count);
        for index in start..end {
            let base = mesh.baseline_heights[index];
            let full = mesh.target_heights[index];
            mesh.vertices[index].position[1] = base + (full - base) * eased;
        }
        step.segments_touched += 1;

        let done = value == target;
        if done {
            step.segments_completed += 1;
        }
        !done
    });

    if step.segments_touched > 0 {
        state.normals_dirty = true;
        state.normals_timer += delta_time;
    }

    let settled = state.active.is_empty();
    if state.normals_dirty && (state.normals_timer >= config.normals_interval || settled) {
        compute_vertex_normals(&mut mesh.vertices, &mesh.indices);
        state.normals_timer = 0.0;
        state.normals_dirty = false;
        step.normals_recomputed = true;
    }

    log::trace!(
        "[step_reveal] touched {} completed {} active {}",
        step.segments_touched,
        step.segments_completed,
        state.active.len()
    );

    step
}

/// Phase of one segment
pub fn segment_phase(state: &RevealState, segment: usize) -> SegmentPhase {
    let progress = state.progress.get(segment).copied().unwrap_or(0.0);
    let target = state.targets.get(segment).copied().unwrap_or(0.0);

    if state.active.contains(&segment) && progress != target {
        if target > progress {
            SegmentPhase::Rising
        } else {
            SegmentPhase::Falling
        }
    } else if progress <= 0.0 {
        SegmentPhase::Dormant
    } else {
        SegmentPhase::Risen
    }
}

/// Current height of top vertex `(segment, lateral)`
pub fn current_vertex_height(mesh: &TerrainMesh, segment: usize, lateral: usize) -> Option<f32> {
    mesh.vertices
        .get(segment * mesh.row + lateral)
        .filter(|_| lateral < mesh.row)
        .map(|v| v.position[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{synthesize_terrain, TerrainConfig};
    use crate::timeline::{records_from_raw, NormalizerConfig, RawRecord};

    fn small_mesh() -> TerrainMesh {
        let raw: Vec<RawRecord> = (0..12)
            .map(|i| RawRecord {
                date: format!("2021-03-{:02}", i + 1),
                cases: 10 + i * 7,
                deaths: i % 4,
            })
            .collect();
        let config = TerrainConfig {
            lateral_segments: 8,
            ..TerrainConfig::default()
        };
        synthesize_terrain(
            &records_from_raw(&raw).unwrap(),
            &NormalizerConfig::default(),
            &config,
            "reveal",
        )
        .mesh
    }

    fn tight_config() -> RevealConfig {
        RevealConfig {
            active_radius: 10.0,
            falloff_radius: 10.0,
            ..RevealConfig::default()
        }
    }

    #[test]
    fn test_target_bands() {
        let config = tight_config();
        assert_eq!(reveal_target(5.0, 0.0, &config), 1.0);
        assert_eq!(reveal_target(-10.0, 0.0, &config), 1.0);
        assert!((reveal_target(15.0, 0.0, &config) - 0.5).abs() < 1e-6);
        assert_eq!(reveal_target(25.0, 0.0, &config), 0.0);
        assert_eq!(reveal_target(-40.0, 0.0, &config), 0.0);

        let retaining = RevealConfig {
            retain_behind: true,
            ..tight_config()
        };
        assert_eq!(reveal_target(-40.0, 0.0, &retaining), 1.0);
    }

    #[test]
    fn test_damp_converges_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..600 {
            let next = damp(value, 1.0, 2.0, 1.0 / 60.0);
            assert!(next >= value && next <= 1.0);
            value = next;
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_segments_rise_to_target_and_go_idle() {
        let mut mesh = small_mesh();
        let config = tight_config();
        let mut state = create_reveal_state(mesh.time_segments);

        let revealed = update_reveal_targets(&mut state, &mesh.segment_xs, -50.0, &config);
        assert!(revealed.unwrap() < -30.0);
        assert!(!state.active.is_empty());
        assert!(state.active.len() < mesh.time_segments);

        let first = *state.active.iter().next().unwrap();
        step_reveal(&mut state, &mut mesh, 1.0 / 60.0, &config);
        assert_eq!(segment_phase(&state, first), SegmentPhase::Rising);
        assert_eq!(segment_phase(&state, mesh.time_segments - 1), SegmentPhase::Dormant);

        let mut recomputed = false;
        for _ in 0..1200 {
            recomputed |= step_reveal(&mut state, &mut mesh, 1.0 / 60.0, &config).normals_recomputed;
        }
        assert!(recomputed);
        assert!(state.active.is_empty());
        assert!(!state.normals_dirty);
        assert_eq!(segment_phase(&state, 0), SegmentPhase::Risen);

        let center = mesh.lateral_segments / 2;
        let height = current_vertex_height(&mesh, 0, center).unwrap();
        assert!((height - mesh.target_heights[center]).abs() < 1e-4);

        // Untouched segments keep their baseline
        let last = mesh.time_segments - 1;
        let idx = last * mesh.row + center;
        assert_eq!(mesh.vertices[idx].position[1], mesh.baseline_heights[idx]);
    }

    #[test]
    fn test_segments_fall_when_viewer_leaves() {
        let mut mesh = small_mesh();
        let config = tight_config();
        let mut state = create_reveal_state(mesh.time_segments);

        update_reveal_targets(&mut state, &mesh.segment_xs, -50.0, &config);
        for _ in 0..1200 {
            step_reveal(&mut state, &mut mesh, 1.0 / 60.0, &config);
        }
        update_reveal_targets(&mut state, &mesh.segment_xs, 50.0, &config);
        step_reveal(&mut state, &mut mesh, 1.0 / 60.0, &config);
        assert_eq!(segment_phase(&state, 0), SegmentPhase::Falling);

        for _ in 0..1200 {
            step_reveal(&mut state, &mut mesh, 1.0 / 60.0, &config);
        }
        assert_eq!(segment_phase(&state, 0), SegmentPhase::Dormant);
        assert_eq!(segment_phase(&state, mesh.time_segments - 1), SegmentPhase::Risen);
    }

    #[test]
    fn test_idle_step_touches_nothing() {
        let mut mesh = small_mesh();
        let mut state = create_reveal_state(mesh.time_segments);
        let before = mesh.vertices.clone();
        let step = step_reveal(&mut state, &mut mesh, 0.016, &tight_config());
        assert_eq!(step, RevealStep::default());
        assert_eq!(mesh.vertices, before);
    }
}
