//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.
//! No methods, no self, just transformations.

use super::camera_data::{CameraConfig, CameraData, CameraMode, CameraUniform};
use crate::sampler::{sample_height, TerrainSampler};
use glam::{Mat4, Vec3};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize camera from config
pub fn init_camera_from_config(config: &CameraConfig) -> CameraData {
    CameraData {
        fov_radians: config.fov_degrees.to_radians(),
        aspect_ratio: config.aspect_ratio,
        near_plane: config.near_plane,
        far_plane: config.far_plane,
        mode: config.mode,
        orbit_distance: orbit_distance_in_range(config.orbit_distance, config),
        ..Default::default()
    }
}

// ============================================================================
// VIEW/PROJECTION MATRICES
// ============================================================================

/// Build view matrix from camera data
pub fn build_view_matrix(camera: &CameraData) -> Mat4 {
    let target = if (camera.target - camera.position).length_squared() > 1e-8 {
        camera.target
    } else {
        camera.position + calculate_forward_vector(camera.yaw_radians, camera.pitch_radians)
    };
    Mat4::look_at_rh(camera.position, target, Vec3::Y)
}

/// Build projection matrix from camera data
pub fn build_projection_matrix(camera: &CameraData) -> Mat4 {
    Mat4::perspective_rh(
        camera.fov_radians,
        camera.aspect_ratio,
        camera.near_plane,
        camera.far_plane,
    )
}

/// Build camera uniform for GPU
pub fn build_camera_uniform(camera: &CameraData) -> CameraUniform {
    let view_matrix = build_view_matrix(camera);
    let projection_matrix = build_projection_matrix(camera);
    let view_projection = projection_matrix * view_matrix;

    let forward = (camera.target - camera.position)
        .try_normalize()
        .unwrap_or_else(|| calculate_forward_vector(camera.yaw_radians, camera.pitch_radians));
    let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::Z);
    let up = right.cross(forward).normalize_or_zero();

    CameraUniform {
        view_matrix: view_matrix.to_cols_array_2d(),
        projection_matrix: projection_matrix.to_cols_array_2d(),
        view_projection_matrix: view_projection.to_cols_array_2d(),
        camera_position: camera.position.extend(1.0).to_array(),
        camera_forward: forward.extend(0.0).to_array(),
        camera_right: right.extend(0.0).to_array(),
        camera_up: up.extend(0.0).to_array(),
        planes: [camera.near_plane, camera.far_plane, 0.0, 0.0],
        fov: camera.fov_radians,
        aspect: camera.aspect_ratio,
        _padding: [0.0, 0.0],
    }
}

// ============================================================================
// UPDATES
// ============================================================================

/// Update aspect ratio (e.g., on window resize)
pub fn update_aspect_ratio(camera: &CameraData, width: u32, height: u32) -> CameraData {
    let mut new_camera = *camera;
    if width > 0 && height > 0 {
        new_camera.aspect_ratio = width as f32 / height as f32;
    }
    new_camera
}

/// Switch between first-person and orbit
pub fn set_camera_mode(camera: &CameraData, mode: CameraMode) -> CameraData {
    if camera.mode != mode {
        log::info!("[set_camera_mode] {:?} -> {:?}", camera.mode, mode);
    }
    CameraData { mode, ..*camera }
}

/// Rotate camera by yaw/pitch deltas (radians), pitch clamped to +/- `pitch_limit`
pub fn rotate(camera: &CameraData, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) -> CameraData {
    let mut new_camera = *camera;
    new_camera.yaw_radians += yaw_delta;
    new_camera.pitch_radians = clamp_pitch(new_camera.pitch_radians + pitch_delta, pitch_limit);
    new_camera
}

/// Pure function - pitch clamped to a safe look range
pub fn clamp_pitch(pitch: f32, limit: f32) -> f32 {
    let limit = limit.abs().min(std::f32::consts::FRAC_PI_2 - 0.01);
    pitch.clamp(-limit, limit)
}

/// Orbit zoom from a wheel delta
pub fn zoom_orbit(camera: &CameraData, wheel_delta: f32, config: &CameraConfig) -> CameraData {
    let mut new_camera = *camera;
    new_camera.orbit_distance = orbit_distance_in_range(
        camera.orbit_distance + wheel_delta * config.orbit_zoom_step * 0.01,
        config,
    );
    new_camera
}

/// Inverted min/max bounds resolve to the maximum instead of panicking
#[inline]
fn orbit_distance_in_range(distance: f32, config: &CameraConfig) -> f32 {
    distance
        .max(config.orbit_min_distance)
        .min(config.orbit_max_distance)
}

// ============================================================================
// FOLLOWING
// ============================================================================

/// First-person pose at `eye`
pub fn follow_first_person(camera: &CameraData, eye: Vec3, yaw: f32, pitch: f32) -> CameraData {
    CameraData {
        position: eye,
        target: eye + calculate_forward_vector(yaw, pitch),
        yaw_radians: yaw,
        pitch_radians: pitch,
        ..*camera
    }
}

/// Orbit pose around `focus`, kept `clearance` above the ground
pub fn follow_orbit(
    camera: &CameraData,
    focus: Vec3,
    sampler: Option<&TerrainSampler>,
    clearance: f32,
) -> CameraData {
    let forward = calculate_forward_vector(camera.yaw_radians, camera.pitch_radians);
    let mut position = focus - forward * camera.orbit_distance;

    if let Some(sampler) = sampler {
        let floor = sample_height(sampler, position.x, position.z) + clearance;
        position.y = position.y.max(floor);
    }

    CameraData {
        position,
        target: focus,
        ..*camera
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Calculate forward vector from yaw and pitch
pub fn calculate_forward_vector(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// Calculate right vector from yaw
pub fn calculate_right_vector(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, yaw.cos())
}

/// Calculate up vector from yaw and pitch
pub fn calculate_up_vector(yaw: f32, pitch: f32) -> Vec3 {
    let forward = calculate_forward_vector(yaw, pitch);
    let right = calculate_right_vector(yaw);
    right.cross(forward).normalize()
}

/// Pure function - yaw that looks along a direction
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    if direction.x.abs() < 1e-6 && direction.z.abs() < 1e-6 {
        return 0.0;
    }
    direction.z.atan2(direction.x)
}

/// Log camera context for debugging
pub fn log_camera_context(camera: &CameraData) {
    log::debug!(
        "[Camera] mode={:?} pos=({:.2}, {:.2}, {:.2}) yaw={:.1}° pitch={:.1}° orbit={:.1}",
        camera.mode,
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.yaw_radians.to_degrees(),
        camera.pitch_radians.to_degrees(),
        camera.orbit_distance
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::create_terrain_sampler;

    #[test]
    fn test_basis_vectors() {
        let forward = calculate_forward_vector(0.0, 0.0);
        assert!((forward - Vec3::X).length() < 1e-6);
        assert!((calculate_right_vector(0.0) - Vec3::Z).length() < 1e-6);
        assert!((calculate_up_vector(0.0, 0.0) - Vec3::Y).length() < 1e-6);
        assert!((yaw_from_direction(Vec3::Z) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(yaw_from_direction(Vec3::Y), 0.0);
    }

    #[test]
    fn test_rotate_clamps_pitch() {
        let camera = CameraData::default();
        let rotated = rotate(&camera, 0.5, 10.0, 1.2);
        assert_eq!(rotated.yaw_radians, 0.5);
        assert_eq!(rotated.pitch_radians, 1.2);
        let rotated = rotate(&rotated, 0.0, -20.0, 1.2);
        assert_eq!(rotated.pitch_radians, -1.2);
    }

    #[test]
    fn test_orbit_zoom_and_clearance() {
        let config = CameraConfig::default();
        let camera = init_camera_from_config(&config);
        assert_eq!(zoom_orbit(&camera, 1.0e9, &config).orbit_distance, 200.0);
        assert_eq!(zoom_orbit(&camera, -1.0e9, &config).orbit_distance, 5.0);

        // Looking up from below puts the orbit camera under a 50-high plateau
        let plateau = create_terrain_sampler(vec![50.0; 4], 2, 2, -100.0, 100.0, -100.0, 100.0);
        let low = CameraData {
            pitch_radians: 0.5,
            ..camera
        };
        let posed = follow_orbit(&low, Vec3::new(0.0, 52.0, 0.0), Some(&plateau), 1.5);
        assert!(posed.position.y >= 51.5 - 1e-4);
        assert_eq!(posed.target, Vec3::new(0.0, 52.0, 0.0));
    }

    #[test]
    fn test_inverted_orbit_bounds_settle_on_maximum() {
        let config = CameraConfig {
            orbit_min_distance: 80.0,
            orbit_max_distance: 20.0,
            ..CameraConfig::default()
        };
        let camera = init_camera_from_config(&config);
        assert_eq!(camera.orbit_distance, 20.0);
        assert_eq!(zoom_orbit(&camera, -1.0e9, &config).orbit_distance, 20.0);
        assert_eq!(zoom_orbit(&camera, 1.0e9, &config).orbit_distance, 20.0);
    }

    #[test]
    fn test_uniform_matches_pose() {
        let camera = follow_first_person(&CameraData::default(), Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        let uniform = build_camera_uniform(&camera);
        assert_eq!(uniform.camera_position, [1.0, 2.0, 3.0, 1.0]);
        assert!((uniform.camera_forward[0] - 1.0).abs() < 1e-6);
        assert!((uniform.camera_right[2] - 1.0).abs() < 1e-6);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), std::mem::size_of::<CameraUniform>());
    }
}
