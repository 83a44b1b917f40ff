//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use crate::constants::camera::*;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// How the camera follows the walker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Eye of the walker
    #[default]
    FirstPerson,
    /// Orbiting the walker at a distance
    Orbit,
}

/// Camera data structure - pure data, no methods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera looks at
    pub target: Vec3,

    /// Yaw rotation (radians, around Y axis; 0 looks down +X)
    pub yaw_radians: f32,

    /// Pitch rotation (radians, positive looks up)
    pub pitch_radians: f32,

    /// Field of view (vertical, radians)
    pub fov_radians: f32,

    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,

    /// Near clipping plane distance
    pub near_plane: f32,

    /// Far clipping plane distance
    pub far_plane: f32,

    pub mode: CameraMode,

    /// Orbit distance from the focus point
    pub orbit_distance: f32,
}

/// Camera uniform buffer data for GPU
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View matrix (4x4, column-major)
    pub view_matrix: [[f32; 4]; 4],

    /// Projection matrix (4x4, column-major)
    pub projection_matrix: [[f32; 4]; 4],

    /// View-projection matrix (4x4, column-major)
    pub view_projection_matrix: [[f32; 4]; 4],

    /// Camera position (vec3 + padding)
    pub camera_position: [f32; 4],

    /// Camera forward vector (vec3 + padding)
    pub camera_forward: [f32; 4],

    /// Camera right vector (vec3 + padding)
    pub camera_right: [f32; 4],

    /// Camera up vector (vec3 + padding)
    pub camera_up: [f32; 4],

    /// Near/far planes (vec2 + padding)
    pub planes: [f32; 4],

    /// FOV (radians)
    pub fov: f32,

    /// Aspect ratio
    pub aspect: f32,

    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::X,
            yaw_radians: 0.0,
            pitch_radians: 0.0,
            fov_radians: FOV_DEGREES.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near_plane: NEAR_PLANE,
            far_plane: FAR_PLANE,
            mode: CameraMode::FirstPerson,
            orbit_distance: 30.0,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            projection_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            view_projection_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            camera_position: [0.0, 0.0, 0.0, 1.0],
            camera_forward: [1.0, 0.0, 0.0, 0.0],
            camera_right: [0.0, 0.0, 1.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
            planes: [NEAR_PLANE, FAR_PLANE, 0.0, 0.0],
            fov: FOV_DEGREES.to_radians(),
            aspect: 16.0 / 9.0,
            _padding: [0.0, 0.0],
        }
    }
}

/// Camera configuration for initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Mouse look (radians per pixel)
    pub look_sensitivity: f32,
    /// Touch drag look (radians per pixel)
    pub touch_look_sensitivity: f32,
    pub mode: CameraMode,
    pub orbit_distance: f32,
    pub orbit_min_distance: f32,
    pub orbit_max_distance: f32,
    /// Orbit distance change per wheel pixel
    pub orbit_zoom_step: f32,
    /// Minimum height of the orbit camera above ground
    pub orbit_clearance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: FOV_DEGREES,
            aspect_ratio: 16.0 / 9.0,
            near_plane: NEAR_PLANE,
            far_plane: FAR_PLANE,
            look_sensitivity: LOOK_SENSITIVITY,
            touch_look_sensitivity: TOUCH_LOOK_SENSITIVITY,
            mode: CameraMode::FirstPerson,
            orbit_distance: 30.0,
            orbit_min_distance: ORBIT_MIN_DISTANCE,
            orbit_max_distance: ORBIT_MAX_DISTANCE,
            orbit_zoom_step: ORBIT_ZOOM_STEP,
            orbit_clearance: ORBIT_CLEARANCE,
        }
    }
}
