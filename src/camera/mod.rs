/// Camera Module - Data-Oriented Programming (DOP) style
///
/// This module follows pure DOP principles:
/// - camera_data.rs: Pure data structures with NO methods
/// - camera_operations.rs: Pure functions that operate on data

pub mod camera_data;
pub mod camera_operations;

// Re-export data structures
pub use camera_data::{CameraConfig, CameraData, CameraMode, CameraUniform};

// Re-export all operations
pub use camera_operations::{
    // Initialization
    init_camera_from_config,

    // View/projection
    build_view_matrix,
    build_projection_matrix,
    build_camera_uniform,

    // Updates
    update_aspect_ratio,
    set_camera_mode,
    rotate,
    clamp_pitch,
    zoom_orbit,

    // Following
    follow_first_person,
    follow_orbit,

    // Utilities
    calculate_forward_vector,
    calculate_right_vector,
    calculate_up_vector,
    yaw_from_direction,
    log_camera_context,
};
