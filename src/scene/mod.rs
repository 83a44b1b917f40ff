/// Scene Module - explicit state for one running walk
///
/// - scene_data.rs: SceneState and SceneEvent (NO methods)
/// - scene_operations.rs: load, tick, clear, change notification

pub mod scene_data;
pub mod scene_operations;

pub use scene_data::{SceneEvent, SceneState};
pub use scene_operations::{
    advance_frame, clear_scene, create_scene_state, load_series, load_timeline_json, publish,
    set_scene_camera_mode, subscribe, tick,
};
