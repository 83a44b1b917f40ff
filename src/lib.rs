// Serra Engine - Data-Oriented Programming (DOP) Architecture
//
// A daily case/death timeline becomes a walkable mountain ridge.
// - *_data.rs files hold plain data with no behaviour beyond Default
// - *_operations.rs files hold the pure functions that transform it
// - SceneState ties one running walk together; nothing is global
//
// Typical flow:
// - timeline::parse_timeline_json / load_timeline_file
// - scene::load_series (terrain synthesis, sampler swap)
// - scene::tick once per frame

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Terrain pipeline
pub mod timeline;
pub mod terrain;
pub mod sampler;
pub mod reveal;

// Walker and view
pub mod input;
pub mod locomotion;
pub mod camera;

// Scene consumers and state
pub mod markers;
pub mod scene;

// Re-export commonly used types
pub use config::{load_config, parse_config, SerraConfig};
pub use error::{SerraError, SerraResult};

pub use timeline::{
    load_timeline_file, normalize_series, parse_timeline_json, DailyRecord, NormalizedDay,
    RetryPolicy,
};
pub use terrain::{
    sample_walkway, synthesize_terrain, TerrainBuild, TerrainConfig, TerrainMesh, TerrainVertex,
    WalkwaySample,
};
pub use sampler::{sample_height, SamplerHandle, TerrainSampler};
pub use reveal::{step_reveal, RevealConfig, RevealState};
pub use input::{FrameInput, InputState, Key, Platform};
pub use locomotion::{update_locomotion, LocomotionConfig, LocomotionState, WalkContext};
pub use camera::{CameraConfig, CameraData, CameraMode, CameraUniform};
pub use markers::{EventMarker, MarkerConfig, MemorialPin, MonthlyPlaque};
pub use scene::{create_scene_state, load_series, tick, SceneEvent, SceneState};

// Re-export glam so callers share the math types
pub use glam;
