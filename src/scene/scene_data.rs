//! Scene data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in scene_operations.rs
//!
//! The scene replaces a process-global store: every subsystem state lives
//! here and is handed explicitly to the operations that need it.

use crate::camera::CameraData;
use crate::config::SerraConfig;
use crate::input::InputState;
use crate::locomotion::LocomotionState;
use crate::reveal::RevealState;
use crate::sampler::SamplerHandle;
use crate::terrain::TerrainBuild;
use crate::timeline::DailyRecord;
use crossbeam_channel::Sender;
use glam::Vec3;

/// Change notifications published to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    TerrainRebuilt { segments: usize, records: usize },
    TerrainCleared,
    DayChanged(usize),
    CameraMoved { position: Vec3, target: Vec3 },
    /// Furthest X with a non-zero reveal target
    RevealAdvanced(f32),
}

/// Everything one running scene owns
///
/// Single writer: only the frame tick and the load/clear operations mutate it.
/// Other threads read terrain heights through `sampler`.
pub struct SceneState {
    pub config: SerraConfig,
    pub records: Vec<DailyRecord>,
    pub terrain: Option<TerrainBuild>,
    pub sampler: SamplerHandle,
    pub reveal: RevealState,
    pub locomotion: LocomotionState,
    pub camera: CameraData,
    pub input: InputState,

    pub current_day: usize,
    /// Monotonic while a series is loaded; reset on rebuild
    pub revealed_x: f32,
    /// Camera pose last sent as `CameraMoved`
    pub published_camera: Option<(Vec3, Vec3)>,
    pub frame_count: u64,

    pub subscribers: Vec<Sender<SceneEvent>>,
}
