//! Locomotion data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in locomotion_operations.rs

use crate::constants::{camera::PITCH_LIMIT, locomotion::*};
use crate::sampler::TerrainSampler;
use crate::terrain::WalkwaySample;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Walker tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Arc-length speed at full forward intent (units/s)
    pub walk_speed: f32,
    pub sprint_multiplier: f32,
    /// Lateral speed at full strafe intent (units/s)
    pub strafe_speed: f32,
    /// Clearance kept from the walkway edge
    pub lateral_margin: f32,
    pub desktop_damping: f32,
    pub touch_damping: f32,
    pub eye_height: f32,
    pub gravity: f32,
    /// Damping rate when the ground rises under the walker
    pub step_up_rate: f32,
    /// Arc length per wheel pixel
    pub wheel_step: f32,
    /// Arc length per touch-drag pixel
    pub touch_drag_step: f32,
    pub pitch_limit: f32,
    pub head_bob_amplitude: f32,
    /// Bob cycles per second at walking speed
    pub head_bob_frequency: f32,
    /// Yaw sway amplitude (radians) at walking speed
    pub head_sway_amplitude: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            strafe_speed: STRAFE_SPEED,
            lateral_margin: LATERAL_MARGIN,
            desktop_damping: DESKTOP_DAMPING,
            touch_damping: TOUCH_DAMPING,
            eye_height: EYE_HEIGHT,
            gravity: GRAVITY,
            step_up_rate: STEP_UP_RATE,
            wheel_step: WHEEL_STEP,
            touch_drag_step: TOUCH_DRAG_STEP,
            pitch_limit: PITCH_LIMIT,
            head_bob_amplitude: HEAD_BOB_AMPLITUDE,
            head_bob_frequency: HEAD_BOB_FREQUENCY,
            head_sway_amplitude: HEAD_SWAY_AMPLITUDE,
        }
    }
}

/// Walker state, mutated once per frame by a single writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    /// Damped arc length along the walkway
    pub current_distance: f32,
    pub target_distance: f32,
    /// Damped lateral offset along the walkway right vector
    pub lateral_offset: f32,
    pub target_lateral_offset: f32,
    pub yaw: f32,
    pub pitch: f32,

    /// Eye height before head bob
    pub eye_y: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// False until the first update snaps the eye to the ground
    pub initialized: bool,

    /// Arc-length speed from the last update (units/s)
    pub speed: f32,
    pub bob_phase: f32,
    pub head_bob: f32,
    pub head_sway: f32,

    /// Body position on the ground (lateral offset applied)
    pub ground_position: Vec3,
    /// Final eye position, head bob included
    pub eye_position: Vec3,
    pub current_day: usize,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            current_distance: 0.0,
            target_distance: 0.0,
            lateral_offset: 0.0,
            target_lateral_offset: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            eye_y: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
            initialized: false,
            speed: 0.0,
            bob_phase: 0.0,
            head_bob: 0.0,
            head_sway: 0.0,
            ground_position: Vec3::ZERO,
            eye_position: Vec3::ZERO,
            current_day: 0,
        }
    }
}

/// Read-only view of the terrain a walker moves over
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkContext<'a> {
    pub walkway: &'a [WalkwaySample],
    pub record_count: usize,
    pub sampler: Option<&'a TerrainSampler>,
}
