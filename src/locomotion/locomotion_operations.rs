//! Locomotion operations - Pure DOP functions
//!
//! The walker moves along the walkway by arc length. Every frame the lateral
//! offset is re-clamped against the walkway width at the current distance,
//! then the eye is grounded on the sampled terrain.

use super::locomotion_data::{LocomotionConfig, LocomotionState, WalkContext};
use crate::camera::{clamp_pitch, yaw_from_direction};
use crate::input::{FrameInput, Platform};
use crate::reveal::damp;
use crate::sampler::sample_height;
use crate::terrain::{
    day_to_distance, distance_to_day, sample_walkway, walkway_length, walkway_right, WalkwaySample,
};
use glam::Vec3;
use std::f32::consts::TAU;

/// Longest frame step the integrator accepts (seconds)
const MAX_FRAME_TIME: f32 = 0.25;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Walker at the start of the walkway, facing along it
pub fn create_locomotion_state(context: &WalkContext, config: &LocomotionConfig) -> LocomotionState {
    let start = sample_walkway(context.walkway, 0.0);
    let mut state = LocomotionState {
        yaw: yaw_from_direction(start.forward),
        ..Default::default()
    };
    update_locomotion(&mut state, &FrameInput::default(), context, config, 0.0);
    state
}

// ============================================================================
// DAY SELECTION
// ============================================================================

/// Walk toward the arc length of record `day`
pub fn set_target_day(state: &mut LocomotionState, context: &WalkContext, day: usize) {
    state.target_distance = day_to_distance(context.walkway, day, context.record_count);
}

/// Shift the target by `delta` days, clamped to the series
pub fn jump_days(state: &mut LocomotionState, context: &WalkContext, delta: i64) {
    if context.record_count == 0 {
        return;
    }
    let last = (context.record_count - 1) as i64;
    let day = distance_to_day(context.walkway, state.target_distance, context.record_count) as i64;
    set_target_day(state, context, (day + delta).clamp(0, last) as usize);
}

// ============================================================================
// PER-FRAME UPDATE
// ============================================================================

/// Pure function - largest lateral offset allowed at a walkway sample
pub fn lateral_limit(sample: &WalkwaySample, config: &LocomotionConfig) -> f32 {
    (sample.half_width - config.lateral_margin).max(0.0)
}

/// Advance the walker by one frame
pub fn update_locomotion(
    state: &mut LocomotionState,
    input: &FrameInput,
    context: &WalkContext,
    config: &LocomotionConfig,
    delta_time: f32,
) {
    let dt = if delta_time.is_finite() {
        delta_time.clamp(0.0, MAX_FRAME_TIME)
    } else {
        0.0
    };

    // Look
    state.yaw += input.yaw_delta;
    state.pitch = clamp_pitch(state.pitch + input.pitch_delta, config.pitch_limit);

    // Discrete day selection
    if let Some(day) = input.day_target {
        set_target_day(state, context, day);
    }
    if input.day_jump != 0 {
        jump_days(state, context, input.day_jump);
    }

    // Targets
    let total = walkway_length(context.walkway);
    let speed = if input.sprint {
        config.walk_speed * config.sprint_multiplier
    } else {
        config.walk_speed
    };
    let nudge = input.wheel_delta * config.wheel_step + input.drag_delta * config.touch_drag_step;
    state.target_distance =
        (state.target_distance + input.forward * speed * dt + nudge).clamp(0.0, total);
    state.target_lateral_offset += input.strafe * config.strafe_speed * dt;

    // Damped follow
    let rate = match input.platform {
        Platform::Desktop => config.desktop_damping,
        Platform::Touch => config.touch_damping,
    };
    let previous_distance = state.current_distance;
    state.current_distance = damp(state.current_distance, state.target_distance, rate, dt);
    if (state.current_distance - state.target_distance).abs() < 1e-4 {
        state.current_distance = state.target_distance;
    }
    state.current_distance = state.current_distance.clamp(0.0, total);

    // Lateral clamp against the width where the walker is now
    let sample = sample_walkway(context.walkway, state.current_distance);
    let limit = lateral_limit(&sample, config);
    state.target_lateral_offset = state.target_lateral_offset.clamp(-limit, limit);
    state.lateral_offset =
        damp(state.lateral_offset, state.target_lateral_offset, rate, dt).clamp(-limit, limit);

    let body = sample.position + walkway_right(sample.forward) * state.lateral_offset;
    let ground = context
        .sampler
        .map(|sampler| sample_height(sampler, body.x, body.z))
        .unwrap_or(sample.position.y);
    state.ground_position = Vec3::new(body.x, ground, body.z);

    ground_eye(state, ground + config.eye_height, config, dt);

    state.speed = if dt > 0.0 {
        (state.current_distance - previous_distance).abs() / dt
    } else {
        0.0
    };
    update_head_bob(state, config, dt);

    state.eye_position = Vec3::new(body.x, state.eye_y + state.head_bob, body.z);
    state.current_day =
        distance_to_day(context.walkway, state.current_distance, context.record_count);

    log::trace!(
        "[update_locomotion] d={:.3}/{:.3} lateral={:.3} day={} eye=({:.2}, {:.2}, {:.2})",
        state.current_distance,
        total,
        state.lateral_offset,
        state.current_day,
        state.eye_position.x,
        state.eye_position.y,
        state.eye_position.z
    );
}

/// Step up smoothly, fall under gravity, snap on landing
fn ground_eye(state: &mut LocomotionState, desired: f32, config: &LocomotionConfig, dt: f32) {
    if !state.initialized {
        state.eye_y = desired;
        state.vertical_velocity = 0.0;
        state.grounded = true;
        state.initialized = true;
        return;
    }

    if state.eye_y <= desired {
        state.eye_y = damp(state.eye_y, desired, config.step_up_rate, dt);
        if desired - state.eye_y < 1e-3 {
            state.eye_y = desired;
        }
        state.vertical_velocity = 0.0;
        state.grounded = true;
        return;
    }

    state.vertical_velocity -= config.gravity * dt;
    state.eye_y += state.vertical_velocity * dt;
    if state.eye_y <= desired {
        state.eye_y = desired;
        state.vertical_velocity = 0.0;
        state.grounded = true;
    } else {
        state.grounded = false;
    }
}

/// Vertical bob and a small yaw sway, scaled by speed
fn update_head_bob(state: &mut LocomotionState, config: &LocomotionConfig, dt: f32) {
    let ratio = (state.speed / config.walk_speed.max(1e-3)).clamp(0.0, config.sprint_multiplier.max(1.0));
    if ratio < 1e-3 || !state.grounded {
        state.head_bob = 0.0;
        state.head_sway = 0.0;
        return;
    }

    state.bob_phase = (state.bob_phase + dt * config.head_bob_frequency * TAU * ratio) % TAU;
    let amplitude = ratio.min(1.0);
    state.head_bob = state.bob_phase.sin() * config.head_bob_amplitude * amplitude;
    state.head_sway = (state.bob_phase * 0.5).sin() * config.head_sway_amplitude * amplitude;
}

/// Yaw the camera should use (sway included)
pub fn view_yaw(state: &LocomotionState) -> f32 {
    state.yaw + state.head_sway
}
