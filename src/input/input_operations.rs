//! Input operations - Pure DOP functions
//!
//! Raw device events accumulate into `InputState`; once per frame they are
//! folded into a `FrameInput` and the one-shot accumulators reset.

use super::input_data::{FrameInput, InputState, Key, Platform};
use crate::constants::locomotion::DAY_JUMP_LARGE;
use glam::Vec2;

/// Joystick magnitudes below this read as zero
pub const JOYSTICK_DEAD_ZONE: f32 = 0.12;

/// Map a DOM-style key name to a key
pub fn key_from_name(name: &str) -> Option<Key> {
    let key = match name {
        "w" | "W" => Key::W,
        "a" | "A" => Key::A,
        "s" | "S" => Key::S,
        "d" | "D" => Key::D,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "Shift" | "ShiftLeft" | "ShiftRight" => Key::Shift,
        "," | "<" => Key::Comma,
        "." | ">" => Key::Period,
        "[" | "{" => Key::BracketLeft,
        "]" | "}" => Key::BracketRight,
        _ => return None,
    };
    Some(key)
}

/// Key pressed; day-jump keys act once per press
pub fn key_down(state: &mut InputState, key: Key) {
    state.platform = Platform::Desktop;
    let repeat = !state.pressed.insert(key);
    if repeat {
        return;
    }

    let step = if state.pressed.contains(&Key::Shift) {
        DAY_JUMP_LARGE as i64
    } else {
        1
    };
    match key {
        Key::Comma | Key::BracketLeft => state.day_jump -= step,
        Key::Period | Key::BracketRight => state.day_jump += step,
        _ => {}
    }
}

pub fn key_up(state: &mut InputState, key: Key) {
    state.pressed.remove(&key);
}

/// Release everything (focus loss)
pub fn clear_input(state: &mut InputState) {
    state.pressed.clear();
    state.joystick = Vec2::ZERO;
    state.wheel_delta = 0.0;
    state.drag_delta = 0.0;
    state.look_delta = Vec2::ZERO;
    state.touch_look_delta = 0.0;
}

/// Virtual joystick, normalized to the pad radius
///
/// Clamped to the unit disc; inside the dead zone it reads zero.
pub fn set_joystick(state: &mut InputState, x: f32, y: f32) {
    state.platform = Platform::Touch;
    let raw = Vec2::new(x, y);
    if !raw.is_finite() {
        state.joystick = Vec2::ZERO;
        return;
    }
    let clamped = raw.clamp_length_max(1.0);
    state.joystick = if clamped.length() < JOYSTICK_DEAD_ZONE {
        Vec2::ZERO
    } else {
        clamped
    };
}

pub fn wheel(state: &mut InputState, delta_y: f32) {
    if delta_y.is_finite() {
        state.wheel_delta += delta_y;
    }
}

/// One-finger drag: horizontal turns, vertical walks (drag up = forward)
pub fn touch_drag(state: &mut InputState, dx: f32, dy: f32) {
    state.platform = Platform::Touch;
    if dx.is_finite() && dy.is_finite() {
        state.touch_look_delta += dx;
        state.drag_delta -= dy;
    }
}

/// Mouse motion; only counts while the pointer is locked
pub fn pointer_move(state: &mut InputState, dx: f32, dy: f32) {
    if state.pointer_locked && dx.is_finite() && dy.is_finite() {
        state.look_delta += Vec2::new(dx, dy);
    }
}

pub fn set_pointer_locked(state: &mut InputState, locked: bool) {
    state.pointer_locked = locked;
    if !locked {
        state.look_delta = Vec2::ZERO;
    }
}

/// Scrubber selection of an absolute day
pub fn request_day(state: &mut InputState, day: usize) {
    state.day_target = Some(day);
    state.day_jump = 0;
}

fn axis(state: &InputState, positive: [Key; 2], negative: [Key; 2]) -> f32 {
    let held = |keys: [Key; 2]| keys.iter().any(|k| state.pressed.contains(k));
    (held(positive) as i32 - held(negative) as i32) as f32
}

/// Fold accumulated input into this frame's intents and reset one-shots
///
/// Mouse pixels scale by `look_sensitivity`, touch pixels by
/// `touch_look_sensitivity` (radians per pixel).
pub fn take_frame_input(
    state: &mut InputState,
    look_sensitivity: f32,
    touch_look_sensitivity: f32,
) -> FrameInput {
    let forward = axis(state, [Key::W, Key::ArrowUp], [Key::S, Key::ArrowDown]) - state.joystick.y;
    let strafe = axis(state, [Key::D, Key::ArrowRight], [Key::A, Key::ArrowLeft]) + state.joystick.x;

    let frame = FrameInput {
        forward: forward.clamp(-1.0, 1.0),
        strafe: strafe.clamp(-1.0, 1.0),
        sprint: state.pressed.contains(&Key::Shift),
        wheel_delta: state.wheel_delta,
        drag_delta: state.drag_delta,
        yaw_delta: state.look_delta.x * look_sensitivity
            + state.touch_look_delta * touch_look_sensitivity,
        pitch_delta: -state.look_delta.y * look_sensitivity,
        day_jump: state.day_jump,
        day_target: state.day_target,
        platform: state.platform,
    };

    state.wheel_delta = 0.0;
    state.drag_delta = 0.0;
    state.look_delta = Vec2::ZERO;
    state.touch_look_delta = 0.0;
    state.day_jump = 0;
    state.day_target = None;

    frame
}
