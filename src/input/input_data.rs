//! Input data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in input_operations.rs

use glam::Vec2;
use std::collections::HashSet;

/// Keys the walker responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    Comma,
    Period,
    BracketLeft,
    BracketRight,
}

/// Device class driving the walker; selects the damping rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Desktop,
    Touch,
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub pressed: HashSet<Key>,
    /// Joystick vector after dead zone, screen convention (y down)
    pub joystick: Vec2,
    /// Wheel delta (pixels) since last frame
    pub wheel_delta: f32,
    /// Vertical touch drag (pixels) since last frame
    pub drag_delta: f32,
    /// Pointer-lock mouse motion (pixels) since last frame
    pub look_delta: Vec2,
    /// Horizontal touch drag used for turning (pixels) since last frame
    pub touch_look_delta: f32,
    /// Signed day jump requested since last frame
    pub day_jump: i64,
    /// Absolute day requested by a scrubber, latest wins
    pub day_target: Option<usize>,
    pub pointer_locked: bool,
    pub platform: Platform,
}

/// Per-frame intents consumed by locomotion and camera
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Forward (+) / backward (-) in [-1, 1]
    pub forward: f32,
    /// Right (+) / left (-) in [-1, 1]
    pub strafe: f32,
    pub sprint: bool,
    pub wheel_delta: f32,
    pub drag_delta: f32,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub day_jump: i64,
    pub day_target: Option<usize>,
    pub platform: Platform,
}
