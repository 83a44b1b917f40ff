//! Default tuning constants
//!
//! These are art-direction values. Every one of them is overridable through
//! [`crate::config::SerraConfig`]; the invariants of the synthesizer hold for
//! any combination accepted by `SerraConfig::validate`.

/// Seed string hashed into the noise generators
pub const DEFAULT_NOISE_SEED: &str = "serra-sem-ar";

/// Timeline normalization defaults
pub mod normalizer {
    /// Gaussian kernel radius in records
    pub const SMOOTHING_RADIUS: usize = 6;
    /// Kernel radius never exceeds len / this
    pub const RADIUS_LENGTH_DIVISOR: usize = 8;
}

/// Terrain synthesis defaults
pub mod terrain {
    /// Time segments generated per daily record
    pub const TIME_SEGMENT_MULTIPLIER: usize = 10;
    pub const MIN_TIME_SEGMENTS: usize = 90;
    pub const MAX_TIME_SEGMENTS: usize = 1000;
    /// Lateral quads across the ridge; even so z = 0 is a grid row
    pub const LATERAL_SEGMENTS: usize = 620;

    /// World-X span of the whole track
    pub const TRACK_LENGTH: f32 = 100.0;
    /// Lateral extent of the mesh is [-MAX_HALF_WIDTH, MAX_HALF_WIDTH]
    pub const MAX_HALF_WIDTH: f32 = 70.0;
    pub const MIN_HALF_WIDTH: f32 = 24.0;
    pub const WIDTH_EXPONENT: f32 = 0.62;

    pub const MAX_PEAK_HEIGHT: f32 = 48.0;
    pub const BASE_RIDGE_HEIGHT: f32 = 6.0;

    pub const WALKWAY_WIDTH_FRACTION: f32 = 0.34;
    pub const WALKWAY_WIDTH_FLOOR: f32 = 10.5;
    pub const WALKWAY_WIDTH_SMOOTHED_FLOOR: f32 = 6.2;
    pub const PLATEAU_WIDTH_FRACTION: f32 = 0.48;
    pub const PLATEAU_GAP: f32 = 8.5;
    pub const PLATEAU_SMOOTHED_GAP: f32 = 7.5;
    /// Minimum distance between plateau edge and outer half-width
    pub const SHOULDER_MIN: f32 = 1.0;

    pub const WIDTH_SMOOTH_PASSES: usize = 14;
    pub const WIDTH_SMOOTH_INFLUENCE: f32 = 0.7;
    pub const WALKWAY_SMOOTH_PASSES: usize = 18;
    pub const WALKWAY_SMOOTH_INFLUENCE: f32 = 0.84;
    pub const RIDGE_SMOOTH_PASSES: usize = 18;
    pub const RIDGE_SMOOTH_INFLUENCE: f32 = 0.76;
    pub const SETTLE_PASSES: usize = 3;
    pub const RIDGE_SMOOTHED_BLEND: f32 = 0.45;

    pub const MAX_ASCENT: f32 = 6.0;
    pub const MAX_DESCENT: f32 = 5.0;
    pub const WALKWAY_TARGET_PULL: f32 = 0.45;
    pub const WALKWAY_WIGGLE: f32 = 0.6;
    pub const RIDGE_MARGIN: f32 = 0.5;

    pub const WALKWAY_RIPPLE: f32 = 0.18;

    pub const BASELINE_Y: f32 = -4.0;
    pub const MIN_WALKWAY_BASE: f32 = -8.2;
    pub const WALKWAY_THICKNESS: f32 = 5.0;
    pub const PLATEAU_THICKNESS: f32 = 1.3;

    /// Walkway strip (paved path) geometry
    pub const WALKWAY_WIDTH_RATIO: f32 = 0.6;
    pub const MIN_WALKWAY_HALF: f32 = 3.5;
    pub const WALKWAY_BEVEL_INNER: f32 = 2.8;
    pub const WALKWAY_BEVEL_OUTER: f32 = 4.2;
    pub const WALKWAY_SURFACE_OFFSET: f32 = 0.012;
    pub const WALKWAY_TILE_U: f32 = 0.028;
    pub const WALKWAY_TILE_V: f32 = 0.7;
}

/// Progressive reveal defaults
pub mod reveal {
    pub const ACTIVE_RADIUS: f32 = 105.0;
    pub const FALLOFF_RADIUS: f32 = 55.0;
    /// Exponential approach rate of segment progress (1/s)
    pub const APPROACH_RATE: f32 = 2.0;
    pub const PROGRESS_EPSILON: f32 = 1e-3;
    pub const TARGET_EPSILON: f32 = 5e-3;
    /// Seconds between normal recomputations while segments move
    pub const NORMALS_INTERVAL: f32 = 0.12;
}

/// Locomotion defaults
pub mod locomotion {
    /// Walk speed along the walkway (units/s)
    pub const WALK_SPEED: f32 = 6.0;
    pub const SPRINT_MULTIPLIER: f32 = 2.5;
    pub const STRAFE_SPEED: f32 = 4.0;
    /// Distance clearance kept from the walkway edge
    pub const LATERAL_MARGIN: f32 = 0.6;
    pub const DESKTOP_DAMPING: f32 = 10.0;
    pub const TOUCH_DAMPING: f32 = 6.0;
    pub const EYE_HEIGHT: f32 = 2.2;
    pub const GRAVITY: f32 = 24.0;
    pub const STEP_UP_RATE: f32 = 14.0;
    pub const WHEEL_STEP: f32 = 0.01;
    pub const TOUCH_DRAG_STEP: f32 = 0.05;
    pub const DAY_JUMP_LARGE: usize = 10;
    pub const HEAD_BOB_AMPLITUDE: f32 = 0.06;
    pub const HEAD_BOB_FREQUENCY: f32 = 1.8;
    pub const HEAD_SWAY_AMPLITUDE: f32 = 0.004;
}

/// Camera defaults
pub mod camera {
    pub const FOV_DEGREES: f32 = 70.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 2000.0;
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    pub const TOUCH_LOOK_SENSITIVITY: f32 = 0.005;
    /// Pitch is clamped to +/- this many radians
    pub const PITCH_LIMIT: f32 = 1.2;
    pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
    pub const ORBIT_MAX_DISTANCE: f32 = 200.0;
    pub const ORBIT_ZOOM_STEP: f32 = 0.5;
    pub const ORBIT_CLEARANCE: f32 = 1.5;
}

/// Marker placement defaults
pub mod markers {
    pub const EVENT_OFFSET_FIRST: f32 = 10.0;
    pub const EVENT_OFFSET: f32 = 6.0;
    pub const EVENT_LIFT: f32 = 2.6;
    pub const PLAQUE_FORWARD_OFFSET: f32 = 3.6;
    pub const PLAQUE_LATERAL_OFFSET: f32 = 2.4;
    pub const PLAQUE_GROUND_LIFT: f32 = 0.02;
    pub const PLAQUE_REVEAL_LEAD: f32 = 12.0;
    pub const PIN_LATERAL_FRACTION: f32 = 0.45;
    pub const PIN_LATERAL_MAX: f32 = 3.2;
    pub const PIN_PROXIMITY_RADIUS: f32 = 7.0;
    pub const NORMAL_PROBE: f32 = 0.5;
}

/// Scene publication thresholds
pub mod scene {
    /// Camera moves below this are not republished
    pub const CAMERA_PUBLISH_EPSILON: f32 = 0.05;
    /// Queued events per subscriber; further events are dropped until it drains
    pub const SUBSCRIBER_CAPACITY: usize = 4096;
}
