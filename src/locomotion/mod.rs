/// Locomotion Module - arc-length walker over the synthesized walkway
///
/// - locomotion_data.rs: tuning, walker state, terrain view (NO methods)
/// - locomotion_operations.rs: per-frame integration, grounding, day jumps

pub mod locomotion_data;
pub mod locomotion_operations;

pub use locomotion_data::{LocomotionConfig, LocomotionState, WalkContext};
pub use locomotion_operations::{
    create_locomotion_state, jump_days, lateral_limit, set_target_day, update_locomotion,
    view_yaw,
};
