/// Reveal Module - progressive terrain rise and recede
///
/// - reveal_data.rs: per-segment progress, targets, active set (NO methods)
/// - reveal_operations.rs: retargeting and the per-frame single-writer step

pub mod reveal_data;
pub mod reveal_operations;

pub use reveal_data::{RevealConfig, RevealState, RevealStep, SegmentPhase};
pub use reveal_operations::{
    create_reveal_state, current_vertex_height, damp, ease_height, reveal_target, segment_phase,
    step_reveal, update_reveal_targets,
};
