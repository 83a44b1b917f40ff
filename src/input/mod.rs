/// Input Module - device events to per-frame intents
///
/// - input_data.rs: key set, accumulators, frame intents (NO methods)
/// - input_operations.rs: event handlers and the per-frame fold

pub mod input_data;
pub mod input_operations;

pub use input_data::{FrameInput, InputState, Key, Platform};
pub use input_operations::{
    clear_input, key_down, key_from_name, key_up, pointer_move, request_day, set_joystick,
    set_pointer_locked, take_frame_input, touch_drag, wheel, JOYSTICK_DEAD_ZONE,
};
