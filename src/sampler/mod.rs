/// Sampler Module - read-only ground height lookups
///
/// - sampler_data.rs: immutable grid snapshot and the shared handle
/// - sampler_operations.rs: bilinear queries and snapshot swapping

pub mod sampler_data;
pub mod sampler_operations;

pub use sampler_data::{SamplerHandle, TerrainSampler};
pub use sampler_operations::{
    clear_sampler, create_sampler_handle, create_terrain_sampler, handle_sample_height,
    install_sampler, sample_height, sample_normal, sampler_from_mesh, sampler_snapshot,
};
