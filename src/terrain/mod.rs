/// Terrain Module - Data-Oriented Programming (DOP) style
///
/// - terrain_data.rs: profiles, mesh buffers, walkway samples (NO methods)
/// - noise_field.rs: string-seeded coherent noise
/// - profile_operations.rs: series -> per-segment widths and heights
/// - mesh_operations.rs: profiles -> closed heightfield mesh
/// - walkway_operations.rs: arc-length walkway and paved strip

pub mod mesh_operations;
pub mod noise_field;
pub mod profile_operations;
pub mod terrain_data;
pub mod walkway_operations;

// Re-export data structures
pub use terrain_data::{
    SmoothingPass, TerrainBuild, TerrainConfig, TerrainMesh, TerrainProfile, TerrainVertex,
    WalkwaySample, WalkwayStrip,
};

// Re-export operations
pub use mesh_operations::{
    baseline_height, build_closed_indices, build_terrain_mesh, compute_vertex_normals,
    cross_section_height, lateral_z, smoothstep, synthesize_terrain, top_vertex_index,
};
pub use noise_field::{create_noise_field, hash_seed_string, seeded_rng, NoiseField};
pub use profile_operations::{
    build_profiles, segment_record_index, segment_world_x, smooth_array, time_segment_count,
};
pub use walkway_operations::{
    build_walkway_samples, build_walkway_strip, day_to_distance, distance_to_day,
    sample_walkway, strip_half_width, walkway_length, walkway_right,
};
