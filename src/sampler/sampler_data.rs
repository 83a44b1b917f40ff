//! Sampler data structures - Pure DOP
//!
//! NO METHODS. Just data.

use parking_lot::RwLock;
use std::sync::Arc;

/// Immutable height grid snapshot
///
/// Column-major: the height at `(column, row)` is `heights[column * rows + row]`.
/// Columns run along world X, rows along world Z.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSampler {
    pub heights: Vec<f32>,
    pub columns: usize,
    pub rows: usize,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

/// Shared slot holding the current snapshot
///
/// Readers clone the inner `Arc` and sample without holding the lock.
/// Regeneration swaps in a whole new snapshot.
#[derive(Debug, Clone, Default)]
pub struct SamplerHandle {
    pub slot: Arc<RwLock<Option<Arc<TerrainSampler>>>>,
}
