//! Serra Engine configuration
//!
//! Every tunable lives in one serde struct. Each section carries
//! `#[serde(default)]`, so a TOML file only has to name what it changes.

use crate::camera::CameraConfig;
use crate::constants::DEFAULT_NOISE_SEED;
use crate::error::{SerraError, SerraResult};
use crate::locomotion::LocomotionConfig;
use crate::markers::MarkerConfig;
use crate::reveal::RevealConfig;
use crate::terrain::TerrainConfig;
use crate::timeline::NormalizerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerraConfig {
    /// Seed string hashed into the noise generators
    pub noise_seed: String,
    pub normalizer: NormalizerConfig,
    pub terrain: TerrainConfig,
    pub reveal: RevealConfig,
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub markers: MarkerConfig,
}

impl Default for SerraConfig {
    fn default() -> Self {
        Self {
            noise_seed: DEFAULT_NOISE_SEED.to_string(),
            normalizer: NormalizerConfig::default(),
            terrain: TerrainConfig::default(),
            reveal: RevealConfig::default(),
            locomotion: LocomotionConfig::default(),
            camera: CameraConfig::default(),
            markers: MarkerConfig::default(),
        }
    }
}

fn require_positive(field: &str, value: f32) -> SerraResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SerraError::invalid_config(field, value, "must be positive"))
    }
}

fn require_non_negative(field: &str, value: f32) -> SerraResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SerraError::invalid_config(field, value, "must not be negative"))
    }
}

impl SerraConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> SerraResult<()> {
        // Normalizer
        if self.normalizer.radius_length_divisor == 0 {
            return Err(SerraError::invalid_config(
                "normalizer.radius_length_divisor",
                0,
                "cannot be 0",
            ));
        }

        // Terrain grid
        let terrain = &self.terrain;
        if terrain.lateral_segments < 2 || terrain.lateral_segments % 2 != 0 {
            return Err(SerraError::invalid_config(
                "terrain.lateral_segments",
                terrain.lateral_segments,
                "must be even and at least 2 so the centerline is a grid row",
            ));
        }
        if terrain.min_time_segments < 2 {
            return Err(SerraError::invalid_config(
                "terrain.min_time_segments",
                terrain.min_time_segments,
                "must be at least 2",
            ));
        }
        if terrain.min_time_segments > terrain.max_time_segments {
            return Err(SerraError::invalid_config(
                "terrain.max_time_segments",
                terrain.max_time_segments,
                "must not be below min_time_segments",
            ));
        }
        if terrain.time_segment_multiplier == 0 {
            return Err(SerraError::invalid_config(
                "terrain.time_segment_multiplier",
                0,
                "cannot be 0",
            ));
        }

        // Terrain shape
        require_positive("terrain.track_length", terrain.track_length)?;
        require_positive("terrain.max_half_width", terrain.max_half_width)?;
        require_positive("terrain.min_half_width", terrain.min_half_width)?;
        require_non_negative("terrain.max_peak_height", terrain.max_peak_height)?;
        require_non_negative("terrain.base_ridge_height", terrain.base_ridge_height)?;
        require_non_negative("terrain.max_ascent", terrain.max_ascent)?;
        require_non_negative("terrain.max_descent", terrain.max_descent)?;
        require_non_negative("terrain.ridge_margin", terrain.ridge_margin)?;
        if terrain.min_half_width > terrain.max_half_width {
            return Err(SerraError::invalid_config(
                "terrain.min_half_width",
                terrain.min_half_width,
                "exceeds max_half_width",
            ));
        }
        let narrowest_nesting = terrain.walkway_width_smoothed_floor
            + terrain.plateau_smoothed_gap
            + terrain.shoulder_min;
        if narrowest_nesting >= terrain.max_half_width {
            return Err(SerraError::invalid_config(
                "terrain.max_half_width",
                terrain.max_half_width,
                "too narrow to nest walkway, plateau and shoulder",
            ));
        }
        if !(0.0..=1.0).contains(&terrain.walkway_target_pull) {
            return Err(SerraError::invalid_config(
                "terrain.walkway_target_pull",
                terrain.walkway_target_pull,
                "must lie in [0, 1]",
            ));
        }

        // Reveal
        require_positive("reveal.active_radius", self.reveal.active_radius)?;
        require_positive("reveal.falloff_radius", self.reveal.falloff_radius)?;
        require_positive("reveal.approach_rate", self.reveal.approach_rate)?;
        require_positive("reveal.progress_epsilon", self.reveal.progress_epsilon)?;
        require_non_negative("reveal.normals_interval", self.reveal.normals_interval)?;

        // Locomotion
        let locomotion = &self.locomotion;
        require_positive("locomotion.walk_speed", locomotion.walk_speed)?;
        require_positive("locomotion.desktop_damping", locomotion.desktop_damping)?;
        require_positive("locomotion.touch_damping", locomotion.touch_damping)?;
        require_positive("locomotion.step_up_rate", locomotion.step_up_rate)?;
        require_non_negative("locomotion.gravity", locomotion.gravity)?;
        require_non_negative("locomotion.lateral_margin", locomotion.lateral_margin)?;
        require_non_negative("locomotion.eye_height", locomotion.eye_height)?;
        if locomotion.sprint_multiplier < 1.0 {
            return Err(SerraError::invalid_config(
                "locomotion.sprint_multiplier",
                locomotion.sprint_multiplier,
                "must be at least 1",
            ));
        }

        // Camera
        let camera = &self.camera;
        if !(1.0..179.0).contains(&camera.fov_degrees) {
            return Err(SerraError::invalid_config(
                "camera.fov_degrees",
                camera.fov_degrees,
                "must lie in [1, 179)",
            ));
        }
        require_positive("camera.near_plane", camera.near_plane)?;
        if camera.far_plane <= camera.near_plane {
            return Err(SerraError::invalid_config(
                "camera.far_plane",
                camera.far_plane,
                "must exceed near_plane",
            ));
        }
        require_positive("camera.orbit_min_distance", camera.orbit_min_distance)?;
        if camera.orbit_min_distance > camera.orbit_max_distance {
            return Err(SerraError::invalid_config(
                "camera.orbit_max_distance",
                camera.orbit_max_distance,
                "must not be below orbit_min_distance",
            ));
        }

        log::info!("[SerraConfig] Configuration validated successfully");
        Ok(())
    }
}

/// Parse and validate a TOML configuration
pub fn parse_config(source: &str) -> SerraResult<SerraConfig> {
    let config: SerraConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a TOML configuration file
pub fn load_config(path: &Path) -> SerraResult<SerraConfig> {
    let source = std::fs::read_to_string(path).map_err(|error| SerraError::io(path, error))?;
    let config = parse_config(&source)?;
    log::info!("[load_config] Loaded configuration from {}", path.display());
    Ok(config)
}

/// Serialize a configuration back to TOML
pub fn config_to_toml(config: &SerraConfig) -> SerraResult<String> {
    toml::to_string_pretty(config).map_err(|error| SerraError::SerializationError {
        context: "toml".to_string(),
        error: error.to_string(),
    })
}
