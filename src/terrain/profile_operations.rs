//! Profile operations - Pure DOP functions
//!
//! Resample the normalized series into time segments and derive the
//! per-segment widths and heights that shape the ridge.

use super::noise_field::{noise2, NoiseField};
use super::terrain_data::{SmoothingPass, TerrainConfig, TerrainProfile};
use crate::timeline::NormalizedDay;

// ============================================================================
// RESAMPLING
// ============================================================================

/// Number of time segments for a series of `record_count` records
pub fn time_segment_count(record_count: usize, config: &TerrainConfig) -> usize {
    if record_count == 0 {
        return 0;
    }
    // max/min instead of clamp: an inverted band resolves to the maximum
    (record_count * config.time_segment_multiplier)
        .max(config.min_time_segments)
        .min(config.max_time_segments)
}

/// Pure function - world X of segment `index` out of `segments`
pub fn segment_world_x(index: usize, segments: usize, track_length: f32) -> f32 {
    if segments <= 1 {
        return 0.0;
    }
    -track_length * 0.5 + track_length * index as f32 / (segments - 1) as f32
}

/// Pure function - record a segment is resampled from
pub fn segment_record_index(index: usize, segments: usize, record_count: usize) -> usize {
    if segments <= 1 || record_count <= 1 {
        return 0;
    }
    let t = index as f64 / (segments - 1) as f64;
    ((t * (record_count - 1) as f64).round() as usize).min(record_count - 1)
}

// ============================================================================
// SMOOTHING
// ============================================================================

/// Repeated 3-tap averaging `(l + 2c + r) / 4`, blended by `influence`
///
/// Edges reuse the boundary value. Each pass reads only the previous pass.
pub fn smooth_array(values: &[f32], passes: usize, influence: f32) -> Vec<f32> {
    if values.len() < 2 {
        return values.to_vec();
    }

    let last = values.len() - 1;
    let mut current = values.to_vec();
    let mut next = values.to_vec();

    for _ in 0..passes {
        for i in 0..=last {
            let left = current[i.saturating_sub(1)];
            let right = current[(i + 1).min(last)];
            let target = (left + current[i] * 2.0 + right) * 0.25;
            next[i] = lerp(current[i], target, influence);
        }
        std::mem::swap(&mut current, &mut next);
    }

    current
}

fn smooth_with(values: &[f32], pass: SmoothingPass) -> Vec<f32> {
    smooth_array(values, pass.passes, pass.influence)
}

// ============================================================================
// PROFILES
// ============================================================================

/// Build one profile per time segment
///
/// Widths are smoothed and nested, the walkway height is smoothed and
/// rate-limited, and the ridge is finally clamped above the walkway.
pub fn build_profiles(
    normalized: &[NormalizedDay],
    noise: &NoiseField,
    config: &TerrainConfig,
) -> Vec<TerrainProfile> {
    let segments = time_segment_count(normalized.len(), config);
    if segments == 0 {
        return Vec::new();
    }

    let mut profiles: Vec<TerrainProfile> = (0..segments)
        .map(|i| {
            let record_index = segment_record_index(i, segments, normalized.len());
            let day = normalized[record_index];
            raw_profile(i, segments, record_index, day, config)
        })
        .collect();

    apply_width_smoothing(&mut profiles, config);
    apply_walkway_heights(&mut profiles, noise, config);
    apply_ridge_heights(&mut profiles, config);

    log::debug!(
        "[build_profiles] {} segments from {} records, peak ridge {:.2}",
        segments,
        normalized.len(),
        profiles
            .iter()
            .map(|p| p.ridge_height)
            .fold(f32::NEG_INFINITY, f32::max)
    );

    profiles
}

fn raw_profile(
    index: usize,
    segments: usize,
    record_index: usize,
    day: NormalizedDay,
    config: &TerrainConfig,
) -> TerrainProfile {
    let cases_norm = day.cases_norm.clamp(0.0, 1.0);
    let deaths_norm = day.deaths_norm.clamp(0.0, 1.0);

    let half_width = (cases_norm.powf(config.width_exponent) * config.max_half_width)
        .max(config.min_half_width)
        .min(config.max_half_width);
    let walkway_half_width =
        (half_width * config.walkway_width_fraction).max(config.walkway_width_floor);
    let plateau_half_width = (walkway_half_width + config.plateau_gap)
        .max(half_width * config.plateau_width_fraction);

    TerrainProfile {
        world_x: segment_world_x(index, segments, config.track_length),
        record_index,
        cases_norm,
        deaths_norm,
        ridge_height: deaths_norm * config.max_peak_height + cases_norm * config.base_ridge_height,
        walkway_height: 0.0,
        half_width,
        walkway_half_width,
        plateau_half_width,
    }
}

fn apply_width_smoothing(profiles: &mut [TerrainProfile], config: &TerrainConfig) {
    let raw: Vec<f32> = profiles.iter().map(|p| p.walkway_half_width).collect();
    let smoothed = smooth_with(&raw, config.width_smoothing);

    for (profile, width) in profiles.iter_mut().zip(smoothed) {
        let walkway = width.max(config.walkway_width_smoothed_floor);
        let plateau = (walkway + config.plateau_smoothed_gap).max(profile.plateau_half_width);

        // Outer half-width must clear the plateau, within the lateral extent
        let half = profile
            .half_width
            .max(plateau + config.shoulder_min)
            .min(config.max_half_width);
        let plateau = plateau.min(half - config.shoulder_min);
        let walkway = walkway.min(plateau - config.shoulder_min);

        profile.half_width = half;
        profile.plateau_half_width = plateau;
        profile.walkway_half_width = walkway;
    }
}

fn apply_walkway_heights(
    profiles: &mut [TerrainProfile],
    noise: &NoiseField,
    config: &TerrainConfig,
) {
    let scale = config.max_peak_height * 0.9 + config.base_ridge_height * 0.25;
    let targets: Vec<f32> = profiles
        .iter()
        .map(|p| p.deaths_norm * scale + p.cases_norm * config.base_ridge_height * 0.2)
        .collect();

    let soft = smooth_with(&targets, config.walkway_smoothing);
    let settled = smooth_array(
        &soft,
        config.settle_passes,
        config.walkway_smoothing.influence * 0.6,
    );

    // The wiggle sits inside the step clamp so consecutive heights never
    // differ by more than max_ascent / max_descent
    let mut previous = 0.0f32;
    for (index, (profile, target)) in profiles.iter_mut().zip(settled).enumerate() {
        let wiggle = noise2(noise, profile.world_x * 0.08 + 10.0, index as f32 * 0.02)
            * config.walkway_wiggle;

        let height = if index == 0 {
            (target + wiggle).max(0.0)
        } else {
            let limited = limit_step(target - previous, config);
            let pulled = lerp(previous + limited, target, config.walkway_target_pull);
            let step = limit_step(pulled + wiggle - previous, config);
            (previous + step).max(0.0)
        };

        profile.walkway_height = height;
        previous = height;
    }
}

fn apply_ridge_heights(profiles: &mut [TerrainProfile], config: &TerrainConfig) {
    let raw: Vec<f32> = profiles.iter().map(|p| p.ridge_height).collect();
    let soft = smooth_with(&raw, config.ridge_smoothing);
    let settled = smooth_array(
        &soft,
        config.settle_passes,
        config.ridge_smoothing.influence * 0.65,
    );

    for (profile, smoothed) in profiles.iter_mut().zip(settled) {
        let floor = profile.walkway_height + config.ridge_margin;
        let raw = profile.ridge_height.max(profile.walkway_height + config.ridge_margin * 0.5);
        let smoothed = smoothed.max(floor);
        profile.ridge_height = lerp(raw, smoothed, config.ridge_smoothed_blend).max(floor);
    }
}

/// Per-segment height change bounded by the ascent/descent limits
#[inline]
fn limit_step(delta: f32, config: &TerrainConfig) -> f32 {
    delta.max(-config.max_descent).min(config.max_ascent)
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::noise_field::create_noise_field;

    fn days(values: &[(f32, f32)]) -> Vec<NormalizedDay> {
        values
            .iter()
            .map(|&(cases_norm, deaths_norm)| NormalizedDay {
                cases_norm,
                deaths_norm,
            })
            .collect()
    }

    #[test]
    fn test_segment_count_band() {
        let config = TerrainConfig::default();
        assert_eq!(time_segment_count(0, &config), 0);
        assert_eq!(time_segment_count(3, &config), 90);
        assert_eq!(time_segment_count(40, &config), 400);
        assert_eq!(time_segment_count(900, &config), 1000);
    }

    #[test]
    fn test_segment_positions_span_track() {
        assert_eq!(segment_world_x(0, 90, 100.0), -50.0);
        assert!((segment_world_x(89, 90, 100.0) - 50.0).abs() < 1e-4);
        assert_eq!(segment_world_x(0, 1, 100.0), 0.0);
        assert_eq!(segment_record_index(0, 90, 3), 0);
        assert_eq!(segment_record_index(45, 90, 3), 1);
        assert_eq!(segment_record_index(89, 90, 3), 2);
    }

    #[test]
    fn test_smooth_array_keeps_constants_and_spreads_spikes() {
        let flat = smooth_array(&[2.0; 8], 18, 0.84);
        assert!(flat.iter().all(|v| (v - 2.0).abs() < 1e-5));

        let mut spike = vec![0.0f32; 21];
        spike[10] = 10.0;
        let smoothed = smooth_array(&spike, 4, 0.7);
        assert!(smoothed[10] < 10.0);
        assert!(smoothed[9] > 0.0);
        assert_eq!(smooth_array(&[5.0], 3, 0.5), vec![5.0]);
    }

    #[test]
    fn test_profiles_respect_nesting_and_height_ordering() {
        let config = TerrainConfig::default();
        let noise = create_noise_field("profiles");
        let series: Vec<(f32, f32)> = (0..60)
            .map(|i| {
                let t = i as f32 / 59.0;
                ((t * 9.0).sin().abs(), if i % 7 == 0 { 1.0 } else { t * 0.3 })
            })
            .collect();
        let profiles = build_profiles(&days(&series), &noise, &config);

        assert_eq!(profiles.len(), 600);
        for p in &profiles {
            assert!(p.walkway_half_width < p.plateau_half_width, "{:?}", p);
            assert!(p.plateau_half_width < p.half_width, "{:?}", p);
            assert!(p.half_width <= config.max_half_width);
            assert!(p.walkway_height + config.ridge_margin <= p.ridge_height + 1e-4);
            assert!(p.walkway_height >= 0.0);
        }
    }

    #[test]
    fn test_walkway_rate_limit_bounds_steps() {
        let config = TerrainConfig::default();
        let noise = create_noise_field("steps");
        let mut series = vec![(0.0, 0.0); 20];
        series.extend(vec![(1.0, 1.0); 20]);
        series.extend(vec![(0.0, 0.0); 20]);
        let profiles = build_profiles(&days(&series), &noise, &config);

        let mut steepest_climb = 0.0f32;
        let mut steepest_drop = 0.0f32;
        for pair in profiles.windows(2) {
            let step = pair[1].walkway_height - pair[0].walkway_height;
            steepest_climb = steepest_climb.max(step);
            steepest_drop = steepest_drop.min(step);
        }
        assert!(steepest_climb <= config.max_ascent + 1e-4, "climb {}", steepest_climb);
        assert!(steepest_drop >= -config.max_descent - 1e-4, "drop {}", steepest_drop);
        assert!(steepest_climb > 0.0);
    }

    #[test]
    fn test_inverted_segment_band_does_not_panic() {
        let config = TerrainConfig {
            min_time_segments: 2000,
            max_time_segments: 1000,
            ..TerrainConfig::default()
        };
        assert_eq!(time_segment_count(3, &config), 1000);
        assert_eq!(time_segment_count(0, &config), 0);
    }

    #[test]
    fn test_peak_record_has_tallest_ridge() {
        let config = TerrainConfig::default();
        let noise = create_noise_field("peak");
        let profiles = build_profiles(&days(&[(0.2, 0.0), (1.0, 1.0), (0.4, 0.2)]), &noise, &config);

        let tallest = |record: usize| {
            profiles
                .iter()
                .filter(|p| p.record_index == record)
                .map(|p| p.ridge_height)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        assert!(tallest(1) > tallest(0));
        assert!(tallest(1) > tallest(2));
    }
}
