//! Headless walk along a timeline ridge
//!
//! Usage: walk_timeline [timeline.json] [config.toml]
//!
//! Without a timeline a synthetic two-wave series is generated. The walker
//! sprints forward and the demo logs the day, eye position and reveal front.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serra_engine::{
    input::{key_down, Key},
    markers::{place_monthly_plaques, plaque_visible},
    scene::{create_scene_state, load_series, subscribe, tick, SceneEvent},
    timeline::{load_timeline_file, DailyRecord, RetryPolicy},
    SerraConfig,
};
use std::path::Path;

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: usize = 60 * 40;

fn synthetic_series(days: usize) -> Result<Vec<DailyRecord>> {
    let start = NaiveDate::from_ymd_opt(2020, 2, 25).context("invalid start date")?;
    Ok((0..days)
        .map(|i| {
            let t = i as f32 / days as f32;
            let first_wave = (-((t - 0.3) / 0.08).powi(2)).exp();
            let second_wave = (-((t - 0.7) / 0.1).powi(2)).exp() * 1.6;
            let cases = ((first_wave + second_wave) * 60_000.0) as u64;
            let deaths = ((first_wave * 1.2 + second_wave * 0.9) * 1_500.0) as u64;
            DailyRecord {
                date: start + Duration::days(i as i64),
                cases,
                deaths,
                sequence_index: i,
            }
        })
        .collect())
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(2) {
        Some(path) => serra_engine::load_config(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => SerraConfig::default(),
    };

    let records = match args.get(1) {
        Some(path) => pollster::block_on(load_timeline_file(Path::new(path), &RetryPolicy::default()))
            .with_context(|| format!("loading timeline {path}"))?,
        None => synthetic_series(420)?,
    };

    println!("Serra Sem Ar - headless walk");
    println!("============================");
    println!("{} daily records", records.len());

    let mut scene = create_scene_state(config);
    let events = subscribe(&mut scene);
    load_series(&mut scene, records);

    let plaques = match scene.terrain.as_ref() {
        Some(terrain) => place_monthly_plaques(
            &scene.records,
            &terrain.walkway,
            None,
            &scene.config.markers,
        ),
        None => Vec::new(),
    };

    key_down(&mut scene.input, Key::W);
    key_down(&mut scene.input, Key::Shift);

    for frame in 0..FRAMES {
        let step = tick(&mut scene, FRAME_TIME);

        for event in events.try_iter() {
            if let SceneEvent::DayChanged(day) = event {
                if day % 30 == 0 {
                    let eye = scene.locomotion.eye_position;
                    let standing = plaques
                        .iter()
                        .filter(|p| plaque_visible(p, scene.revealed_x, &scene.config.markers))
                        .count();
                    println!(
                        "frame {:5} day {:4} ({}) eye ({:7.2}, {:6.2}, {:6.2}) revealed_x {:6.2} plaques {}/{} active segments {}",
                        frame,
                        day,
                        scene.records.get(day).map(|r| r.date.to_string()).unwrap_or_default(),
                        eye.x,
                        eye.y,
                        eye.z,
                        scene.revealed_x,
                        standing,
                        plaques.len(),
                        step.segments_touched
                    );
                }
            }
        }
    }

    println!(
        "Finished on day {} of {}",
        scene.current_day,
        scene.records.len().saturating_sub(1)
    );
    Ok(())
}
