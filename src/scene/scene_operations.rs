//! Scene operations - Pure DOP functions
//!
//! Lifecycle: `create_scene_state` -> `load_series` -> `tick` per frame -> `clear_scene`.
//! A tick runs input, locomotion, camera, reveal targets, reveal step, publish,
//! in that order.

use super::scene_data::{SceneEvent, SceneState};
use crate::camera::{
    follow_first_person, follow_orbit, init_camera_from_config, log_camera_context, rotate,
    zoom_orbit, CameraMode,
};
use crate::config::SerraConfig;
use crate::constants::scene::{CAMERA_PUBLISH_EPSILON, SUBSCRIBER_CAPACITY};
use crate::error::SerraResult;
use crate::input::{take_frame_input, FrameInput, InputState};
use crate::locomotion::{create_locomotion_state, update_locomotion, view_yaw, LocomotionState, WalkContext};
use crate::reveal::{create_reveal_state, step_reveal, update_reveal_targets, RevealState, RevealStep};
use crate::sampler::{
    clear_sampler, create_sampler_handle, install_sampler, sampler_from_mesh, sampler_snapshot,
};
use crate::terrain::synthesize_terrain;
use crate::timeline::{parse_timeline_json, DailyRecord};
use crossbeam_channel::{bounded, Receiver, TrySendError};

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Empty scene: no terrain, sampler returns 0
///
/// An invalid config is logged but still accepted; the operations that read
/// it tolerate inverted bounds.
pub fn create_scene_state(config: SerraConfig) -> SceneState {
    if let Err(e) = config.validate() {
        log::warn!("[create_scene_state] Config failed validation: {}", e);
    }
    let camera = init_camera_from_config(&config.camera);
    SceneState {
        config,
        records: Vec::new(),
        terrain: None,
        sampler: create_sampler_handle(),
        reveal: RevealState::default(),
        locomotion: LocomotionState::default(),
        camera,
        input: InputState::default(),
        current_day: 0,
        revealed_x: f32::NEG_INFINITY,
        published_camera: None,
        frame_count: 0,
        subscribers: Vec::new(),
    }
}

/// New receiver for scene change notifications
///
/// Each receiver queues at most `SUBSCRIBER_CAPACITY` events.
pub fn subscribe(scene: &mut SceneState) -> Receiver<SceneEvent> {
    let (sender, receiver) = bounded(SUBSCRIBER_CAPACITY);
    scene.subscribers.push(sender);
    receiver
}

/// Send to every live subscriber without blocking
///
/// A full subscriber misses the event but stays subscribed; a disconnected
/// one is removed.
pub fn publish(scene: &mut SceneState, event: SceneEvent) {
    scene
        .subscribers
        .retain(|subscriber| match subscriber.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                log::trace!("[publish] Subscriber queue full, dropping {:?}", dropped);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
}

/// Build terrain for a validated series and reset everything that depends on it
pub fn load_series(scene: &mut SceneState, records: Vec<DailyRecord>) {
    let build = synthesize_terrain(
        &records,
        &scene.config.normalizer,
        &scene.config.terrain,
        &scene.config.noise_seed,
    );

    match sampler_from_mesh(&build.mesh) {
        Some(sampler) => install_sampler(&scene.sampler, sampler),
        None => clear_sampler(&scene.sampler),
    }

    let segments = build.mesh.time_segments;
    scene.reveal = create_reveal_state(segments);
    scene.records = records;
    scene.terrain = Some(build);

    let snapshot = sampler_snapshot(&scene.sampler);
    let context = WalkContext {
        walkway: scene.terrain.as_ref().map(|t| t.walkway.as_slice()).unwrap_or(&[]),
        record_count: scene.records.len(),
        sampler: snapshot.as_deref(),
    };
    scene.locomotion = create_locomotion_state(&context, &scene.config.locomotion);
    scene.current_day = scene.locomotion.current_day;
    scene.revealed_x = f32::NEG_INFINITY;
    scene.published_camera = None;
    scene.input = InputState {
        platform: scene.input.platform,
        ..Default::default()
    };

    log::info!(
        "[load_series] Scene rebuilt: {} records, {} segments",
        scene.records.len(),
        segments
    );

    let records = scene.records.len();
    publish(scene, SceneEvent::TerrainRebuilt { segments, records });
    let day = scene.current_day;
    publish(scene, SceneEvent::DayChanged(day));
    update_camera(scene, &FrameInput::default());
    publish_camera(scene);
}

/// Parse timeline JSON and load it
///
/// On a parse error the current scene is left untouched.
pub fn load_timeline_json(scene: &mut SceneState, json: &str) -> SerraResult<()> {
    let records = parse_timeline_json(json)?;
    load_series(scene, records);
    Ok(())
}

/// Drop the terrain and release the sampler snapshot
pub fn clear_scene(scene: &mut SceneState) {
    scene.terrain = None;
    scene.records.clear();
    clear_sampler(&scene.sampler);
    scene.reveal = RevealState::default();
    scene.locomotion = LocomotionState::default();
    scene.current_day = 0;
    scene.revealed_x = f32::NEG_INFINITY;
    scene.published_camera = None;

    log::info!("[clear_scene] Scene cleared");
    publish(scene, SceneEvent::TerrainCleared);
}

// ============================================================================
// FRAME TICK
// ============================================================================

/// Run one frame from the scene's accumulated input
pub fn tick(scene: &mut SceneState, delta_time: f32) -> RevealStep {
    let frame = take_frame_input(
        &mut scene.input,
        scene.config.camera.look_sensitivity,
        scene.config.camera.touch_look_sensitivity,
    );
    advance_frame(scene, &frame, delta_time)
}

/// Run one frame from explicit intents
pub fn advance_frame(scene: &mut SceneState, frame: &FrameInput, delta_time: f32) -> RevealStep {
    scene.frame_count += 1;

    // In orbit mode look and wheel drive the camera, not the walker
    let walker_input = match scene.camera.mode {
        CameraMode::FirstPerson => *frame,
        CameraMode::Orbit => FrameInput {
            wheel_delta: 0.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            ..*frame
        },
    };

    // Locomotion
    {
        let snapshot = sampler_snapshot(&scene.sampler);
        let context = WalkContext {
            walkway: scene.terrain.as_ref().map(|t| t.walkway.as_slice()).unwrap_or(&[]),
            record_count: scene.records.len(),
            sampler: snapshot.as_deref(),
        };
        update_locomotion(
            &mut scene.locomotion,
            &walker_input,
            &context,
            &scene.config.locomotion,
            delta_time,
        );
    }

    // Camera
    update_camera(scene, frame);

    // Reveal
    let mut step = RevealStep::default();
    let mut advanced = None;
    if let Some(terrain) = scene.terrain.as_mut() {
        let viewer_x = scene.locomotion.ground_position.x;
        if let Some(front) = update_reveal_targets(
            &mut scene.reveal,
            &terrain.mesh.segment_xs,
            viewer_x,
            &scene.config.reveal,
        ) {
            if front > scene.revealed_x {
                scene.revealed_x = front;
                advanced = Some(front);
            }
        }
        step = step_reveal(&mut scene.reveal, &mut terrain.mesh, delta_time, &scene.config.reveal);
    }

    // Publish
    if scene.locomotion.current_day != scene.current_day {
        scene.current_day = scene.locomotion.current_day;
        let day = scene.current_day;
        publish(scene, SceneEvent::DayChanged(day));
    }
    if let Some(front) = advanced {
        publish(scene, SceneEvent::RevealAdvanced(front));
    }
    publish_camera(scene);

    log::trace!(
        "[tick] frame {} day {} revealed_x {:.2} touched {}",
        scene.frame_count,
        scene.current_day,
        scene.revealed_x,
        step.segments_touched
    );
    step
}

/// Pose the camera from the walker (and orbit controls)
fn update_camera(scene: &mut SceneState, frame: &FrameInput) {
    let locomotion = &scene.locomotion;
    scene.camera = match scene.camera.mode {
        CameraMode::FirstPerson => follow_first_person(
            &scene.camera,
            locomotion.eye_position,
            view_yaw(locomotion),
            locomotion.pitch,
        ),
        CameraMode::Orbit => {
            let rotated = rotate(
                &scene.camera,
                frame.yaw_delta,
                frame.pitch_delta,
                scene.config.locomotion.pitch_limit,
            );
            let zoomed = zoom_orbit(&rotated, frame.wheel_delta, &scene.config.camera);
            let snapshot = sampler_snapshot(&scene.sampler);
            follow_orbit(
                &zoomed,
                locomotion.eye_position,
                snapshot.as_deref(),
                scene.config.camera.orbit_clearance,
            )
        }
    };
}

/// Publish the camera pose if it moved past the threshold
fn publish_camera(scene: &mut SceneState) {
    let position = scene.camera.position;
    let target = scene.camera.target;
    let moved = scene.published_camera.map_or(true, |(last_position, last_target)| {
        last_position.distance(position) > CAMERA_PUBLISH_EPSILON
            || last_target.distance(target) > CAMERA_PUBLISH_EPSILON
    });

    if moved {
        scene.published_camera = Some((position, target));
        log_camera_context(&scene.camera);
        publish(scene, SceneEvent::CameraMoved { position, target });
    }
}

/// Switch camera mode, seeding orbit yaw/pitch from the walker's view
pub fn set_scene_camera_mode(scene: &mut SceneState, mode: CameraMode) {
    if scene.camera.mode == mode {
        return;
    }
    scene.camera = crate::camera::set_camera_mode(&scene.camera, mode);
    if mode == CameraMode::Orbit {
        scene.camera.yaw_radians = view_yaw(&scene.locomotion);
        scene.camera.pitch_radians = scene.locomotion.pitch;
    }
    update_camera(scene, &FrameInput::default());
    publish_camera(scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{key_down, key_up, wheel, Key};
    use crate::sampler::handle_sample_height;
    use crate::terrain::walkway_length;
    use crate::timeline::{records_from_raw, RawRecord};

    fn small_config() -> SerraConfig {
        let mut config = SerraConfig::default();
        config.terrain.lateral_segments = 40;
        config
    }

    fn records(days: usize) -> Vec<DailyRecord> {
        let raw: Vec<RawRecord> = (0..days)
            .map(|i| RawRecord {
                date: format!("2021-01-{:02}", i + 1),
                cases: ((i as f32 * 0.4).sin().abs() * 900.0) as u64 + 10,
                deaths: ((i as f32 * 0.25).cos().abs() * 40.0) as u64,
            })
            .collect();
        records_from_raw(&raw).unwrap()
    }

    #[test]
    fn test_empty_scene_ticks_without_terrain() {
        let mut scene = create_scene_state(small_config());
        let step = advance_frame(&mut scene, &FrameInput { forward: 1.0, ..Default::default() }, 0.016);
        assert_eq!(step, RevealStep::default());
        assert_eq!(scene.current_day, 0);
        assert_eq!(handle_sample_height(&scene.sampler, 3.0, 4.0), 0.0);
    }

    #[test]
    fn test_load_walk_and_clear() {
        let mut scene = create_scene_state(small_config());
        let events = subscribe(&mut scene);

        load_series(&mut scene, records(30));
        let first: Vec<SceneEvent> = events.try_iter().collect();
        assert!(matches!(
            first[0],
            SceneEvent::TerrainRebuilt { segments: 300, records: 30 }
        ));
        assert_eq!(first[1], SceneEvent::DayChanged(0));
        assert!(matches!(first[2], SceneEvent::CameraMoved { .. }));
        assert!(sampler_snapshot(&scene.sampler).is_some());

        key_down(&mut scene.input, Key::W);
        key_down(&mut scene.input, Key::Shift);
        let mut touched = 0;
        for _ in 0..60 * 12 {
            touched += tick(&mut scene, 1.0 / 60.0).segments_touched;
        }
        key_up(&mut scene.input, Key::W);
        assert!(touched > 0);
        assert_eq!(scene.current_day, 29);

        let published: Vec<SceneEvent> = events.try_iter().collect();
        let days: Vec<usize> = published
            .iter()
            .filter_map(|e| match e {
                SceneEvent::DayChanged(day) => Some(*day),
                _ => None,
            })
            .collect();
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(days.last(), Some(&29));

        let fronts: Vec<f32> = published
            .iter()
            .filter_map(|e| match e {
                SceneEvent::RevealAdvanced(x) => Some(*x),
                _ => None,
            })
            .collect();
        assert!(!fronts.is_empty());
        assert!(fronts.windows(2).all(|w| w[0] < w[1]));

        // Camera sits at the walker's eye
        assert_eq!(scene.camera.position, scene.locomotion.eye_position);

        clear_scene(&mut scene);
        assert!(scene.terrain.is_none());
        assert!(sampler_snapshot(&scene.sampler).is_none());
        assert_eq!(events.try_iter().last(), Some(SceneEvent::TerrainCleared));
    }

    #[test]
    fn test_small_camera_moves_not_published() {
        let mut scene = create_scene_state(small_config());
        load_series(&mut scene, records(10));
        let events = subscribe(&mut scene);

        // Settled walker: nothing moves
        for _ in 0..5 {
            advance_frame(&mut scene, &FrameInput::default(), 1.0 / 60.0);
        }
        let look = FrameInput {
            yaw_delta: 0.001,
            ..Default::default()
        };
        advance_frame(&mut scene, &look, 1.0 / 60.0);
        assert!(events
            .try_iter()
            .all(|e| !matches!(e, SceneEvent::CameraMoved { .. })));
    }

    #[test]
    fn test_orbit_routes_wheel_to_camera() {
        let mut scene = create_scene_state(small_config());
        load_series(&mut scene, records(20));
        set_scene_camera_mode(&mut scene, CameraMode::Orbit);
        let distance_before = scene.camera.orbit_distance;
        let target_before = scene.locomotion.target_distance;

        wheel(&mut scene.input, 400.0);
        tick(&mut scene, 1.0 / 60.0);

        assert_eq!(scene.locomotion.target_distance, target_before);
        assert!(scene.camera.orbit_distance > distance_before);
        assert_eq!(scene.camera.target, scene.locomotion.eye_position);
        let offset = scene.camera.position.distance(scene.camera.target);
        assert!(offset >= scene.camera.orbit_distance - 1e-3);
    }

    #[test]
    fn test_unvalidated_config_still_builds() {
        let mut config = small_config();
        config.terrain.min_time_segments = 2000;
        config.camera.orbit_min_distance = 300.0;
        let mut scene = create_scene_state(config);

        load_series(
            &mut scene,
            parse_timeline_json(
                r#"[{"date":"2020-01-01","cases":10,"deaths":0},{"date":"2020-01-02","cases":50,"deaths":5},{"date":"2020-01-03","cases":20,"deaths":1}]"#,
            )
            .unwrap(),
        );
        let terrain = scene.terrain.as_ref().unwrap();
        assert_eq!(terrain.mesh.time_segments, scene.config.terrain.max_time_segments);

        set_scene_camera_mode(&mut scene, CameraMode::Orbit);
        wheel(&mut scene.input, -400.0);
        tick(&mut scene, 1.0 / 60.0);
        assert_eq!(scene.camera.orbit_distance, scene.config.camera.orbit_max_distance);
    }

    #[test]
    fn test_undrained_subscriber_is_capped_and_dropped_one_removed() {
        let mut scene = create_scene_state(small_config());
        let idle = subscribe(&mut scene);
        let gone = subscribe(&mut scene);
        drop(gone);

        for day in 0..SUBSCRIBER_CAPACITY + 50 {
            publish(&mut scene, SceneEvent::DayChanged(day));
        }

        assert_eq!(scene.subscribers.len(), 1);
        assert_eq!(idle.len(), SUBSCRIBER_CAPACITY);
        assert_eq!(idle.try_recv().ok(), Some(SceneEvent::DayChanged(0)));

        // Draining makes room again
        publish(&mut scene, SceneEvent::TerrainCleared);
        assert_eq!(idle.try_iter().last(), Some(SceneEvent::TerrainCleared));
    }

    #[test]
    fn test_bad_json_keeps_scene() {
        let mut scene = create_scene_state(small_config());
        load_series(&mut scene, records(12));
        assert!(load_timeline_json(&mut scene, "{not json").is_err());
        assert_eq!(scene.records.len(), 12);

        load_timeline_json(
            &mut scene,
            r#"[{"date":"2020-01-01","cases":1,"deaths":0},{"date":"2020-01-02","cases":5,"deaths":1}]"#,
        )
        .unwrap();
        assert_eq!(scene.records.len(), 2);
        assert!(walkway_length(&scene.terrain.as_ref().unwrap().walkway) > 0.0);
    }
}
