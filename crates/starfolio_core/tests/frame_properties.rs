//! Frame-by-frame behavior of the rocket, follow camera and planet hover
//! states, exercised through the public SpaceWorld API.

use std::time::Duration;

use starfolio_core::{
    ActorCommand, ControlScheme, FrameStep, HoverState, MotionMode, OrbitingBody, PointerEvent, SpaceWorld,
    Vec3, WorldSettings,
};

const EPSILON: f32 = 0.00001;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn frame() -> FrameStep {
    FrameStep::per_frame(ms(16))
}

fn world() -> SpaceWorld {
    let mut world = SpaceWorld::new(WorldSettings::default());
    world.add_body(
        OrbitingBody::new("Skills", Vec3::new(8.0, 0.0, -5.0), 1.0, [0.27, 0.27, 1.0])
            .with_info("JavaScript • React • Three.js • Node.js")
            .with_spin_rate(0.01)
            .with_decoration(),
    );
    world
}

#[test]
fn idle_frames_only_roll() {
    let mut world = world();
    for _ in 0..120 {
        world.update(frame());
    }
    assert_eq!(world.actor().position(), Vec3::ZERO);
    let roll = world.actor().rotation().z;
    assert!((roll - 120.0 * -0.01).abs() < 0.0001, "roll {}", roll);
}

#[test]
fn engine_one_frame_moves_speed_toward_negative_z() {
    let mut world = world();
    world.handle_command(ActorCommand::ToggleEngine);
    world.update(frame());
    let p = world.actor().position();
    assert!((p - Vec3::new(0.0, 0.0, -0.01)).length() < EPSILON, "{:?}", p);
}

#[test]
fn camera_closes_tenth_of_gap_from_any_direction() {
    for start in [
        Vec3::new(0.0, 5.0, 10.0),
        Vec3::new(-30.0, 0.0, 0.0),
        Vec3::new(4.0, -9.0, -12.0),
    ] {
        let settings = WorldSettings {
            camera_start: start,
            ..WorldSettings::default()
        };
        let mut world = SpaceWorld::new(settings);
        let desired = world.camera().desired_position(world.actor());
        let before = (world.camera().position() - desired).length();
        world.update(FrameStep::unit());
        // Roll changed but the camera offset ignores roll, so desired is unchanged
        let after = (world.camera().position() - desired).length();
        assert!((after - 0.9 * before).abs() < 0.0001, "{} vs {}", after, before);
    }
}

#[test]
fn camera_converges_without_overshoot() {
    let mut world = world();
    let desired = world.camera().desired_position(world.actor());
    let mut last = f32::MAX;
    for _ in 0..200 {
        world.update(frame());
        let gap = (world.camera().position() - desired).length();
        assert!(gap <= last);
        last = gap;
    }
    assert!(last < 0.001);
}

#[test]
fn time_scaled_camera_matches_per_frame_camera() {
    let settings = WorldSettings::default();
    let mut per_frame = SpaceWorld::new(settings.clone());
    let mut scaled = SpaceWorld::new(settings);

    for _ in 0..4 {
        per_frame.update(FrameStep::unit());
    }
    let step = FrameStep::from_elapsed(
        Duration::from_secs_f32(4.0 / 60.0),
        MotionMode::TimeScaled { reference_hz: 60.0 },
        Duration::from_secs(1),
    );
    scaled.update(step);

    let a = per_frame.camera().position();
    let b = scaled.camera().position();
    assert!((a - b).length() < 0.001, "{:?} vs {:?}", a, b);
    assert!((per_frame.actor().rotation().z - scaled.actor().rotation().z).abs() < 0.0001);
}

#[test]
fn enter_then_leave_before_delay_never_shows_info() {
    let mut world = world();
    let key = world.find_body("Skills").unwrap();
    world.handle_pointer(PointerEvent::Enter(key));
    for _ in 0..20 {
        world.update(frame());
    }
    world.handle_pointer(PointerEvent::Leave(key));
    for _ in 0..100 {
        world.update(frame());
        assert!(world.labels().is_empty());
    }
    assert_eq!(world.body(key).unwrap().hover().state(), HoverState::Idle);
}

#[test]
fn held_hover_shows_info_once_at_or_after_delay() {
    let mut world = world();
    let key = world.find_body("Skills").unwrap();
    world.handle_pointer(PointerEvent::Enter(key));
    let entered_at = world.now();

    let mut shown_at = None;
    let mut reveals = 0;
    let mut was_shown = false;
    for _ in 0..100 {
        world.update(frame());
        let shown = world.body(key).unwrap().hover().info_visible();
        if shown && !was_shown {
            reveals += 1;
            shown_at.get_or_insert(world.now());
        }
        was_shown = shown;
    }
    assert_eq!(reveals, 1);
    let shown_at = shown_at.unwrap();
    assert!(shown_at - entered_at >= world.reveal_delay());
    assert!(shown_at - entered_at < world.reveal_delay() + ms(16));

    let label = &world.labels()[0];
    assert_eq!(label.name, "Skills");
    assert!((label.name_anchor - Vec3::new(8.0, 2.5, -5.0)).length() < EPSILON);
}

#[test]
fn clicks_never_change_hover_state() {
    let mut world = world();
    let key = world.find_body("Skills").unwrap();

    world.handle_pointer(PointerEvent::Click(key));
    assert_eq!(world.body(key).unwrap().hover().state(), HoverState::Idle);

    world.handle_pointer(PointerEvent::Enter(key));
    world.handle_pointer(PointerEvent::Click(key));
    world.handle_pointer(PointerEvent::Click(key));
    assert_eq!(world.body(key).unwrap().hover().state(), HoverState::Hovered);

    world.update(FrameStep::per_frame(ms(600)));
    world.handle_pointer(PointerEvent::Click(key));
    assert_eq!(world.body(key).unwrap().hover().state(), HoverState::InfoShown);

    let ids: Vec<String> = world.drain_sounds().into_iter().map(|s| s.effect.id).collect();
    assert_eq!(ids, vec!["click", "hover", "click", "click", "click"]);
}

#[test]
fn yaw_tick_engine_tick_scenario() {
    let mut world = world();
    world.handle_command(ActorCommand::YawLeft);
    world.update(FrameStep::unit());
    world.handle_command(ActorCommand::ToggleEngine);
    world.update(FrameStep::unit());

    let actor = world.actor();
    assert!((actor.rotation().y - 0.01).abs() < EPSILON);
    assert!((actor.rotation().z - -0.02).abs() < EPSILON);
    let forward = Vec3::new(0.01f32.sin(), 0.0, 0.01f32.cos());
    let expected = -forward * 0.01;
    assert!((actor.position() - expected).length() < EPSILON, "{:?}", actor.position());
}

#[test]
fn free_fly_has_no_spin_and_immediate_nudges() {
    let settings = WorldSettings {
        scheme: ControlScheme::FreeFly,
        ..WorldSettings::default()
    };
    let mut world = SpaceWorld::new(settings);
    world.handle_command(ActorCommand::NudgeForward);
    assert!((world.actor().position() - Vec3::new(0.0, 0.0, 0.2)).length() < EPSILON);
    world.handle_command(ActorCommand::ToggleEngine);
    for _ in 0..10 {
        world.update(frame());
    }
    assert_eq!(world.actor().rotation().z, 0.0);
}

#[test]
fn planets_keep_spinning_through_hover() {
    let mut world = world();
    let key = world.find_body("Skills").unwrap();
    world.handle_pointer(PointerEvent::Enter(key));
    for _ in 0..10 {
        world.update(FrameStep::unit());
    }
    world.handle_pointer(PointerEvent::Leave(key));
    for _ in 0..10 {
        world.update(FrameStep::unit());
    }
    let spin = world.body(key).unwrap().transform().rotation.y;
    assert!((spin - 0.2).abs() < 0.0001);
}

#[test]
fn hitch_frame_still_reveals_on_wall_clock() {
    let mut world = world();
    let key = world.find_body("Skills").unwrap();
    world.handle_pointer(PointerEvent::Enter(key));

    let hitch = FrameStep::from_elapsed(ms(600), MotionMode::default(), ms(250));
    world.update(hitch);

    assert_eq!(world.now(), ms(600));
    assert_eq!(world.body(key).unwrap().hover().state(), HoverState::InfoShown);
    // Motion only covers the capped 250 ms
    let roll = world.actor().rotation().z;
    assert!((roll - 15.0 * -0.01).abs() < 0.0001, "roll {}", roll);
}
