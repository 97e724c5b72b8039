//! Game simulation system
//!
//! Manages the simulation side of a frame:
//! - Delta time calculation
//! - Boot (loading screen) timing
//! - World stepping under the configured motion mode
//! - Draining queued sounds into the audio sink

use std::time::{Duration, Instant};

use starfolio_core::{AudioSink, BootScreen, FrameStep, MotionMode, SpaceWorld};

use crate::config::MotionConfig;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    /// Step the world was advanced by, `None` while booting
    pub step: Option<FrameStep>,
    /// The loading screen finished on this frame
    pub boot_finished: bool,
    /// Number of sounds handed to the sink
    pub sounds_played: usize,
}

/// Manages the simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    mode: MotionMode,
    max_dt: Duration,
    boot: BootScreen,
}

impl SimulationSystem {
    /// Create a simulation system that boots for `boot_delay`
    pub fn new(motion: &MotionConfig, boot_delay: Duration) -> Self {
        Self {
            last_frame: Instant::now(),
            mode: motion.mode(),
            max_dt: motion.max_dt(),
            boot: BootScreen::new(boot_delay),
        }
    }

    /// Run one frame using wall-clock time since the previous call
    pub fn update(&mut self, world: &mut SpaceWorld, sink: &mut dyn AudioSink) -> SimulationResult {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.advance(dt, world, sink)
    }

    /// Run one frame covering `dt`
    ///
    /// While the loading screen is up only the boot timer advances; the world
    /// starts ticking on the frame after it completes.
    pub fn advance(
        &mut self,
        dt: Duration,
        world: &mut SpaceWorld,
        sink: &mut dyn AudioSink,
    ) -> SimulationResult {
        if !self.boot.is_complete() {
            let boot_finished = self.boot.advance(dt);
            return SimulationResult {
                step: None,
                boot_finished,
                sounds_played: 0,
            };
        }

        let step = FrameStep::from_elapsed(dt, self.mode, self.max_dt);
        world.update(step);

        let sounds = world.drain_sounds();
        for sound in &sounds {
            sink.play(sound);
        }

        SimulationResult {
            step: Some(step),
            boot_finished: false,
            sounds_played: sounds.len(),
        }
    }

    pub fn boot(&self) -> &BootScreen {
        &self.boot
    }

    pub fn is_booting(&self) -> bool {
        !self.boot.is_complete()
    }

    /// Forget the time spent outside the frame loop (e.g. while minimized)
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfolio_core::{OrbitingBody, PointerEvent, RecordingSink};
    use starfolio_math::Vec3;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn per_frame() -> MotionConfig {
        MotionConfig {
            time_scaled: false,
            ..MotionConfig::default()
        }
    }

    #[test]
    fn test_world_frozen_during_boot() {
        let mut sim = SimulationSystem::new(&per_frame(), ms(1000));
        let mut world = SpaceWorld::default();
        let mut sink = RecordingSink::new();

        let result = sim.advance(ms(400), &mut world, &mut sink);
        assert_eq!(result.step, None);
        assert!(sim.is_booting());
        assert_eq!(world.actor().rotation().z, 0.0);

        let result = sim.advance(ms(600), &mut world, &mut sink);
        assert!(result.boot_finished);
        assert!(!sim.is_booting());
        assert_eq!(world.actor().rotation().z, 0.0);

        let result = sim.advance(ms(16), &mut world, &mut sink);
        assert_eq!(result.step.map(|s| s.scale), Some(1.0));
        assert!((world.actor().rotation().z + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_time_scaled_step() {
        let mut sim = SimulationSystem::new(&MotionConfig::default(), Duration::ZERO);
        let mut world = SpaceWorld::default();
        let mut sink = RecordingSink::new();

        let result = sim.advance(Duration::from_secs_f32(1.0 / 30.0), &mut world, &mut sink);
        let scale = result.step.map(|s| s.scale).unwrap_or_default();
        assert!((scale - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_frames_cap_motion() {
        let mut sim = SimulationSystem::new(&MotionConfig::default(), Duration::ZERO);
        let mut world = SpaceWorld::default();
        let mut sink = RecordingSink::new();

        let result = sim.advance(Duration::from_secs(5), &mut world, &mut sink);
        let scale = result.step.map(|s| s.scale).unwrap_or_default();
        assert!((scale - 15.0).abs() < 1e-4);
        assert_eq!(world.now(), Duration::from_secs(5));
    }

    #[test]
    fn test_reveal_after_one_long_frame() {
        let mut sim = SimulationSystem::new(&MotionConfig::default(), Duration::ZERO);
        let mut world = SpaceWorld::default();
        let key = world.add_body(OrbitingBody::new("Skills", Vec3::new(5.0, 0.0, 0.0), 1.0, [1.0; 3]));
        let mut sink = RecordingSink::new();

        world.handle_pointer(PointerEvent::Enter(key));
        sim.advance(ms(600), &mut world, &mut sink);

        assert_eq!(world.now(), ms(600));
        assert!(world.body(key).map(|b| b.hover().info_visible()).unwrap_or(false));
    }

    #[test]
    fn test_sounds_reach_sink() {
        let mut sim = SimulationSystem::new(&per_frame(), Duration::ZERO);
        let mut world = SpaceWorld::default();
        let key = world.add_body(OrbitingBody::new("Skills", Vec3::new(5.0, 0.0, 0.0), 1.0, [1.0; 3]));
        let mut sink = RecordingSink::new();

        world.handle_pointer(PointerEvent::Enter(key));
        world.handle_pointer(PointerEvent::Click(key));
        let result = sim.advance(ms(16), &mut world, &mut sink);

        assert_eq!(result.sounds_played, 2);
        assert_eq!(sink.ids(), vec!["hover", "click"]);
    }
}
