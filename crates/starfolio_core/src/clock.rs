//! Frame stepping and scene time
//!
//! Per-frame constants (speeds, spin rates, blend factors) are expressed in
//! "reference frames". A [`FrameStep`] says how many reference frames one
//! real frame counts for, and carries the wall-clock duration used by the
//! scene clock and its timers.

use std::time::Duration;

/// How per-frame constants relate to elapsed time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionMode {
    /// Every rendered frame advances by exactly one reference frame
    PerFrame,
    /// Advance by `dt * reference_hz` reference frames
    TimeScaled { reference_hz: f32 },
}

impl Default for MotionMode {
    fn default() -> Self {
        MotionMode::TimeScaled { reference_hz: 60.0 }
    }
}

/// One tick of the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Reference frames covered by this tick
    pub scale: f32,
    /// Wall-clock time covered by this tick
    pub dt: Duration,
}

impl FrameStep {
    /// A single reference frame that takes no scene time
    pub const fn unit() -> Self {
        Self { scale: 1.0, dt: Duration::ZERO }
    }

    /// A single reference frame lasting `dt`
    pub const fn per_frame(dt: Duration) -> Self {
        Self { scale: 1.0, dt }
    }

    /// Build a step for `dt` under the given motion mode
    ///
    /// `max_dt` caps only the motion scale, so a stalled window does not
    /// launch the rocket across the scene when it resumes. `dt` itself is
    /// kept whole; scene timers run on wall-clock time.
    pub fn from_elapsed(dt: Duration, mode: MotionMode, max_dt: Duration) -> Self {
        let scale = match mode {
            MotionMode::PerFrame => 1.0,
            MotionMode::TimeScaled { reference_hz } => dt.min(max_dt).as_secs_f32() * reference_hz,
        };
        Self { scale, dt }
    }
}

/// Monotonic scene time built from frame steps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneClock {
    now: Duration,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.now += dt;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_per_frame_mode_ignores_dt() {
        let step = FrameStep::from_elapsed(Duration::from_millis(50), MotionMode::PerFrame, Duration::from_secs(1));
        assert_eq!(step.scale, 1.0);
        assert_eq!(step.dt, Duration::from_millis(50));
    }

    #[test]
    fn test_time_scaled_mode() {
        let mode = MotionMode::TimeScaled { reference_hz: 60.0 };
        let step = FrameStep::from_elapsed(Duration::from_millis(50), mode, Duration::from_secs(1));
        assert!((step.scale - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_long_frame_caps_scale_not_dt() {
        let mode = MotionMode::default();
        let step = FrameStep::from_elapsed(Duration::from_secs(5), mode, Duration::from_millis(100));
        assert!((step.scale - 6.0).abs() < EPSILON);
        assert_eq!(step.dt, Duration::from_secs(5));
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = SceneClock::new();
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.advance(Duration::from_millis(4)), Duration::from_millis(20));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }
}
