//! Boot phase
//!
//! A loading placeholder is shown for a fixed delay before the first real
//! frame. Time is fed in explicitly so the phase is deterministic under test.

use std::f32::consts::TAU;
use std::time::Duration;

/// Loading placeholder shown before the scene appears
#[derive(Clone, Debug)]
pub struct BootScreen {
    delay: Duration,
    elapsed: Duration,
    progress: f32,
}

impl BootScreen {
    /// Default time the placeholder stays up
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    /// Create a boot phase lasting `delay`
    pub fn new(delay: Duration) -> Self {
        let mut boot = Self {
            delay,
            elapsed: Duration::ZERO,
            progress: 0.0,
        };
        boot.refresh();
        boot
    }

    /// Advance by `dt`
    ///
    /// Returns true only on the call that completes the boot phase.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.is_complete() {
            return false;
        }
        self.elapsed += dt;
        self.refresh();
        if self.is_complete() {
            log::info!("Boot complete after {:?}", self.elapsed);
            true
        } else {
            false
        }
    }

    fn refresh(&mut self) {
        self.progress = if self.delay.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.delay.as_secs_f32()).min(1.0)
        };
    }

    /// Get current progress (0.0 = start, 1.0 = complete)
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check if the boot phase is over
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Opacity of the placeholder text, pulsing once per second between 0.4 and 1.0
    pub fn placeholder_alpha(&self) -> f32 {
        let phase = self.elapsed.as_secs_f32() * TAU;
        0.7 + 0.3 * phase.cos()
    }
}

impl Default for BootScreen {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_loading() {
        let boot = BootScreen::default();
        assert!(!boot.is_complete());
        assert_eq!(boot.progress(), 0.0);
        assert_eq!(boot.delay(), ms(1000));
    }

    #[test]
    fn test_completes_at_delay() {
        let mut boot = BootScreen::default();
        assert!(!boot.advance(ms(600)));
        assert!((boot.progress() - 0.6).abs() < 0.0001);
        assert!(!boot.advance(ms(399)));
        assert!(boot.advance(ms(1)));
        assert!(boot.is_complete());
    }

    #[test]
    fn test_completion_reported_once() {
        let mut boot = BootScreen::default();
        assert!(boot.advance(ms(5000)));
        assert!(!boot.advance(ms(16)));
        assert_eq!(boot.progress(), 1.0);
    }

    #[test]
    fn test_zero_delay_is_complete_immediately() {
        let mut boot = BootScreen::new(Duration::ZERO);
        assert!(boot.is_complete());
        assert!(!boot.advance(ms(16)));
    }

    #[test]
    fn test_placeholder_alpha_range() {
        let mut boot = BootScreen::default();
        assert!((boot.placeholder_alpha() - 1.0).abs() < 0.0001);
        boot.advance(ms(500));
        assert!((boot.placeholder_alpha() - 0.4).abs() < 0.0001);
    }
}
