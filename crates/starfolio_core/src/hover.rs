//! Hover state machine for a single body
//!
//! ```text
//!            enter                 reveal(session)
//!   Idle ------------> Hovered ------------------> InfoShown
//!    ^                    |                            |
//!    +------- leave ------+------------ leave ---------+
//! ```
//!
//! Every enter starts a new [`HoverSession`]. A reveal carrying any other
//! session is stale and ignored, so a reveal scheduled for an earlier hover
//! can never show the labels for a later one.

/// Current hover state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
    InfoShown,
}

/// Generation number identifying one continuous hover
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HoverSession(u64);

impl HoverSession {
    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Per-body hover state plus the current session generation
#[derive(Clone, Debug, Default)]
pub struct HoverMachine {
    state: HoverState,
    generation: u64,
}

impl HoverMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// True while the pointer is over the body
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.state != HoverState::Idle
    }

    #[inline]
    pub fn info_visible(&self) -> bool {
        self.state == HoverState::InfoShown
    }

    /// The session in progress, if any
    pub fn session(&self) -> Option<HoverSession> {
        self.is_hovered().then_some(HoverSession(self.generation))
    }

    /// Pointer moved onto the body
    ///
    /// Returns the new session when this starts a hover. Entering while
    /// already hovered changes nothing and returns `None`.
    pub fn pointer_enter(&mut self) -> Option<HoverSession> {
        if self.state != HoverState::Idle {
            return None;
        }
        self.generation += 1;
        self.state = HoverState::Hovered;
        Some(HoverSession(self.generation))
    }

    /// Pointer moved off the body; returns true if a hover ended
    pub fn pointer_leave(&mut self) -> bool {
        if self.state == HoverState::Idle {
            return false;
        }
        self.state = HoverState::Idle;
        true
    }

    /// Reveal delay elapsed for `session`; returns true if the info is now shown
    pub fn reveal(&mut self, session: HoverSession) -> bool {
        if self.state == HoverState::Hovered && session.0 == self.generation {
            self.state = HoverState::InfoShown;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let machine = HoverMachine::new();
        assert_eq!(machine.state(), HoverState::Idle);
        assert!(!machine.is_hovered());
        assert!(machine.session().is_none());
    }

    #[test]
    fn test_enter_reveal_leave() {
        let mut machine = HoverMachine::new();
        let session = machine.pointer_enter().unwrap();
        assert_eq!(machine.state(), HoverState::Hovered);
        assert_eq!(machine.session(), Some(session));
        assert!(machine.reveal(session));
        assert!(machine.info_visible());
        assert!(machine.pointer_leave());
        assert_eq!(machine.state(), HoverState::Idle);
    }

    #[test]
    fn test_repeat_enter_is_ignored() {
        let mut machine = HoverMachine::new();
        let first = machine.pointer_enter().unwrap();
        assert!(machine.pointer_enter().is_none());
        assert_eq!(machine.session(), Some(first));
    }

    #[test]
    fn test_leave_when_idle() {
        let mut machine = HoverMachine::new();
        assert!(!machine.pointer_leave());
    }

    #[test]
    fn test_stale_reveal_is_ignored() {
        let mut machine = HoverMachine::new();
        let old = machine.pointer_enter().unwrap();
        machine.pointer_leave();
        let new = machine.pointer_enter().unwrap();
        assert_ne!(old, new);
        assert!(!machine.reveal(old));
        assert_eq!(machine.state(), HoverState::Hovered);
        assert!(machine.reveal(new));
    }

    #[test]
    fn test_reveal_after_leave_is_ignored() {
        let mut machine = HoverMachine::new();
        let session = machine.pointer_enter().unwrap();
        machine.pointer_leave();
        assert!(!machine.reveal(session));
        assert_eq!(machine.state(), HoverState::Idle);
    }

    #[test]
    fn test_double_reveal_only_fires_once() {
        let mut machine = HoverMachine::new();
        let session = machine.pointer_enter().unwrap();
        assert!(machine.reveal(session));
        assert!(!machine.reveal(session));
        assert!(machine.info_visible());
    }
}
