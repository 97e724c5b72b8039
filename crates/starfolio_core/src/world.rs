//! World container for the space scene
//!
//! The SpaceWorld owns the actor, the follow camera and every orbiting body,
//! and routes input and timer events to them.

use std::time::Duration;

use bitflags::bitflags;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use starfolio_math::Vec3;

use crate::actor::{Actor, ActorCommand, ActorParams, ControlScheme};
use crate::audio::{SoundEffect, SoundEffects, SoundEvent};
use crate::body::{BodyLabel, OrbitingBody};
use crate::camera_rig::CameraRig;
use crate::clock::{FrameStep, SceneClock};
use crate::hover::HoverSession;
use crate::timers::{TimerKey, TimerQueue};
use crate::transform::Transform;

new_key_type! {
    /// Generational key to a body in the world
    pub struct BodyKey;
}

bitflags! {
    /// Flags indicating which derived visuals need refreshing
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// A body's highlight (emissive) changed
        const HIGHLIGHT = 1 << 0;
        /// A body's labels appeared or disappeared
        const LABELS = 1 << 1;
        /// The body set changed
        const BODIES = 1 << 2;
        /// Everything
        const ALL = Self::HIGHLIGHT.bits() | Self::LABELS.bits() | Self::BODIES.bits();
    }
}

/// Pointer interaction with a body, produced by picking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(BodyKey),
    Leave(BodyKey),
    Click(BodyKey),
}

/// Pending label reveal for one hover session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Reveal {
    body: BodyKey,
    session: HoverSession,
}

/// Parameters used to build a [`SpaceWorld`]
#[derive(Clone, Debug)]
pub struct WorldSettings {
    pub scheme: ControlScheme,
    /// Motion constants; `None` uses the scheme's preset
    pub actor_params: Option<ActorParams>,
    pub actor_spawn: Transform,
    pub camera_start: Vec3,
    pub camera_offset: Vec3,
    pub camera_blend: f32,
    /// Time between hover start and label reveal
    pub reveal_delay: Duration,
    pub effects: SoundEffects,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            scheme: ControlScheme::AutoAdvance,
            actor_params: None,
            actor_spawn: Transform::identity(),
            camera_start: Vec3::new(0.0, 5.0, 10.0),
            camera_offset: CameraRig::DEFAULT_OFFSET,
            camera_blend: CameraRig::DEFAULT_BLEND,
            reveal_delay: Duration::from_millis(500),
            effects: SoundEffects::default(),
        }
    }
}

/// The space scene's live state
pub struct SpaceWorld {
    actor: Actor,
    camera: CameraRig,
    bodies: SlotMap<BodyKey, OrbitingBody>,
    timers: TimerQueue<Reveal>,
    pending_reveals: SecondaryMap<BodyKey, TimerKey>,
    sounds: Vec<SoundEvent>,
    effects: SoundEffects,
    reveal_delay: Duration,
    clock: SceneClock,
    dirty: DirtyFlags,
}

impl Default for SpaceWorld {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl SpaceWorld {
    /// Create a world with an actor and camera but no bodies
    pub fn new(settings: WorldSettings) -> Self {
        let mut actor = Actor::new(settings.actor_spawn, settings.scheme);
        if let Some(params) = settings.actor_params {
            actor = actor.with_params(params);
        }
        let camera = CameraRig::new(settings.camera_start)
            .with_offset(settings.camera_offset)
            .with_blend(settings.camera_blend)
            .with_follow_roll(settings.scheme.camera_follows_roll());

        Self {
            actor,
            camera,
            bodies: SlotMap::with_key(),
            timers: TimerQueue::new(),
            pending_reveals: SecondaryMap::new(),
            sounds: Vec::new(),
            effects: settings.effects,
            reveal_delay: settings.reveal_delay,
            clock: SceneClock::new(),
            dirty: DirtyFlags::ALL,
        }
    }

    /// Add a body to the world, returning its key
    pub fn add_body(&mut self, body: OrbitingBody) -> BodyKey {
        self.dirty |= DirtyFlags::BODIES;
        self.bodies.insert(body)
    }

    /// Get a reference to a body by key
    pub fn body(&self, key: BodyKey) -> Option<&OrbitingBody> {
        self.bodies.get(key)
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &OrbitingBody)> {
        self.bodies.iter()
    }

    /// Find the first body with the given name
    pub fn find_body(&self, name: &str) -> Option<BodyKey> {
        self.bodies.iter().find(|(_, b)| b.name() == name).map(|(k, _)| k)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    #[inline]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Current scene time
    #[inline]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[inline]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    #[inline]
    pub fn effects(&self) -> &SoundEffects {
        &self.effects
    }

    /// Apply a keyboard command to the actor
    pub fn handle_command(&mut self, command: ActorCommand) {
        self.actor.apply(command);
    }

    /// Route a pointer event to its body
    ///
    /// Events for unknown keys are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(key) => self.pointer_enter(key),
            PointerEvent::Leave(key) => self.pointer_leave(key),
            PointerEvent::Click(key) => self.pointer_click(key),
        }
    }

    fn pointer_enter(&mut self, key: BodyKey) {
        let Some(body) = self.bodies.get_mut(key) else {
            return;
        };
        let Some(session) = body.hover_mut().pointer_enter() else {
            return;
        };
        log::debug!("Hover start: {}", body.name());
        let source = body.name().to_string();

        let due = self.clock.now() + self.reveal_delay;
        let timer = self.timers.schedule(due, Reveal { body: key, session });
        if let Some(stale) = self.pending_reveals.insert(key, timer) {
            self.timers.cancel(stale);
        }

        let effect = self.effects.hover.clone();
        self.emit(effect, source);
        self.dirty |= DirtyFlags::HIGHLIGHT;
    }

    fn pointer_leave(&mut self, key: BodyKey) {
        let Some(body) = self.bodies.get_mut(key) else {
            return;
        };
        let was_shown = body.hover().info_visible();
        if !body.hover_mut().pointer_leave() {
            return;
        }
        log::debug!("Hover end: {}", body.name());
        if let Some(timer) = self.pending_reveals.remove(key) {
            self.timers.cancel(timer);
        }
        self.dirty |= DirtyFlags::HIGHLIGHT;
        if was_shown {
            self.dirty |= DirtyFlags::LABELS;
        }
    }

    fn pointer_click(&mut self, key: BodyKey) {
        let Some(body) = self.bodies.get(key) else {
            return;
        };
        let source = body.name().to_string();
        let effect = self.effects.click.clone();
        self.emit(effect, source);
    }

    fn emit(&mut self, effect: SoundEffect, source: String) {
        self.sounds.push(SoundEvent {
            effect,
            source: Some(source),
        });
    }

    /// Advance the scene by one frame
    ///
    /// Due reveals fire first, then the actor moves, bodies spin and the
    /// camera eases toward its new desired position.
    pub fn update(&mut self, step: FrameStep) {
        let now = self.clock.advance(step.dt);
        for reveal in self.timers.drain_due(now) {
            self.pending_reveals.remove(reveal.body);
            if let Some(body) = self.bodies.get_mut(reveal.body) {
                if body.hover_mut().reveal(reveal.session) {
                    log::debug!("Info shown: {}", body.name());
                    self.dirty |= DirtyFlags::LABELS;
                }
            }
        }

        self.actor.tick(step);
        for body in self.bodies.values_mut() {
            body.tick(step);
        }
        self.camera.follow(&self.actor, step);
    }

    /// Take every sound queued since the last drain
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    /// Labels of every body whose info is currently shown
    pub fn labels(&self) -> Vec<BodyLabel> {
        self.bodies.values().filter_map(OrbitingBody::label).collect()
    }

    /// Put the actor and camera back where the scene started
    pub fn reset(&mut self) {
        log::info!("Resetting rocket and camera");
        self.actor.reset();
        self.camera.reset();
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Number of reveals still waiting on the clock
    #[inline]
    pub fn pending_reveal_count(&self) -> usize {
        self.timers.len()
    }
}
