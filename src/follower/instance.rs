use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::config::{ConfigError, FollowerConfig, FollowerOptions};
use super::pointer::PointerSignal;
use super::schedule::FrameScheduler;
use super::strategy::{self, FollowerState};

static NEXT_FOLLOWER_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide follower identity, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FollowerId(pub u64);

impl FollowerId {
    fn next() -> Self {
        FollowerId(NEXT_FOLLOWER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FollowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the rendering layer applies after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerFrame {
    /// Body translation: position minus the configured offset
    pub translation: Vec2,
    /// Mirror horizontally
    pub flip_x: bool,
    /// Mirror vertically
    pub flip_y: bool,
    /// Eyes translation inside the body box, `None` when eyes are disabled
    pub eyes: Option<Vec2>,
}

impl FollowerFrame {
    /// CSS-style transform for the body, e.g. `translate(3px, 4px) scaleX(-1) scaleY(1)`
    pub fn body_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scaleX({}) scaleY({})",
            self.translation.x,
            self.translation.y,
            if self.flip_x { -1 } else { 1 },
            if self.flip_y { -1 } else { 1 },
        )
    }

    /// CSS-style transform for the eyes, if any
    pub fn eyes_transform(&self) -> Option<String> {
        self.eyes
            .map(|eyes| format!("translate({}px, {}px)", eyes.x, eyes.y))
    }
}

/// One cursor-following sprite: configuration, motion state and its own
/// animation loop
#[derive(Debug)]
pub struct Follower {
    id: FollowerId,
    config: FollowerConfig,
    state: FollowerState,
    enabled: bool,
    visible: bool,
    /// A frame callback is outstanding with the scheduler
    frame_pending: bool,
    last_frame: Option<FollowerFrame>,
    rng: StdRng,
}

impl Follower {
    /// Build a stopped follower at the origin
    pub fn new(config: FollowerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as `new` with a fixed seed for the wobble jitter
    #[cfg(test)]
    pub fn with_seed(config: FollowerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Merge `options` with the defaults, then build
    pub fn from_options(options: &FollowerOptions) -> Result<Self, ConfigError> {
        Self::new(options.resolve())
    }

    fn with_rng(config: FollowerConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let id = FollowerId::next();
        log::debug!(
            "Created follower {} ({} strategy, eyes: {})",
            id,
            config.follow_strategy,
            config.eyes.is_some()
        );

        Ok(Follower {
            id,
            config,
            state: FollowerState::default(),
            enabled: false,
            visible: true,
            frame_pending: false,
            last_frame: None,
            rng,
        })
    }

    pub fn id(&self) -> FollowerId {
        self.id
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn state(&self) -> &FollowerState {
        &self.state
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Output of the most recent tick
    pub fn last_frame(&self) -> Option<&FollowerFrame> {
        self.last_frame.as_ref()
    }

    /// Enable and run the first tick now. A follower that still has a frame
    /// outstanding just resumes on that frame.
    pub fn start(&mut self, pointer: &PointerSignal, scheduler: &mut impl FrameScheduler) {
        self.enabled = true;
        if !self.frame_pending {
            self.tick(pointer, scheduler);
        }
    }

    /// Disable; the outstanding frame (if any) becomes a no-op
    pub fn stop(&mut self) {
        self.enabled = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.stop();
    }

    pub fn show(&mut self, pointer: &PointerSignal, scheduler: &mut impl FrameScheduler) {
        self.visible = true;
        self.start(pointer, scheduler);
    }

    /// Frame callback delivered by the host for an earlier request
    pub fn on_frame(&mut self, pointer: &PointerSignal, scheduler: &mut impl FrameScheduler) {
        self.frame_pending = false;
        self.tick(pointer, scheduler);
    }

    fn tick(&mut self, pointer: &PointerSignal, scheduler: &mut impl FrameScheduler) {
        if !self.enabled {
            return;
        }

        self.last_frame = Some(self.update(pointer));
        self.frame_pending = true;
        scheduler.request_frame(self.id);
    }

    /// One synchronous step: move, then derive the render output
    pub fn update(&mut self, pointer: &PointerSignal) -> FollowerFrame {
        strategy::step(
            self.config.follow_strategy,
            &mut self.state,
            &self.config,
            pointer,
            &mut self.rng,
        );

        let position = self.state.position;
        let offset = Vec2::new(self.config.offset_x, self.config.offset_y);

        // Compared against the live pointer, not the smoothed target
        let flip_x = self.config.xflip && position.x > pointer.x();
        let flip_y = self.config.yflip && position.y > pointer.y();

        let eyes = self
            .config
            .eyes
            .as_ref()
            .map(|eyes| strategy::eyes(&self.state, &self.config, eyes, pointer));

        FollowerFrame {
            translation: position - offset,
            flip_x,
            flip_y,
            eyes,
        }
    }
}
