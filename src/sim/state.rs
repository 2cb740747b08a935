//! Game state and core simulation types
//!
//! The whole session lives in one `GameState`; only the phase, spawn and
//! tick handlers mutate it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::{FrameLoop, Interval, Timeout};
use super::spawn::HeartVariant;
use crate::consts::*;
use crate::tuning::Tuning;

/// Heart identifier, unique within a session
pub type HeartId = u32;

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    Start,
    /// Hearts are falling
    Playing,
    /// Every heart caught, final screen shown
    Final,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Final => "final",
        }
    }
}

/// A falling heart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub id: HeartId,
    /// Spawn position (px, play-area relative)
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub variant: HeartVariant,
    /// Set once, when the loop registers the catch
    pub caught: bool,
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Horizontal center, percent of play area width in [5, 95]
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Basket {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: BASKET_X_START,
            width,
            height,
        }
    }

    /// Move to a normalized position (clamped to [5, 95])
    pub fn set_position(&mut self, percent: f32) {
        if percent.is_nan() {
            return;
        }
        self.x = percent.clamp(BASKET_X_MIN, BASKET_X_MAX);
    }

    /// Convert a pointer offset from the play area's left edge to a basket position
    pub fn percent_from_pointer(relative_x: f32, area_width: f32) -> Option<f32> {
        if area_width <= 0.0 || !relative_x.is_finite() {
            return None;
        }
        Some((relative_x / area_width * 100.0).clamp(BASKET_X_MIN, BASKET_X_MAX))
    }

    /// Slide toward a target position at a bounded speed (percent per second)
    pub fn move_toward(&mut self, target: f32, dt: f32, max_speed: f32) {
        let max_delta = max_speed * dt;
        let delta = (target - self.x).clamp(-max_delta, max_delta);
        self.set_position(self.x + delta);
    }

    /// Horizontal center in pixels
    #[inline]
    pub fn center_px(&self, area_width: f32) -> f32 {
        self.x / 100.0 * area_width
    }
}

/// Play area size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False until the host reports real dimensions
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Events for the UI, drained by the host after each step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase },
    HeartSpawned { heart: Heart },
    HeartCaught { heart: Heart, message_index: usize },
    HeartMissed { heart: Heart },
    ScoreChanged { score: u32 },
    /// The revealed message's display time ran out
    MessageHidden,
}

/// Currently displayed message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message_index: usize,
    pub hide: Timeout,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Spawner rng, seeded once per game instance
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Catches this session
    pub score: u32,
    /// Catches needed to finish (one per message)
    pub total_targets: u32,
    /// Live hearts in spawn order
    pub hearts: Vec<Heart>,
    pub basket: Basket,
    pub play_area: PlayArea,
    /// Simulation clock (seconds)
    pub time: f64,
    pub tuning: Tuning,
    pub spawn_timer: Interval,
    pub frame_loop: FrameLoop,
    pub final_timer: Timeout,
    pub toast: Option<Toast>,
    /// A spawn fired before the play area was measured
    pub spawn_deferred: bool,
    events: Vec<GameEvent>,
    next_id: HeartId,
}

impl GameState {
    pub fn new(seed: u64, total_targets: u32, tuning: Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            total_targets: total_targets.max(1),
            hearts: Vec::new(),
            basket: Basket::new(tuning.basket_width, tuning.basket_height),
            play_area: PlayArea::default(),
            time: 0.0,
            spawn_timer: Interval::new(tuning.spawn_interval_secs),
            frame_loop: FrameLoop::new(),
            final_timer: Timeout::new(),
            toast: None,
            spawn_deferred: false,
            events: Vec::new(),
            next_id: 0,
            tuning,
        }
    }

    /// Allocate a new heart id
    pub fn next_entity_id(&mut self) -> HeartId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear per-session counters and hearts
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.hearts.clear();
        self.next_id = 0;
        self.toast = None;
        self.spawn_deferred = false;
        self.final_timer.cancel();
    }

    /// Host reports a layout change
    pub fn resize(&mut self, width: f32, height: f32) {
        self.play_area = PlayArea::new(width, height);
    }

    /// Pointer input; ignored outside `Playing`
    pub fn set_basket_position(&mut self, percent: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.basket.set_position(percent);
    }

    pub fn target_reached(&self) -> bool {
        self.score >= self.total_targets
    }

    pub fn heart(&self, id: HeartId) -> Option<&Heart> {
        self.hearts.iter().find(|h| h.id == id)
    }

    /// Remove a heart from the live set; `None` if it was already gone
    pub fn remove_heart(&mut self, id: HeartId) -> Option<Heart> {
        let idx = self.hearts.iter().position(|h| h.id == id)?;
        Some(self.hearts.remove(idx))
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
