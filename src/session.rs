//! Game session controller
//!
//! Owns the game state across restarts and exposes the external command
//! surface. Commands arriving between ticks are queued and applied
//! atomically at the start of the next `tick`, so all mutation stays
//! serialized through the fixed-step update.

use crate::consts::SIM_DT;
use crate::highscores::HighScoreStore;
use crate::sim::state::{Ball, Brick, GameEvent, GamePhase, GameState, Paddle, Particle, PowerUp};
use crate::sim::tick::{tick, TickInput};
use crate::tuning::Tuning;

pub use crate::sim::tick::PaddleIntent;

/// Read-only view of the session for rendering and HUD collaborators
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    pub level: u32,
    pub phase: GamePhase,
    pub message: &'a str,
    pub paddle: &'a Paddle,
    pub balls: &'a [Ball],
    pub bricks: &'a [Vec<Brick>],
    pub power_up: Option<&'a PowerUp>,
    pub particles: &'a [Particle],
}

/// Top-level controller: one paddle, one run at a time, high score carried
/// across restarts.
pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    high_score: u32,
    seed: u64,
    intent: PaddleIntent,
    pause_pending: bool,
    sound_enabled: bool,
    started: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Build a session and load the stored high score
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::new(seed, tuning),
            store,
            high_score,
            seed,
            intent: PaddleIntent::None,
            pause_pending: false,
            sound_enabled: true,
            started: false,
        }
    }

    /// Begin play. The first call arms the session; later calls are no-ops
    /// (use `restart` to begin over).
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            log::info!("session started at level 1, high score {}", self.high_score);
        }
    }

    /// Unconditionally discard all in-flight entities and timers and begin a
    /// fresh level-1 game. Valid in any phase, including GameOver/Victory.
    pub fn restart(&mut self) {
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(self.seed, tuning);
        self.intent = PaddleIntent::None;
        self.pause_pending = false;
        self.started = true;
        log::info!("session restarted");
    }

    /// Queue a pause/resume toggle for the next tick. A second call before
    /// the tick cancels the first, like a double key-press would.
    pub fn toggle_pause(&mut self) {
        self.pause_pending = !self.pause_pending;
    }

    /// Set the held movement intent
    pub fn set_paddle_intent(&mut self, intent: PaddleIntent) {
        self.intent = intent;
    }

    /// Forwarded to audio collaborators via `sound_enabled`; the engine
    /// itself never consumes it.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Advance the simulation by one fixed step and return the events it
    /// emitted. Callers must invoke this at a stable cadence.
    pub fn tick(&mut self) -> &[GameEvent] {
        if !self.started {
            return &[];
        }
        let input = TickInput {
            dir: self.intent,
            pause: std::mem::take(&mut self.pause_pending),
        };
        tick(&mut self.state, &input, SIM_DT);
        self.persist_high_score_at_terminal();
        &self.state.events
    }

    /// Read-only snapshot for rendering/HUD
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            score: self.state.score,
            high_score: self.high_score,
            lives: self.state.lives,
            level: self.state.level,
            phase: self.state.phase,
            message: &self.state.message,
            paddle: &self.state.paddle,
            balls: &self.state.balls,
            bricks: &self.state.bricks,
            power_up: self.state.power_up.as_ref(),
            particles: &self.state.particles,
        }
    }

    /// Direct state access for collaborators that need more than the snapshot
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A terminal transition happened this tick: persist a beaten high score
    /// exactly once.
    fn persist_high_score_at_terminal(&mut self) {
        let ended = self
            .state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. } | GameEvent::Victory { .. }));
        if ended && self.state.score > self.high_score {
            self.high_score = self.state.score;
            self.store.save(self.high_score);
        }
    }
}
