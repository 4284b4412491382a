//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. The whole
//! session is one explicit object; nothing in the engine closes over
//! module-level mutables.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Paused, either explicitly or after losing a ball with lives left
    Paused,
    /// Timed interstitial between cleared level and the next board
    LevelTransition,
    /// Run ended with no lives left (terminal)
    GameOver,
    /// All levels cleared (terminal)
    Victory,
}

impl GamePhase {
    /// Terminal phases only leave via an explicit restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Discrete notifications emitted by the engine for audio/UI collaborators.
/// Fire-and-forget; drained once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce,
    BrickDamaged,
    BrickDestroyed,
    IndestructibleHit,
    LifeLost,
    ComboBonus { bonus: u32 },
    PowerUpCollected { kind: PowerUpKind },
    LevelUp { level: u32 },
    GameOver { score: u32 },
    Victory { score: u32 },
}

/// A ball entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the serve position above the paddle
    pub fn serve(id: u32, speed: f32, dx_sign: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT - 40.0),
            vel: Vec2::new(speed * dx_sign, -speed),
            radius: BALL_RADIUS,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge x
    pub x: f32,
    /// Current width (mutable under the Expand effect)
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (BOARD_WIDTH - PADDLE_BASE_WIDTH) / 2.0,
            width: PADDLE_BASE_WIDTH,
        }
    }
}

impl Paddle {
    /// Horizontal center
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Slide by `delta`, clamped to the playfield
    pub fn slide(&mut self, delta: f32) {
        self.x = (self.x + delta).clamp(0.0, BOARD_WIDTH - self.width);
    }
}

/// Brick kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Takes several hits, darkening as it is damaged
    Multi,
    /// Absorbs unlimited hits and is excluded from the win condition
    Indestructible,
}

/// Sentinel hit count for Indestructible bricks
pub const HITS_UNBREAKABLE: u8 = u8::MAX;

/// Color palette for Normal bricks, indexed by (level + row + col)
pub const BRICK_PALETTE: [u32; 6] = [0xe67e22, 0xc0392b, 0x8e44ad, 0x2980b9, 0x27ae60, 0xf39c12];
/// Fixed color for Multi bricks
pub const MULTI_COLOR: u32 = 0x8e44ad;
/// Fixed color for Indestructible bricks
pub const INDESTRUCTIBLE_COLOR: u32 = 0x555555;
/// Color a Multi brick fades to once damaged
pub const DAMAGED_COLOR: u32 = 0xdddddd;

/// A brick cell in the grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Brick {
    pub col: u32,
    pub row: u32,
    /// Top-left corner in board coordinates, assigned at layout time
    pub pos: Vec2,
    pub kind: BrickKind,
    /// Remaining hits; `HITS_UNBREAKABLE` for Indestructible
    pub hits_left: u8,
    pub alive: bool,
    /// Current display color (mutates as Multi bricks take damage)
    pub color: u32,
}

impl Brick {
    /// Center point in board coordinates
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(BRICK_WIDTH / 2.0, BRICK_HEIGHT / 2.0)
    }

    /// Whether this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind != BrickKind::Indestructible
    }
}

/// Falling power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Widen the paddle for a while
    Expand,
    /// Scale all ball velocities down for a while
    Slow,
    /// One extra life, applied immediately
    ExtraLife,
}

impl PowerUpKind {
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Expand => 0x2ecc40,
            PowerUpKind::Slow => 0x00bcd4,
            PowerUpKind::ExtraLife => 0xffe066,
        }
    }
}

/// A falling power-up pickup. At most one exists at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub color: u32,
}

/// The single timed effect currently modifying paddle width or ball speed.
/// ExtraLife never occupies this slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActivePower {
    pub kind: PowerUpKind,
    pub ticks_left: u32,
}

/// Consecutive-destruction combo tracker
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComboState {
    /// Destructions inside the current window
    pub count: u32,
    /// Ticks until the count resets; 0 means the window is closed
    pub window_ticks: u32,
}

impl ComboState {
    /// Record one brick destruction; returns the bonus to award, if the
    /// count is past the threshold. Fires once per qualifying destruction.
    pub fn record_destruction(&mut self, tuning: &Tuning) -> Option<u32> {
        self.count += 1;
        self.window_ticks = tuning.combo_window_ticks;
        (self.count > tuning.combo_threshold).then(|| self.count * tuning.combo_bonus_per)
    }

    /// Per-tick countdown; the count resets when the window closes
    pub fn decay(&mut self) {
        if self.window_ticks > 0 {
            self.window_ticks -= 1;
            if self.window_ticks == 0 {
                self.count = 0;
            }
        }
    }
}

/// A visual particle (not gameplay-affecting)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub alpha: f32,
}

/// Complete game state for one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; visual effects never draw from it
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u32,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Current user-facing message ("" when none)
    pub message: String,
    /// Level-scaled base ball speed (px/s)
    pub ball_speed: f32,
    pub paddle: Paddle,
    /// Live balls; removal is mark-then-compact, never mid-iteration
    pub balls: Vec<Ball>,
    /// Brick grid, column-major: `bricks[col][row]`
    pub bricks: Vec<Vec<Brick>>,
    /// The singleton in-flight power-up slot
    pub power_up: Option<PowerUp>,
    /// The singleton active timed effect slot
    pub active_power: Option<ActivePower>,
    pub combo: ComboState,
    /// Countdown while phase is LevelTransition
    pub transition_ticks: u32,
    /// Balance knobs for this run
    pub tuning: Tuning,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events emitted this tick, drained by the session controller
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh level-1 game with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            lives: tuning.initial_lives,
            level: 1,
            phase: GamePhase::Playing,
            message: String::new(),
            ball_speed: tuning.ball_speed_for_level(1),
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            power_up: None,
            active_power: None,
            combo: ComboState::default(),
            transition_ticks: 0,
            tuning,
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.bricks = super::board::generate_board(state.level, &state.tuning, &mut state.rng);
        state.reset_balls();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace all balls with a single serve ball above the paddle
    pub fn reset_balls(&mut self) {
        let sign = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
        let id = self.next_entity_id();
        let ball = Ball::serve(id, self.ball_speed, sign);
        self.balls.clear();
        self.balls.push(ball);
    }

    /// Spawn an extra ball at `pos` (multiball), respecting the ball cap
    pub fn spawn_extra_ball(&mut self, pos: Vec2) {
        if self.balls.len() >= self.tuning.max_balls {
            return;
        }
        let sign = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
        let id = self.next_entity_id();
        self.balls.push(Ball {
            id,
            pos,
            vel: Vec2::new(self.ball_speed * sign, -self.ball_speed),
            radius: BALL_RADIUS,
        });
    }

    /// True when every non-Indestructible brick is dead. A board with only
    /// Indestructible bricks remaining is winnable.
    pub fn check_win(&self) -> bool {
        self.bricks
            .iter()
            .flatten()
            .all(|b| !b.alive || !b.counts_for_clear())
    }

    /// Spawn a small burst of particles at `pos`. Spread is derived from a
    /// hash of the tick counter so cosmetics never consume gameplay RNG.
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32) {
        let seed = self.time_ticks as u32;
        for i in 0..8u32 {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let hash = seed.wrapping_mul(2654435761).wrapping_add(i * 7919);
            let vx = ((hash % 1000) as f32 / 1000.0 - 0.5) * 120.0;
            let vy = (((hash >> 10) % 1000) as f32 / 1000.0 - 0.5) * 120.0;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(vx, vy),
                color,
                alpha: 1.0,
            });
        }
    }

}
