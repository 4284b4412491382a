//! Brick Rush - a classic brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, game state, fixed-step tick)
//! - `session`: Top-level session controller and command surface
//! - `highscores`: High-score persistence seam
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use session::{PaddleIntent, Session, Snapshot};
pub use tuning::Tuning;

/// Fixed design parameters
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const BOARD_WIDTH: f32 = 680.0;
    pub const BOARD_HEIGHT: f32 = 480.0;

    /// Brick grid geometry
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_OFFSET_TOP: f32 = 40.0;
    pub const BRICK_OFFSET_LEFT: f32 = 28.0;

    /// Paddle defaults - paddle slides along the bottom edge
    pub const PADDLE_BASE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle underside and the bottom edge
    pub const PADDLE_MARGIN_BOTTOM: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;

    /// Falling power-up pickup radius
    pub const POWER_UP_RADIUS: f32 = 12.0;

    /// Visual particle cap
    pub const MAX_PARTICLES: usize = 256;
}

/// Top edge of the paddle in board coordinates
#[inline]
pub fn paddle_top_y() -> f32 {
    consts::BOARD_HEIGHT - consts::PADDLE_HEIGHT - consts::PADDLE_MARGIN_BOTTOM
}
