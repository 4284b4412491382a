//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (column-major brick scan, insertion-order balls)
//! - No rendering, audio or platform dependencies

pub mod board;
pub mod collision;
pub mod state;
pub mod tick;

pub use board::generate_board;
pub use collision::{ball_hits_paddle, ball_intersects_rect, paddle_hit_offset};
pub use state::{
    ActivePower, Ball, Brick, BrickKind, ComboState, GameEvent, GamePhase, GameState, Paddle,
    Particle, PowerUp, PowerUpKind,
};
pub use tick::{tick, PaddleIntent, TickInput};
