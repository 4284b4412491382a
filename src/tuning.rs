//! Data-driven game balance
//!
//! Every knob the engine recognizes lives here so a session can be tuned
//! without touching simulation code. Defaults reproduce the classic feel at
//! the 60 Hz design tick.

use serde::{Deserialize, Serialize};

/// Tunable balance parameters for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Board ===
    /// Brick rows at level 1
    pub base_rows: u32,
    /// Brick columns at level 1
    pub base_cols: u32,
    /// Extra rows/columns stop growing past this many levels
    pub level_growth_cap: u32,
    /// Last playable level; clearing it wins the game
    pub max_level: u32,

    // === Session ===
    pub initial_lives: u8,

    // === Paddle ===
    /// Paddle slide speed (px/s)
    pub paddle_speed: f32,

    // === Ball ===
    /// Ball speed at level 1 (px/s)
    pub ball_speed_base: f32,
    /// Speed added per level beyond the first (px/s)
    pub ball_speed_per_level: f32,
    /// Maximum simultaneous balls
    pub max_balls: usize,

    // === Brick kinds ===
    /// Probability a cell is Indestructible
    pub indestructible_chance: f32,
    /// Probability a cell is Multi (three-hit)
    pub multi_chance: f32,
    /// Hits a Multi brick absorbs before breaking
    pub multi_hits: u8,

    // === Power-ups ===
    /// Chance a destroyed brick spawns an extra ball
    pub multiball_chance: f64,
    /// Chance a destroyed brick drops a falling power-up
    pub power_up_chance: f64,
    /// Downward drift of a falling power-up (px/s)
    pub power_up_fall_speed: f32,
    /// Paddle width multiplier while Expand is active
    pub expand_factor: f32,
    /// Expand duration in ticks
    pub expand_ticks: u32,
    /// Velocity scale while Slow is active
    pub slow_factor: f32,
    /// Slow duration in ticks
    pub slow_ticks: u32,

    // === Combo ===
    /// Ticks the combo window stays open after a destruction
    pub combo_window_ticks: u32,
    /// Combo count that must be exceeded before bonuses pay out
    pub combo_threshold: u32,
    /// Bonus per combo count once over the threshold
    pub combo_bonus_per: u32,

    // === Flow ===
    /// Duration of the level-up interstitial in ticks
    pub level_transition_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_rows: 4,
            base_cols: 7,
            level_growth_cap: 2,
            max_level: 6,
            initial_lives: 3,
            paddle_speed: 420.0,
            ball_speed_base: 180.0,
            ball_speed_per_level: 24.0,
            max_balls: 4,
            indestructible_chance: 0.05,
            multi_chance: 0.10,
            multi_hits: 3,
            multiball_chance: 0.06,
            power_up_chance: 0.12,
            power_up_fall_speed: 180.0,
            expand_factor: 1.5,
            expand_ticks: 480,
            slow_factor: 0.6,
            slow_ticks: 420,
            combo_window_ticks: 50,
            combo_threshold: 4,
            combo_bonus_per: 5,
            level_transition_ticks: 108,
        }
    }
}

impl Tuning {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ball speed for a level (1-based)
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_speed_base + (level.saturating_sub(1)) as f32 * self.ball_speed_per_level
    }

    /// Brick rows for a level; difficulty plateaus after `level_growth_cap`
    pub fn rows_for_level(&self, level: u32) -> u32 {
        self.base_rows + level.saturating_sub(1).min(self.level_growth_cap)
    }

    /// Brick columns for a level; same plateau as rows
    pub fn cols_for_level(&self, level: u32) -> u32 {
        self.base_cols + level.saturating_sub(1).min(self.level_growth_cap)
    }
}
