//! Fixed timestep simulation tick
//!
//! Core game loop that advances one session deterministically. All timed
//! behavior (power-up durations, the combo window, the level interstitial)
//! is tick-counted state decremented here; nothing runs on external timers,
//! so every mutation is serialized through `tick`.

use glam::Vec2;
use rand::Rng;

use super::board::generate_board;
use super::collision::{
    ball_hits_paddle, ball_intersects_rect, paddle_hit_offset, power_up_hits_paddle,
};
use super::state::{
    ActivePower, BrickKind, ComboState, GameEvent, GamePhase, GameState, Paddle, PowerUp,
    PowerUpKind, DAMAGED_COLOR,
};
use crate::consts::*;

/// Held paddle movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddleIntent {
    Left,
    #[default]
    None,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Currently-held movement intent
    pub dir: PaddleIntent,
    /// Pause/resume toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Commands queued between ticks apply here, before anything moves
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.message = "Game Paused".to_string();
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.message.clear();
            }
            // Ignored during the interstitial and at terminal states
            _ => {}
        }
    } else if state.phase == GamePhase::Paused && input.dir != PaddleIntent::None {
        // Movement input resumes a paused game
        state.phase = GamePhase::Playing;
        state.message.clear();
    }

    // Terminal states only leave via restart
    if state.phase.is_terminal() {
        return;
    }

    state.time_ticks += 1;

    // Paddle follows the held intent on every tick, paused or not
    match input.dir {
        PaddleIntent::Left => state.paddle.slide(-state.tuning.paddle_speed * dt),
        PaddleIntent::Right => state.paddle.slide(state.tuning.paddle_speed * dt),
        PaddleIntent::None => {}
    }

    // Cosmetics and countdown timers run regardless of phase
    update_particles(state, dt);
    state.combo.decay();
    decay_active_power(state);

    match state.phase {
        GamePhase::Playing => playing_tick(state, dt),
        GamePhase::LevelTransition => {
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                enter_level(state);
            }
        }
        GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => {}
    }
}

/// One Playing-phase step: balls, walls, paddle, bottom, pickups, win check
fn playing_tick(state: &mut GameState, dt: f32) {
    // Deferred mutations: the ball loop may not grow/shrink the collections
    // it iterates, so spawns and bursts are collected and applied after.
    let mut lost: Vec<u32> = Vec::new();
    let mut multiball_spawns: Vec<Vec2> = Vec::new();
    let mut bursts: Vec<(Vec2, u32)> = Vec::new();

    for ball in state.balls.iter_mut() {
        // Scan alive bricks column-major; only the first hit counts, even
        // when the center geometrically overlaps more than one brick.
        let mut hit_indestructible = false;
        'scan: for column in state.bricks.iter_mut() {
            for brick in column.iter_mut() {
                if !brick.alive {
                    continue;
                }
                if !ball_intersects_rect(ball, brick.pos.x, brick.pos.y, BRICK_WIDTH, BRICK_HEIGHT)
                {
                    continue;
                }

                if brick.kind == BrickKind::Indestructible {
                    ball.vel.y = -ball.vel.y;
                    bursts.push((brick.center(), brick.color));
                    state.events.push(GameEvent::IndestructibleHit);
                    hit_indestructible = true;
                    break 'scan;
                }

                brick.hits_left -= 1;
                bursts.push((ball.pos, brick.color));
                if brick.hits_left == 0 {
                    brick.alive = false;
                    state.score += 1;
                    state.events.push(GameEvent::BrickDestroyed);

                    if let Some(bonus) = state.combo.record_destruction(&state.tuning) {
                        state.score += bonus;
                        state.message = format!("Combo Bonus: +{bonus}");
                        state.events.push(GameEvent::ComboBonus { bonus });
                    }

                    // Independent rolls: extra ball, then falling power-up.
                    // The ball cap is enforced when the spawns apply.
                    if state.rng.random::<f64>() < state.tuning.multiball_chance {
                        multiball_spawns.push(ball.pos);
                    }
                    if state.rng.random::<f64>() < state.tuning.power_up_chance
                        && state.power_up.is_none()
                    {
                        let kind = match state.rng.random_range(0..3) {
                            0 => PowerUpKind::Expand,
                            1 => PowerUpKind::Slow,
                            _ => PowerUpKind::ExtraLife,
                        };
                        state.power_up = Some(PowerUp {
                            kind,
                            pos: brick.center(),
                            color: kind.color(),
                        });
                    }
                } else {
                    brick.color = DAMAGED_COLOR;
                    state.events.push(GameEvent::BrickDamaged);
                }

                ball.vel.y = -ball.vel.y;
                break 'scan;
            }
        }

        ball.pos += ball.vel * dt;

        // Walls: mirror the crossing component
        if ball.pos.x + ball.radius > BOARD_WIDTH || ball.pos.x - ball.radius < 0.0 {
            ball.vel.x = -ball.vel.x;
            state.events.push(GameEvent::WallBounce);
        }
        if ball.pos.y - ball.radius < 0.0 {
            ball.vel.y = -ball.vel.y;
            state.events.push(GameEvent::WallBounce);
        }

        // An indestructible bounce ends this ball's tick early
        if hit_indestructible {
            continue;
        }

        // Paddle: rebound always points upward, steered by where it struck
        if ball_hits_paddle(ball, &state.paddle) {
            ball.vel.y = -ball.vel.y.abs();
            let offset = paddle_hit_offset(ball.pos.x, &state.paddle);
            ball.vel.x = state.ball_speed * offset;
            if matches!(
                state.active_power,
                Some(ActivePower { kind: PowerUpKind::Slow, .. })
            ) {
                ball.vel.y *= state.tuning.slow_factor;
            }
            state.events.push(GameEvent::PaddleBounce);
        }

        // Bottom exit: mark now, compact after the loop
        if ball.pos.y + ball.radius > BOARD_HEIGHT {
            lost.push(ball.id);
        }
    }

    for (pos, color) in bursts {
        state.spawn_burst(pos, color);
    }

    for pos in multiball_spawns {
        let before = state.balls.len();
        state.spawn_extra_ball(pos);
        if state.balls.len() > before {
            state.message = "Multiball!".to_string();
        }
    }

    state.balls.retain(|b| !lost.contains(&b.id));

    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost);
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.message = format!("Game Over! Final Score: {}", state.score);
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!("game over at level {} with score {}", state.level, state.score);
            return;
        }
        state.reset_balls();
        state.phase = GamePhase::Paused;
        state.message = "Press Pause/Resume or Arrow Key to continue!".to_string();
    }

    advance_power_up(state, dt);

    if state.check_win() {
        state.level += 1;
        if state.level > state.tuning.max_level {
            state.phase = GamePhase::Victory;
            state.message = format!(
                "Congratulations! You finished all levels! Final Score: {}",
                state.score
            );
            state.events.push(GameEvent::Victory { score: state.score });
            log::info!("all {} levels cleared, score {}", state.tuning.max_level, state.score);
        } else {
            state.phase = GamePhase::LevelTransition;
            state.transition_ticks = state.tuning.level_transition_ticks;
            state.message = format!("Level Up! Starting Level {}...", state.level);
            state.events.push(GameEvent::LevelUp { level: state.level });
            log::info!("level cleared, advancing to {}", state.level);
        }
    }
}

/// Drift the in-flight pickup and resolve catch/miss
fn advance_power_up(state: &mut GameState, dt: f32) {
    let Some(mut power_up) = state.power_up.take() else {
        return;
    };
    power_up.pos.y += state.tuning.power_up_fall_speed * dt;

    if power_up_hits_paddle(&power_up, &state.paddle) {
        activate_power(state, power_up.kind);
        state.events.push(GameEvent::PowerUpCollected { kind: power_up.kind });
    } else if power_up.pos.y <= BOARD_HEIGHT {
        state.power_up = Some(power_up);
    }
    // Past the bottom edge: dropped without effect
}

/// Apply a caught power-up. A new timed effect preempts the previous one:
/// the old effect reverts first, then the new one starts a full duration.
fn activate_power(state: &mut GameState, kind: PowerUpKind) {
    revert_active_power(state);
    match kind {
        PowerUpKind::Expand => {
            state.paddle.width = PADDLE_BASE_WIDTH * state.tuning.expand_factor;
            state.paddle.x = state.paddle.x.min(BOARD_WIDTH - state.paddle.width);
            state.active_power = Some(ActivePower {
                kind,
                ticks_left: state.tuning.expand_ticks,
            });
            state.message = "Power-Up: Expanded Paddle!".to_string();
        }
        PowerUpKind::Slow => {
            for ball in &mut state.balls {
                ball.vel *= state.tuning.slow_factor;
            }
            state.active_power = Some(ActivePower {
                kind,
                ticks_left: state.tuning.slow_ticks,
            });
            state.message = "Power-Up: Slow Ball!".to_string();
        }
        PowerUpKind::ExtraLife => {
            state.lives += 1;
            state.message = "Power-Up: Extra Life!".to_string();
        }
    }
}

/// Undo whatever the active effect changed and clear the slot
fn revert_active_power(state: &mut GameState) {
    let Some(active) = state.active_power.take() else {
        return;
    };
    match active.kind {
        PowerUpKind::Expand => {
            state.paddle.width = PADDLE_BASE_WIDTH;
        }
        PowerUpKind::Slow => {
            let inv = 1.0 / state.tuning.slow_factor;
            for ball in &mut state.balls {
                ball.vel *= inv;
            }
        }
        // Never occupies the slot
        PowerUpKind::ExtraLife => {}
    }
    state.message.clear();
}

/// Count the active effect down; revert when the timer runs out
fn decay_active_power(state: &mut GameState) {
    let expired = match &mut state.active_power {
        Some(active) => {
            active.ticks_left = active.ticks_left.saturating_sub(1);
            active.ticks_left == 0
        }
        None => false,
    };
    if expired {
        revert_active_power(state);
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.alpha -= 1.8 * dt;
    }
    state.particles.retain(|p| p.alpha > 0.0);
}

/// Rebuild the playfield for `state.level`, keeping score and lives
fn enter_level(state: &mut GameState) {
    state.ball_speed = state.tuning.ball_speed_for_level(state.level);
    state.paddle = Paddle::default();
    state.power_up = None;
    state.active_power = None;
    state.combo = ComboState::default();
    state.message.clear();
    state.bricks = generate_board(state.level, &state.tuning, &mut state.rng);
    state.reset_balls();
    state.phase = GamePhase::Playing;
}
