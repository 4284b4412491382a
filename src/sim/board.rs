//! Brick grid generation
//!
//! Builds the column-major brick grid for a level: grid dimensions grow with
//! the level up to a plateau, special kinds are assigned by a weighted draw
//! from the session RNG, and pixel positions are fixed at layout time.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{
    Brick, BrickKind, BRICK_PALETTE, HITS_UNBREAKABLE, INDESTRUCTIBLE_COLOR, MULTI_COLOR,
};
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-left corner of a brick cell in board coordinates
pub fn brick_position(col: u32, row: u32) -> Vec2 {
    Vec2::new(
        col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
    )
}

/// Generate the brick grid for `level` (1-based), column-major
pub fn generate_board(level: u32, tuning: &Tuning, rng: &mut Pcg32) -> Vec<Vec<Brick>> {
    let rows = tuning.rows_for_level(level);
    let cols = tuning.cols_for_level(level);

    let mut bricks = Vec::with_capacity(cols as usize);
    for col in 0..cols {
        let mut column = Vec::with_capacity(rows as usize);
        for row in 0..rows {
            let kind = draw_kind(tuning, rng);
            let (hits_left, color) = match kind {
                BrickKind::Normal => {
                    let idx = (level + row + col) as usize % BRICK_PALETTE.len();
                    (1, BRICK_PALETTE[idx])
                }
                BrickKind::Multi => (tuning.multi_hits, MULTI_COLOR),
                BrickKind::Indestructible => (HITS_UNBREAKABLE, INDESTRUCTIBLE_COLOR),
            };
            column.push(Brick {
                col,
                row,
                pos: brick_position(col, row),
                kind,
                hits_left,
                alive: true,
                color,
            });
        }
        bricks.push(column);
    }

    log::debug!("level {} board: {} cols x {} rows", level, cols, rows);
    bricks
}

/// Weighted kind draw: one uniform roll partitioned into Indestructible,
/// Multi, Normal bands.
fn draw_kind(tuning: &Tuning, rng: &mut Pcg32) -> BrickKind {
    let roll: f32 = rng.random();
    if roll < tuning.indestructible_chance {
        BrickKind::Indestructible
    } else if roll < tuning.indestructible_chance + tuning.multi_chance {
        BrickKind::Multi
    } else {
        BrickKind::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_grid_dimensions_follow_level_formula() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for level in 1..=tuning.max_level {
            let board = generate_board(level, &tuning, &mut rng);
            let expected_cols = tuning.base_cols + (level - 1).min(tuning.level_growth_cap);
            let expected_rows = tuning.base_rows + (level - 1).min(tuning.level_growth_cap);
            assert_eq!(board.len() as u32, expected_cols, "cols at level {}", level);
            for column in &board {
                assert_eq!(column.len() as u32, expected_rows, "rows at level {}", level);
            }
        }
    }

    #[test]
    fn test_kind_distribution_converges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut normal = 0u32;
        let mut multi = 0u32;
        let mut indestructible = 0u32;
        let mut total = 0u32;

        for _ in 0..400 {
            for brick in generate_board(3, &tuning, &mut rng).iter().flatten() {
                total += 1;
                match brick.kind {
                    BrickKind::Normal => normal += 1,
                    BrickKind::Multi => multi += 1,
                    BrickKind::Indestructible => indestructible += 1,
                }
            }
        }

        let frac = |n: u32| n as f64 / total as f64;
        assert!((frac(normal) - 0.85).abs() < 0.02, "normal {}", frac(normal));
        assert!((frac(multi) - 0.10).abs() < 0.02, "multi {}", frac(multi));
        assert!(
            (frac(indestructible) - 0.05).abs() < 0.02,
            "indestructible {}",
            frac(indestructible)
        );
    }

    #[test]
    fn test_layout_positions_assigned() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let board = generate_board(1, &tuning, &mut rng);
        assert_eq!(board[0][0].pos, Vec2::new(BRICK_OFFSET_LEFT, BRICK_OFFSET_TOP));
        assert_eq!(
            board[2][1].pos,
            Vec2::new(
                2.0 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
                BRICK_HEIGHT + BRICK_PADDING + BRICK_OFFSET_TOP
            )
        );
    }

    #[test]
    fn test_normal_colors_follow_palette() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let board = generate_board(2, &tuning, &mut rng);
        for brick in board.iter().flatten() {
            match brick.kind {
                BrickKind::Normal => {
                    let idx = (2 + brick.row + brick.col) as usize % BRICK_PALETTE.len();
                    assert_eq!(brick.color, BRICK_PALETTE[idx]);
                }
                BrickKind::Multi => assert_eq!(brick.color, MULTI_COLOR),
                BrickKind::Indestructible => assert_eq!(brick.color, INDESTRUCTIBLE_COLOR),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_grid_fits_playfield(level in 1u32..=6) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(level as u64);
            let board = generate_board(level, &tuning, &mut rng);
            for brick in board.iter().flatten() {
                prop_assert!(brick.pos.x + BRICK_WIDTH <= BOARD_WIDTH);
                prop_assert!(brick.pos.y + BRICK_HEIGHT < BOARD_HEIGHT / 2.0);
                prop_assert!(brick.alive);
            }
        }
    }
}
