//! Collision predicates for the rectangular playfield
//!
//! Pure functions, no state. Brick contact is a center-point-in-rectangle
//! test, not a true circle/AABB sweep: a deliberate simplification carried
//! over from the classic rules (a fast enough ball can tunnel through a
//! brick corner between ticks).

use glam::Vec2;

use super::state::{Ball, Paddle, PowerUp};
use crate::consts::POWER_UP_RADIUS;
use crate::paddle_top_y;

/// True when the ball's center lies strictly inside the axis-aligned
/// rectangle at `(x, y)` with extent `w` x `h`.
pub fn ball_intersects_rect(ball: &Ball, x: f32, y: f32, w: f32, h: f32) -> bool {
    point_in_rect(ball.pos, x, y, w, h)
}

/// Strict center-point containment test
pub fn point_in_rect(point: Vec2, x: f32, y: f32, w: f32, h: f32) -> bool {
    point.x > x && point.x < x + w && point.y > y && point.y < y + h
}

/// True when the ball's lower edge has reached the paddle's top edge and
/// its center is strictly within the paddle's horizontal span.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y + ball.radius >= paddle_top_y()
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.x + paddle.width
}

/// Where on the paddle the ball struck, mapped to [-1, 1]: -1 at the left
/// edge, 0 dead center, +1 at the right edge. Callers only pass positions
/// already strictly inside the span, so the result stays in range.
pub fn paddle_hit_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    (ball_x - paddle.center()) / (paddle.width / 2.0)
}

/// True when a falling pickup has dropped onto the paddle
pub fn power_up_hits_paddle(power_up: &PowerUp, paddle: &Paddle) -> bool {
    power_up.pos.y + POWER_UP_RADIUS >= paddle_top_y()
        && power_up.pos.x > paddle.x
        && power_up.pos.x < paddle.x + paddle.width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            id: 1,
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, 180.0),
            radius: BALL_RADIUS,
        }
    }

    #[test]
    fn test_center_inside_rect_hits() {
        let ball = ball_at(130.0, 50.0);
        assert!(ball_intersects_rect(&ball, 100.0, 40.0, 60.0, 20.0));
    }

    #[test]
    fn test_rect_bounds_are_strict() {
        // Center exactly on an edge does not count as contact
        let ball = ball_at(100.0, 50.0);
        assert!(!ball_intersects_rect(&ball, 100.0, 40.0, 60.0, 20.0));
        let ball = ball_at(130.0, 40.0);
        assert!(!ball_intersects_rect(&ball, 100.0, 40.0, 60.0, 20.0));
    }

    #[test]
    fn test_center_point_only_no_edge_overlap() {
        // Ball overlapping the rect edge-on but with its center outside:
        // the simplified test deliberately reports a miss.
        let ball = ball_at(100.0 - BALL_RADIUS / 2.0, 50.0);
        assert!(!ball_intersects_rect(&ball, 100.0, 40.0, 60.0, 20.0));
    }

    #[test]
    fn test_ball_hits_paddle_within_span() {
        let paddle = Paddle::default();
        let ball = ball_at(paddle.center(), paddle_top_y() - BALL_RADIUS + 1.0);
        assert!(ball_hits_paddle(&ball, &paddle));
    }

    #[test]
    fn test_ball_misses_paddle_above_or_outside() {
        let paddle = Paddle::default();
        // Above the paddle plane
        let ball = ball_at(paddle.center(), paddle_top_y() - BALL_RADIUS - 1.0);
        assert!(!ball_hits_paddle(&ball, &paddle));
        // At the right height but off the end
        let ball = ball_at(paddle.x + paddle.width + 1.0, paddle_top_y());
        assert!(!ball_hits_paddle(&ball, &paddle));
        // Exactly on the paddle edge: strict span excludes it
        let ball = ball_at(paddle.x, paddle_top_y());
        assert!(!ball_hits_paddle(&ball, &paddle));
    }

    #[test]
    fn test_paddle_hit_offset_mapping() {
        let paddle = Paddle { x: 100.0, width: 80.0 };
        assert_eq!(paddle_hit_offset(140.0, &paddle), 0.0);
        assert!((paddle_hit_offset(100.0, &paddle) - (-1.0)).abs() < f32::EPSILON);
        assert!((paddle_hit_offset(180.0, &paddle) - 1.0).abs() < f32::EPSILON);
        assert!(paddle_hit_offset(160.0, &paddle) > 0.0);
        assert!(paddle_hit_offset(120.0, &paddle) < 0.0);
    }
}
