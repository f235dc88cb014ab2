//! Swept ball-vs-paddle collision detection and bounce response
//!
//! A fast ball can cover more than a paddle's width in one tick, so testing
//! only the post-move rectangles lets it tunnel straight through. Instead we
//! compare the leading edge of the ball before and after the move against the
//! paddle's facing edge: if the edge was crossed (or touched) during the tick
//! and the ball overlaps the paddle vertically, it is a hit.

use glam::Vec2;

use super::paddle::Side;
use super::rect::{Body, Rect};
use crate::consts::{BALL_MAX_SPEED_X, BALL_MAX_SPEED_Y, PADDLE_SPEEDUP, SPIN_FACTOR};

/// The ball's motion over one tick, as seen by the collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Top-left corner before the move
    pub from: Vec2,
    /// Ball rectangle after the move
    pub rect: Rect,
    pub vel: Vec2,
}

/// A resolved paddle hit: the ball state to adopt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    /// Paddle that was struck
    pub side: Side,
    /// Ball position, flush against the paddle face
    pub pos: Vec2,
    /// Ball velocity after bounce, spin and speed-up
    pub vel: Vec2,
}

/// Check the ball's path against both paddles.
///
/// Only the paddle the ball is travelling toward is considered, so at most
/// one hit resolves per tick. `left` defends x = 0, `right` defends the far edge.
pub fn sweep_paddles(sweep: &Sweep, left: &impl Body, right: &impl Body) -> Option<PaddleHit> {
    let width = sweep.rect.size.x;

    if sweep.vel.x < 0.0 {
        let paddle = left.rect();
        let edge = paddle.right();
        let crossed = sweep.from.x >= edge && sweep.rect.left() <= edge;
        if crossed && sweep.rect.overlaps_vertically(&paddle) {
            return Some(bounce(sweep, &paddle, Side::Player, edge));
        }
    } else if sweep.vel.x > 0.0 {
        let paddle = right.rect();
        let edge = paddle.left();
        let crossed = sweep.from.x + width <= edge && sweep.rect.right() >= edge;
        if crossed && sweep.rect.overlaps_vertically(&paddle) {
            return Some(bounce(sweep, &paddle, Side::Ai, edge - width));
        }
    }

    None
}

/// Reflect, add spin from the contact offset, and speed up
fn bounce(sweep: &Sweep, paddle: &Rect, side: Side, flush_x: f32) -> PaddleHit {
    let mut vel = sweep.vel;
    vel.x = -vel.x;

    // -1 at the paddle's top edge, +1 at its bottom edge
    let relative_hit = (sweep.rect.center().y - paddle.center().y) / (paddle.size.y / 2.0);
    vel.y = (vel.y + relative_hit * SPIN_FACTOR).clamp(-BALL_MAX_SPEED_Y, BALL_MAX_SPEED_Y);

    let speed = (vel.x.abs() + PADDLE_SPEEDUP).min(BALL_MAX_SPEED_X);
    vel.x = speed.copysign(vel.x);

    PaddleHit {
        side,
        pos: Vec2::new(flush_x, sweep.rect.pos.y),
        vel,
    }
}
