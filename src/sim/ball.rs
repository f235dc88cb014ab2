//! The ball: motion, wall bounces, serve resets

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{PaddleHit, Sweep, sweep_paddles};
use super::paddle::Side;
use super::rect::{Body, Rect};
use crate::consts::{SERVE_SPEED_X, SERVE_SPEED_Y};

/// Outcome of one `Ball::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallMotion {
    /// Plain move
    Moved,
    /// Touched the top or bottom edge and reversed vy
    WallBounce,
}

/// A square ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Position before the latest `advance` (start of the swept path)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    /// Velocity before the latest `advance`
    pub prev_vel: Vec2,
    pub size: f32,
    spawn: Vec2,
    screen: Vec2,
}

impl Ball {
    /// Spawn at `spawn` with a random serve
    pub fn new<R: Rng + ?Sized>(spawn: Vec2, size: f32, screen: Vec2, rng: &mut R) -> Self {
        Self::with_velocity(spawn, size, screen, serve_velocity(rng))
    }

    /// Spawn at `spawn` with a fixed velocity
    pub fn with_velocity(spawn: Vec2, size: f32, screen: Vec2, vel: Vec2) -> Self {
        Self {
            pos: spawn,
            prev_pos: spawn,
            vel,
            prev_vel: vel,
            size,
            spawn,
            screen,
        }
    }

    /// Original spawn position
    #[inline]
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Whether the horizontal velocity points at the given side's paddle
    pub fn is_moving_toward(&self, side: Side) -> bool {
        match side {
            Side::Player => self.vel.x < 0.0,
            Side::Ai => self.vel.x > 0.0,
        }
    }

    /// Move one tick, bouncing off the top and bottom edges
    pub fn advance(&mut self) -> BallMotion {
        self.prev_pos = self.pos;
        self.prev_vel = self.vel;

        self.pos += self.vel;

        let floor = self.screen.y - self.size;
        if self.pos.y <= 0.0 || self.pos.y >= floor {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.min(floor).max(0.0);
            // A ball sliding along the edge with vy == 0 makes no sound
            if self.vel.y != 0.0 {
                return BallMotion::WallBounce;
            }
        }
        BallMotion::Moved
    }

    /// The path covered by the latest `advance`
    pub fn sweep(&self) -> Sweep {
        Sweep {
            from: self.prev_pos,
            rect: self.rect(),
            vel: self.vel,
        }
    }

    /// Resolve at most one paddle hit for this tick
    pub fn check_collision(&mut self, left: &impl Body, right: &impl Body) -> Option<PaddleHit> {
        let hit = sweep_paddles(&self.sweep(), left, right)?;
        self.apply_hit(&hit);
        Some(hit)
    }

    /// Adopt the post-bounce position and velocity
    pub fn apply_hit(&mut self, hit: &PaddleHit) {
        self.pos = hit.pos;
        self.vel = hit.vel;
    }

    /// Back to the spawn point with a fresh random serve
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = self.spawn;
        self.prev_pos = self.spawn;
        self.vel = serve_velocity(rng);
        self.prev_vel = self.vel;
    }
}

impl Body for Ball {
    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.size),
        }
    }
}

/// vx = ±5 and vy = ±3, each sign a fair coin
fn serve_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let vx = if rng.random_bool(0.5) {
        SERVE_SPEED_X
    } else {
        -SERVE_SPEED_X
    };
    let vy = if rng.random_bool(0.5) {
        SERVE_SPEED_Y
    } else {
        -SERVE_SPEED_Y
    };
    Vec2::new(vx, vy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball::with_velocity(pos, 7.0, SCREEN, vel)
    }

    #[test]
    fn test_advance_moves_and_records_previous() {
        let mut b = ball(Vec2::new(400.0, 300.0), Vec2::new(5.0, -3.0));
        assert_eq!(b.advance(), BallMotion::Moved);
        assert_eq!(b.pos, Vec2::new(405.0, 297.0));
        assert_eq!(b.prev_pos, Vec2::new(400.0, 300.0));
        assert_eq!(b.prev_vel, Vec2::new(5.0, -3.0));
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut b = ball(Vec2::new(400.0, 2.0), Vec2::new(5.0, -3.0));
        assert_eq!(b.advance(), BallMotion::WallBounce);
        assert_eq!(b.pos.y, 0.0);
        assert_eq!(b.vel.y, 3.0);
        assert_eq!(b.prev_vel.y, -3.0);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut b = ball(Vec2::new(400.0, 591.0), Vec2::new(5.0, 3.0));
        assert_eq!(b.advance(), BallMotion::WallBounce);
        assert_eq!(b.pos.y, 593.0);
        assert_eq!(b.vel.y, -3.0);

        // Next tick moves away without bouncing again
        assert_eq!(b.advance(), BallMotion::Moved);
        assert_eq!(b.pos.y, 590.0);
    }

    #[test]
    fn test_flat_ball_on_edge_is_silent() {
        let mut b = ball(Vec2::new(400.0, 0.0), Vec2::new(5.0, 0.0));
        assert_eq!(b.advance(), BallMotion::Moved);
        assert_eq!(b.pos.y, 0.0);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut b = Ball::new(Vec2::new(400.0, 300.0), 7.0, SCREEN, &mut rng);
        for _ in 0..37 {
            b.advance();
        }
        for _ in 0..50 {
            b.reset(&mut rng);
            assert_eq!(b.pos, Vec2::new(400.0, 300.0));
            assert_eq!(b.prev_pos, b.pos);
            assert_eq!(b.prev_vel, b.vel);
            assert!(b.vel.x == 5.0 || b.vel.x == -5.0);
            assert!(b.vel.y == 3.0 || b.vel.y == -3.0);
        }
    }

    #[test]
    fn test_serve_covers_all_directions() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let v = serve_velocity(&mut rng);
            seen.insert((v.x as i32, v.y as i32));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(serve_velocity(&mut a), serve_velocity(&mut b));
        }
    }

    #[test]
    fn test_moving_toward() {
        let b = ball(Vec2::ZERO, Vec2::new(-5.0, 0.0));
        assert!(b.is_moving_toward(Side::Player));
        assert!(!b.is_moving_toward(Side::Ai));
    }
}
