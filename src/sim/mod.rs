//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod controller;
pub mod events;
pub mod paddle;
pub mod rect;

pub use ball::{Ball, BallMotion};
pub use collision::{PaddleHit, Sweep, sweep_paddles};
pub use controller::{Command, Direction, Flow, MENU, MatchController, MenuEntry, Mode, Snapshot};
pub use events::{EventSink, GameEvent};
pub use paddle::{Paddle, Side};
pub use rect::{Body, Rect};
