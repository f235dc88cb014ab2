//! Match controller: the menu/series state machine and the per-tick update
//!
//! Sole owner and mutator of the paddles and the ball. Within a tick the
//! order is fixed: ball motion, paddle collision, AI tracking, scoring.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallMotion};
use super::events::{EventSink, GameEvent};
use super::paddle::{Paddle, Side};
use super::rect::{Body, Rect};
use crate::config::{ConfigError, GameConfig};
use crate::consts::SERIES_LENGTHS;
use crate::series_target;

/// Top-level screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Choosing a series length
    Menu,
    /// Ball in play
    Playing,
    /// A game ended, waiting for continue
    GameOver,
    /// The series is decided, waiting for reset
    SeriesOver,
}

/// Up/down for paddle movement and menu navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Screen-space sign (y grows downward)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Discrete input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MovePlayer(Direction),
    MenuNavigate(Direction),
    MenuConfirm,
    MenuQuit,
    ContinueGame,
    ResetSeries,
}

/// What the outer loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One line of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEntry {
    BestOf(u32),
    Exit,
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::BestOf(n) => format!("Best of {}", n),
            MenuEntry::Exit => "Exit".to_string(),
        }
    }
}

/// Main menu entries, top to bottom
pub const MENU: [MenuEntry; 4] = [
    MenuEntry::BestOf(3),
    MenuEntry::BestOf(5),
    MenuEntry::BestOf(7),
    MenuEntry::Exit,
];

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub screen: Vec2,
    pub player_score: u32,
    pub ai_score: u32,
    pub player_games_won: u32,
    pub ai_games_won: u32,
    pub best_of: Option<u32>,
    pub series_target: u32,
    pub winner: Option<Side>,
    pub menu: Vec<MenuEntry>,
    pub menu_cursor: usize,
    pub player_paddle: Rect,
    pub ai_paddle: Rect,
    pub ball: Rect,
    pub ticks: u64,
}

/// Runs menus, games and series
#[derive(Debug, Clone)]
pub struct MatchController {
    config: GameConfig,
    mode: Mode,
    player: Paddle,
    ai: Paddle,
    ball: Ball,
    player_score: u32,
    ai_score: u32,
    best_of: Option<u32>,
    series_target: u32,
    player_games_won: u32,
    ai_games_won: u32,
    winner: Option<Side>,
    menu_cursor: usize,
    rng: Pcg32,
    /// Demo mode: the player paddle is computer-driven at this difficulty
    autopilot: Option<f32>,
    /// Events since the last drain
    events: Vec<GameEvent>,
    /// Playing ticks simulated so far
    ticks: u64,
}

impl MatchController {
    /// Validate `config` and open on the menu. `seed` drives every serve.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let (player, ai, ball) = spawn_actors(&config, &mut rng);

        Ok(Self {
            config,
            mode: Mode::Menu,
            player,
            ai,
            ball,
            player_score: 0,
            ai_score: 0,
            best_of: None,
            series_target: 0,
            player_games_won: 0,
            ai_games_won: 0,
            winner: None,
            menu_cursor: 0,
            rng,
            autopilot: None,
            events: Vec::new(),
            ticks: 0,
        })
    }

    // === Queries ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn ai(&self) -> &Paddle {
        &self.ai
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// (player, ai) points in the current game
    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.ai_score)
    }

    /// (player, ai) games won in the current series
    pub fn games_won(&self) -> (u32, u32) {
        (self.player_games_won, self.ai_games_won)
    }

    pub fn series_target(&self) -> u32 {
        self.series_target
    }

    pub fn best_of(&self) -> Option<u32> {
        self.best_of
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn autopilot(&self) -> Option<f32> {
        self.autopilot
    }

    /// Events not yet drained
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending events to `sink`, oldest first
    pub fn drain_events_into<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            screen: Vec2::new(self.config.screen_width, self.config.screen_height),
            player_score: self.player_score,
            ai_score: self.ai_score,
            player_games_won: self.player_games_won,
            ai_games_won: self.ai_games_won,
            best_of: self.best_of,
            series_target: self.series_target,
            winner: self.winner,
            menu: MENU.to_vec(),
            menu_cursor: self.menu_cursor,
            player_paddle: self.player.rect(),
            ai_paddle: self.ai.rect(),
            ball: self.ball.rect(),
            ticks: self.ticks,
        }
    }

    // === Commands ===

    /// Apply one input. Commands that make no sense in the current mode are ignored.
    pub fn apply(&mut self, command: Command) -> Flow {
        match (self.mode, command) {
            (Mode::Playing, Command::MovePlayer(dir)) => {
                self.player.move_by(dir.sign() * self.config.player_step);
            }
            (Mode::Menu, Command::MenuNavigate(dir)) => {
                let len = MENU.len();
                self.menu_cursor = match dir {
                    Direction::Up => (self.menu_cursor + len - 1) % len,
                    Direction::Down => (self.menu_cursor + 1) % len,
                };
            }
            (Mode::Menu, Command::MenuConfirm) => match MENU[self.menu_cursor] {
                MenuEntry::BestOf(n) => self.start_series(n),
                MenuEntry::Exit => return Flow::Quit,
            },
            (Mode::Menu | Mode::SeriesOver, Command::MenuQuit) => return Flow::Quit,
            (Mode::GameOver, Command::ContinueGame) => self.continue_game(),
            (Mode::SeriesOver, Command::ResetSeries) => self.reset_series(),
            _ => {}
        }
        Flow::Continue
    }

    /// Begin a best-of-`best_of` series from the menu. Only 3, 5 and 7 are accepted.
    pub fn start_series(&mut self, best_of: u32) {
        if self.mode != Mode::Menu || !SERIES_LENGTHS.contains(&best_of) {
            return;
        }

        self.best_of = Some(best_of);
        self.series_target = series_target(best_of);
        self.player_games_won = 0;
        self.ai_games_won = 0;
        self.new_game();
        log::info!(
            "Series started: best of {} (first to {})",
            best_of,
            self.series_target
        );
    }

    /// Start the next game of the series after a game-over
    pub fn continue_game(&mut self) {
        if self.mode != Mode::GameOver {
            return;
        }
        self.new_game();
        log::info!(
            "Next game: player {} - {} ai",
            self.player_games_won,
            self.ai_games_won
        );
    }

    /// Clear the finished series and return to the menu
    pub fn reset_series(&mut self) {
        if self.mode != Mode::SeriesOver {
            return;
        }
        self.best_of = None;
        self.series_target = 0;
        self.player_games_won = 0;
        self.ai_games_won = 0;
        self.player_score = 0;
        self.ai_score = 0;
        self.winner = None;
        self.menu_cursor = 0;
        self.mode = Mode::Menu;
        log::info!("Back to menu");
    }

    /// Let the computer drive the player paddle too (`None` hands it back)
    pub fn set_autopilot(&mut self, difficulty: Option<f32>) {
        self.autopilot = difficulty.map(|d| d.clamp(0.0, 1.0));
    }

    // === Simulation ===

    /// Advance one fixed tick. Does nothing outside `Mode::Playing`.
    pub fn tick(&mut self) {
        if self.mode != Mode::Playing {
            return;
        }
        self.ticks += 1;

        if self.ball.advance() == BallMotion::WallBounce {
            self.events.push(GameEvent::WallBounce);
        }

        if let Some(hit) = self.ball.check_collision(&self.player, &self.ai) {
            self.events.push(GameEvent::PaddleHit { side: hit.side });
        }

        self.ai.auto_track(&self.ball, self.config.ai_difficulty);
        if let Some(difficulty) = self.autopilot {
            self.player.auto_track(&self.ball, difficulty);
        }

        if self.ball.pos.x <= 0.0 {
            self.award_point(Side::Ai);
        } else if self.ball.pos.x >= self.config.screen_width {
            self.award_point(Side::Player);
        }
    }

    fn award_point(&mut self, scorer: Side) {
        match scorer {
            Side::Player => self.player_score += 1,
            Side::Ai => self.ai_score += 1,
        }
        self.events.push(GameEvent::Score { scorer });
        log::debug!(
            "Point to {}: player {} - {} ai",
            scorer.as_str(),
            self.player_score,
            self.ai_score
        );

        self.check_game_winner();
        if self.mode == Mode::Playing {
            self.ball.reset(&mut self.rng);
        }
    }

    fn check_game_winner(&mut self) {
        let winner = if self.player_score >= self.config.winning_score {
            Side::Player
        } else if self.ai_score >= self.config.winning_score {
            Side::Ai
        } else {
            return;
        };

        self.winner = Some(winner);
        match winner {
            Side::Player => self.player_games_won += 1,
            Side::Ai => self.ai_games_won += 1,
        }
        self.check_series_winner(winner);
    }

    fn check_series_winner(&mut self, game_winner: Side) {
        let won = match game_winner {
            Side::Player => self.player_games_won,
            Side::Ai => self.ai_games_won,
        };

        if won >= self.series_target {
            self.mode = Mode::SeriesOver;
            self.events.push(GameEvent::SeriesWon {
                winner: game_winner,
            });
            log::info!(
                "{} wins the series {} - {}",
                game_winner.as_str(),
                self.player_games_won,
                self.ai_games_won
            );
        } else {
            self.mode = Mode::GameOver;
            self.events.push(GameEvent::GameWon {
                winner: game_winner,
            });
            log::info!(
                "{} wins the game {} - {}",
                game_winner.as_str(),
                self.player_score,
                self.ai_score
            );
        }
    }

    /// Fresh paddles and ball, zeroed points, series tallies untouched
    fn new_game(&mut self) {
        let (player, ai, ball) = spawn_actors(&self.config, &mut self.rng);
        self.player = player;
        self.ai = ai;
        self.ball = ball;
        self.player_score = 0;
        self.ai_score = 0;
        self.winner = None;
        self.mode = Mode::Playing;
    }

    /// Replace the ball, for driving exact scenarios in tests
    #[cfg(test)]
    pub(crate) fn set_ball(&mut self, ball: Ball) {
        self.ball = ball;
    }
}

fn spawn_actors(config: &GameConfig, rng: &mut Pcg32) -> (Paddle, Paddle, Ball) {
    let size = Vec2::new(config.paddle_width, config.paddle_height);
    let y = config.paddle_start_y();
    let player = Paddle::new(
        Side::Player,
        Vec2::new(config.left_paddle_x(), y),
        size,
        config.paddle_speed,
        config.screen_height,
    );
    let ai = Paddle::new(
        Side::Ai,
        Vec2::new(config.right_paddle_x(), y),
        size,
        config.paddle_speed,
        config.screen_height,
    );
    let ball = Ball::new(
        config.ball_spawn(),
        config.ball_size,
        Vec2::new(config.screen_width, config.screen_height),
        rng,
    );
    (player, ai, ball)
}
