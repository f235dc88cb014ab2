//! Character-cell rasterisation of simulation snapshots
//!
//! World coordinates are scaled onto a `cols` x `rows` grid. Each screen
//! (menu, play, game over, series over) is drawn from a `Snapshot` alone.

use crate::sim::{Mode, Rect, Side, Snapshot};

/// Colour role of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Dim,
    Highlight,
    Good,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            tone: Tone::Normal,
        }
    }
}

/// A grid of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row as usize * self.cols as usize + col as usize])
        } else {
            None
        }
    }

    /// Cells of one row
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    /// Row as plain text
    pub fn line(&self, row: u16) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    pub fn put(&mut self, col: i32, row: i32, ch: char, tone: Tone) {
        if col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32 {
            self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, tone };
        }
    }

    pub fn text(&mut self, col: i32, row: i32, text: &str, tone: Tone) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, tone);
        }
    }

    pub fn center_text(&mut self, row: i32, text: &str, tone: Tone) {
        let width = text.chars().count() as i32;
        self.text((self.cols as i32 - width) / 2, row, text, tone);
    }

    pub fn clear_row(&mut self, row: i32) {
        for col in 0..self.cols as i32 {
            self.put(col, row, ' ', Tone::Normal);
        }
    }
}

/// Maps world coordinates onto the grid
#[derive(Debug, Clone, Copy)]
struct Projection {
    sx: f32,
    sy: f32,
}

impl Projection {
    fn new(snapshot: &Snapshot, canvas: &Canvas) -> Self {
        Self {
            sx: canvas.cols as f32 / snapshot.screen.x,
            sy: canvas.rows as f32 / snapshot.screen.y,
        }
    }

    /// Row for a world y
    fn row(&self, y: f32) -> i32 {
        (y * self.sy).floor() as i32
    }

    /// Column for a world x
    fn col(&self, x: f32) -> i32 {
        (x * self.sx).floor() as i32
    }

    /// Fill every cell the rect touches (at least one)
    fn fill(&self, canvas: &mut Canvas, rect: &Rect, ch: char, tone: Tone) {
        let c0 = self.col(rect.left());
        let r0 = self.row(rect.top());
        let c1 = ((rect.right() * self.sx).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom() * self.sy).ceil() as i32).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                canvas.put(col, row, ch, tone);
            }
        }
    }
}

/// Draw the frame for `snapshot`
pub fn draw(snapshot: &Snapshot, sound_on: bool, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    match snapshot.mode {
        Mode::Menu => draw_menu(&mut canvas, snapshot),
        Mode::Playing => draw_game(&mut canvas, snapshot, sound_on),
        Mode::GameOver => {
            draw_game(&mut canvas, snapshot, sound_on);
            draw_game_over(&mut canvas, snapshot);
        }
        Mode::SeriesOver => draw_series_over(&mut canvas, snapshot),
    }
    canvas
}

/// Row at a fraction of the canvas height
fn row_at(canvas: &Canvas, fraction: f32) -> i32 {
    (canvas.rows as f32 * fraction).floor() as i32
}

fn draw_menu(canvas: &mut Canvas, snapshot: &Snapshot) {
    canvas.center_text(row_at(canvas, 0.15), "P I N G   P O N G", Tone::Normal);
    canvas.center_text(row_at(canvas, 0.25), "Select Game Mode", Tone::Dim);

    let start = row_at(canvas, 0.4);
    let spacing = (canvas.rows as i32 / 10).max(1);
    for (i, entry) in snapshot.menu.iter().enumerate() {
        let row = start + i as i32 * spacing;
        if i == snapshot.menu_cursor {
            canvas.center_text(row, &format!("> {} <", entry.label()), Tone::Highlight);
        } else {
            canvas.center_text(row, &entry.label(), Tone::Normal);
        }
    }

    canvas.center_text(
        canvas.rows as i32 - 2,
        "Up/Down to select | ENTER to confirm | ESC to exit",
        Tone::Dim,
    );
}

fn draw_game(canvas: &mut Canvas, snapshot: &Snapshot, sound_on: bool) {
    let proj = Projection::new(snapshot, canvas);

    // Dashed centre line
    let mid = proj.col(snapshot.screen.x / 2.0);
    for row in (0..canvas.rows as i32).step_by(2) {
        canvas.put(mid, row, '┆', Tone::Dim);
    }

    proj.fill(canvas, &snapshot.player_paddle, '█', Tone::Normal);
    proj.fill(canvas, &snapshot.ai_paddle, '█', Tone::Normal);
    proj.fill(canvas, &snapshot.ball, '●', Tone::Highlight);

    let player = snapshot.player_score.to_string();
    let ai = snapshot.ai_score.to_string();
    canvas.text(canvas.cols as i32 / 4, 1, &player, Tone::Normal);
    canvas.text(canvas.cols as i32 * 3 / 4, 1, &ai, Tone::Normal);

    let bottom = canvas.rows as i32 - 1;
    canvas.center_text(
        bottom,
        &format!(
            "Games Won - Player: {} | AI: {}",
            snapshot.player_games_won, snapshot.ai_games_won
        ),
        Tone::Dim,
    );
    let sound = format!("Sound: {} (M)", if sound_on { "ON" } else { "OFF" });
    canvas.text(1, bottom, &sound, Tone::Dim);
}

fn draw_game_over(canvas: &mut Canvas, snapshot: &Snapshot) {
    let center = canvas.rows as i32 / 2;
    for row in center - 4..=center + 4 {
        canvas.clear_row(row);
    }

    let (title, tone) = match snapshot.winner {
        Some(Side::Ai) => ("AI WINS GAME!", Tone::Bad),
        _ => ("PLAYER WINS GAME!", Tone::Good),
    };
    canvas.center_text(center - 3, title, tone);
    canvas.center_text(
        center - 1,
        &format!(
            "Series: Player {} - {} AI",
            snapshot.player_games_won, snapshot.ai_games_won
        ),
        Tone::Normal,
    );
    canvas.center_text(
        center + 1,
        &format!("First to {} wins!", snapshot.series_target),
        Tone::Dim,
    );
    canvas.center_text(center + 3, "Press SPACE to continue", Tone::Highlight);
}

fn draw_series_over(canvas: &mut Canvas, snapshot: &Snapshot) {
    let center = canvas.rows as i32 / 2;

    let (title, tone) = match snapshot.winner {
        Some(Side::Ai) => ("AI WINS SERIES!", Tone::Bad),
        _ => ("PLAYER WINS SERIES!", Tone::Good),
    };
    canvas.center_text(center - 5, title, tone);
    canvas.center_text(
        center - 2,
        &format!(
            "Final Score: {} - {}",
            snapshot.player_games_won, snapshot.ai_games_won
        ),
        Tone::Normal,
    );
    canvas.center_text(center, "C H A M P I O N", Tone::Highlight);
    canvas.center_text(center + 3, "Press SPACE or R for Menu", Tone::Dim);
    canvas.center_text(center + 4, "Press ESC to Exit", Tone::Dim);
}
