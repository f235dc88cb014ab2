//! Crossterm presenter
//!
//! Owns the terminal while the game runs and redraws only the rows that
//! changed since the previous frame.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{self, Color},
    terminal,
};

use super::canvas::{Canvas, Tone};

fn color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::White,
        Tone::Dim => Color::DarkGrey,
        Tone::Highlight => Color::Yellow,
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
    }
}

/// Raw-mode alternate screen, restored on drop
pub struct Terminal<W: Write> {
    out: W,
    previous: Option<Canvas>,
}

impl<W: Write> Terminal<W> {
    /// Switch the terminal into game mode
    pub fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All),
        )?;
        Ok(Self {
            out,
            previous: None,
        })
    }

    /// Current terminal size in cells
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw `canvas`, skipping rows identical to the last frame
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let resized = self
            .previous
            .as_ref()
            .is_none_or(|p| p.cols() != canvas.cols() || p.rows() != canvas.rows());
        if resized {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        }

        for row in 0..canvas.rows() {
            let cells = canvas.row(row);
            if !resized && self.previous.as_ref().is_some_and(|p| p.row(row) == cells) {
                continue;
            }

            queue!(self.out, cursor::MoveTo(0, row))?;
            let mut tone = None;
            for cell in cells {
                if tone != Some(cell.tone) {
                    queue!(self.out, style::SetForegroundColor(color(cell.tone)))?;
                    tone = Some(cell.tone);
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
        }

        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        self.previous = Some(canvas.clone());
        Ok(())
    }

    /// Restore the terminal. Also runs on drop.
    fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
