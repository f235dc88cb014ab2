//! Terminal bell audio output
//!
//! Fallback when no audio device opens: played sounds ring the bell.

use std::io::Write;
use std::time::{Duration, Instant};

use crate::audio::{AudioBackend, Sound};

/// Quietest mixed volume that still rings, low enough for every effect
/// at default settings
pub const BELL_THRESHOLD: f32 = 0.05;

/// Minimum gap between two rings
const MIN_GAP: Duration = Duration::from_millis(120);

/// Rings the terminal bell for played sounds
pub struct TerminalBell<W: Write> {
    out: W,
    /// Quieter sounds are skipped
    threshold: f32,
    last_ring: Option<Instant>,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, threshold: f32) -> Self {
        Self {
            out,
            threshold,
            last_ring: None,
        }
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn play(&mut self, sound: &Sound, volume: f32) {
        if volume < self.threshold {
            return;
        }
        let now = Instant::now();
        if self.last_ring.is_some_and(|t| now.duration_since(t) < MIN_GAP) {
            return;
        }
        self.last_ring = Some(now);

        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::warn!("Bell for {} failed: {}", sound.effect.as_str(), e);
        }
    }
}
