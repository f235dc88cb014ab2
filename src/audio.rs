//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//! Sounds are rendered once into PCM buffers and handed to an
//! `AudioBackend` whenever the simulation reports a matching event.

use crate::sim::{EventSink, GameEvent};

/// Output sample rate for generated sounds
pub const SAMPLE_RATE: u32 = 22050;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall
    WallHit,
    /// Point scored
    Score,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::PaddleHit,
        SoundEffect::WallHit,
        SoundEffect::Score,
    ];

    /// Slot in `SoundEffect::ALL`
    pub fn index(&self) -> usize {
        match self {
            SoundEffect::PaddleHit => 0,
            SoundEffect::WallHit => 1,
            SoundEffect::Score => 2,
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::GameWon { .. } | GameEvent::SeriesWon { .. } => None,
        }
    }

    /// Per-effect mix level
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::PaddleHit => 0.3,
            SoundEffect::WallHit => 0.2,
            SoundEffect::Score => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::WallHit => "wall_bounce",
            SoundEffect::Score => "score",
        }
    }
}

/// A rendered stereo 16-bit PCM buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    pub effect: SoundEffect,
    pub sample_rate: u32,
    /// Interleaved as [left, right]
    pub frames: Vec<[i16; 2]>,
}

impl Sound {
    /// Length in seconds
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / self.sample_rate as f32
    }

    /// Samples as a flat left, right, left, right... buffer
    pub fn interleaved(&self) -> Vec<i16> {
        self.frames.iter().flatten().copied().collect()
    }
}

/// Render an effect at the given sample rate
pub fn synthesize(effect: SoundEffect, sample_rate: u32) -> Sound {
    let frames = match effect {
        // Short click with linear decay
        SoundEffect::PaddleHit => render(sample_rate, 0.05, |t, d| {
            (32767.0 * (1.0 - t / d), 440.0)
        }),
        // Lower pitch
        SoundEffect::WallHit => render(sample_rate, 0.04, |t, d| {
            (32767.0 * (1.0 - t / d), 220.0)
        }),
        // Rising tone 440 -> 880 Hz at half amplitude
        SoundEffect::Score => render(sample_rate, 0.3, |t, d| {
            (32767.0 * (1.0 - t / d) * 0.5, 440.0 + 440.0 * t / d)
        }),
    };

    Sound {
        effect,
        sample_rate,
        frames,
    }
}

/// Sample a sine whose (amplitude, frequency) vary with time `t` over duration `d`
fn render(
    sample_rate: u32,
    duration: f64,
    shape: impl Fn(f64, f64) -> (f64, f64),
) -> Vec<[i16; 2]> {
    let samples = (sample_rate as f64 * duration) as usize;
    (0..samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let (amplitude, frequency) = shape(t, duration);
            let value = (amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin()) as i16;
            [value, value]
        })
        .collect()
}

/// Where rendered sounds go to be heard
pub trait AudioBackend {
    /// Play `sound` at `volume` (0.0 - 1.0, already mixed)
    fn play(&mut self, sound: &Sound, volume: f32);
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn play(&mut self, sound: &Sound, volume: f32) {
        (**self).play(sound, volume);
    }
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend {
    pub played: u64,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, sound: &Sound, volume: f32) {
        self.played += 1;
        log::trace!(
            "sfx {} ({} frames, vol {:.2})",
            sound.effect.as_str(),
            sound.frames.len(),
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    /// Indexed by `SoundEffect::index`
    sounds: [Sound; 3],
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    enabled: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        let sounds = SoundEffect::ALL.map(|effect| synthesize(effect, SAMPLE_RATE));
        Self {
            sounds,
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            enabled: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Rendered buffer for an effect
    pub fn sound(&self, effect: SoundEffect) -> &Sound {
        &self.sounds[effect.index()]
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip sound on/off, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!("Sound: {}", if self.enabled { "ON" } else { "OFF" });
        self.enabled
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.enabled {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        let sound = &self.sounds[effect.index()];
        self.backend.play(sound, vol);
    }
}

impl<B: AudioBackend> EventSink for AudioManager<B> {
    fn emit(&mut self, event: GameEvent) {
        if let Some(effect) = SoundEffect::for_event(&event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
        frames: Vec<usize>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, sound: &Sound, volume: f32) {
            self.played.push((sound.effect, volume));
            self.frames.push(sound.frames.len());
        }
    }

    #[test]
    fn test_buffer_lengths() {
        assert_eq!(synthesize(SoundEffect::PaddleHit, SAMPLE_RATE).frames.len(), 1102);
        assert_eq!(synthesize(SoundEffect::WallHit, SAMPLE_RATE).frames.len(), 882);
        assert_eq!(synthesize(SoundEffect::Score, SAMPLE_RATE).frames.len(), 6615);
    }

    #[test]
    fn test_envelope_decays() {
        for effect in SoundEffect::ALL {
            let sound = synthesize(effect, SAMPLE_RATE);
            let n = sound.frames.len();
            let peak = |frames: &[[i16; 2]]| {
                frames
                    .iter()
                    .map(|f| (f[0] as i32).abs())
                    .max()
                    .unwrap_or(0)
            };
            assert_eq!(sound.frames[0], [0, 0]);
            assert!(peak(&sound.frames[..n / 5]) > peak(&sound.frames[n * 4 / 5..]));
            assert!(sound.frames.iter().all(|f| f[0] == f[1]));
        }
    }

    #[test]
    fn test_score_sound_is_quieter_peak() {
        let score = synthesize(SoundEffect::Score, SAMPLE_RATE);
        assert!(score.frames.iter().all(|f| (f[0] as i32).abs() <= 16384));
        assert!((score.duration() - 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_events_map_to_sounds() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.emit(GameEvent::PaddleHit { side: Side::Ai });
        audio.emit(GameEvent::WallBounce);
        audio.emit(GameEvent::Score { scorer: Side::Player });
        audio.emit(GameEvent::GameWon { winner: Side::Player });

        let played: Vec<_> = audio.backend().played.iter().map(|p| p.0).collect();
        assert_eq!(
            played,
            vec![
                SoundEffect::PaddleHit,
                SoundEffect::WallHit,
                SoundEffect::Score
            ]
        );
        assert!((audio.backend().played[0].1 - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_mutes() {
        let mut audio = AudioManager::new(Recorder::default());
        assert!(!audio.toggle());
        audio.play(SoundEffect::Score);
        assert!(audio.backend().played.is_empty());

        assert!(audio.toggle());
        audio.play(SoundEffect::Score);
        assert_eq!(audio.backend().played.len(), 1);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_sfx_volume(-3.0);
        audio.play(SoundEffect::PaddleHit);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_sound_lookup() {
        let audio = AudioManager::new(Recorder::default());
        for (i, effect) in SoundEffect::ALL.into_iter().enumerate() {
            assert_eq!(effect.index(), i);
            assert_eq!(audio.sound(effect).effect, effect);
        }
    }

    #[test]
    fn test_backend_receives_full_buffers() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.emit(GameEvent::WallBounce);
        audio.emit(GameEvent::PaddleHit { side: Side::Player });
        audio.emit(GameEvent::Score { scorer: Side::Ai });
        assert_eq!(audio.backend().frames, vec![882, 1102, 6615]);
    }

    #[test]
    fn test_boxed_backend() {
        let mut audio = AudioManager::new(Box::new(Recorder::default()));
        audio.play(SoundEffect::WallHit);
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(audio.backend().frames, vec![882, 1102]);
    }

    #[test]
    fn test_interleaved_layout() {
        let sound = synthesize(SoundEffect::PaddleHit, SAMPLE_RATE);
        let samples = sound.interleaved();
        assert_eq!(samples.len(), sound.frames.len() * 2);
        assert_eq!(samples[2], sound.frames[1][0]);
        assert_eq!(samples[3], sound.frames[1][1]);
    }
}
