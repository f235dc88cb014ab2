//! Speaker audio output via rodio
//!
//! Each played sound gets its own detached sink so overlapping effects mix.

use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

use crate::audio::{AudioBackend, Sound};

/// Plays rendered PCM on the default output device
pub struct SpeakerBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl SpeakerBackend {
    /// Open the default output device
    pub fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

/// Stereo source for a rendered sound
pub fn source(sound: &Sound) -> SamplesBuffer<i16> {
    SamplesBuffer::new(2, sound.sample_rate, sound.interleaved())
}

impl AudioBackend for SpeakerBackend {
    fn play(&mut self, sound: &Sound, volume: f32) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(volume);
                sink.append(source(sound));
                sink.detach();
            }
            Err(e) => log::warn!("Could not play {}: {}", sound.effect.as_str(), e),
        }
    }
}
