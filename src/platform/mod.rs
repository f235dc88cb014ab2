//! Platform abstraction layer
//!
//! Handles terminal specifics for:
//! - Input events (key → command mapping, held keys)
//! - Sound output (speaker, terminal bell fallback)

pub mod bell;
pub mod input;
#[cfg(feature = "speaker")]
pub mod speaker;

pub use bell::TerminalBell;
pub use input::{HeldKeys, InputAction, map_key};
#[cfg(feature = "speaker")]
pub use speaker::SpeakerBackend;
