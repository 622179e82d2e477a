//! Vamp - procedural background music for game screens
//!
//! Keys a four-mood chiptune backing track (suspense, lobby, battle, victory)
//! to the host application's active screen and fires one-shot UI effects.
//! A lookahead scheduler queues synthesized cues slightly ahead of the audio
//! clock so wall-clock timer jitter never reaches the output.

pub mod config;
pub mod engine;
pub mod pattern;
pub mod synth;
pub mod viz;

pub use config::VampConfig;
pub use engine::Engine;
pub use pattern::{Mood, Screen};
