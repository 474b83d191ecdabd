//! # colloquy-core
//!
//! Reusable transcript-to-speech rendering SDK.
//!
//! ## Architecture
//!
//! ```text
//! transcript text → parse_transcript → Vec<DialogueTurn>
//!                                           │
//!                                SpeechSynthesizer::synthesize   (awaited once)
//!                                           │
//!                              base64 payload → decode_audio_data
//!                                           │
//!                                      AudioBuffer
//!                                           │
//!                                  audio_buffer_to_wav
//!                                           │
//!                          RenderedConversation (WAV bytes + file name)
//! ```
//!
//! The decode and encode stages are pure, synchronous transformations. The
//! only suspension point is the remote synthesis call, and `RenderEngine`
//! permits exactly one of those in flight at a time.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod audio;
pub mod engine;
pub mod error;
pub mod session;
pub mod synth;
pub mod transcript;
pub mod voice;

// Convenience re-exports for downstream crates
pub use audio::{AudioBuffer, GENERATION_CHANNELS, GENERATION_SAMPLE_RATE};
pub use engine::{EngineConfig, RenderEngine, RenderStatus};
pub use error::ColloquyError;
pub use session::{RenderedConversation, Session};
pub use synth::{GeminiSynthesizer, SpeechSynthesizer, StubSynthesizer};
pub use transcript::{parse_transcript, DialogueTurn, Speaker};
pub use voice::VoiceAssignments;
