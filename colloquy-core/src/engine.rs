//! `RenderEngine` — drives one transcript through synthesis, decode, and
//! container encoding.
//!
//! ## Lifecycle
//!
//! ```text
//! RenderEngine::new()
//!     └─► render()      → status = Generating … Ready | Error
//! ```
//!
//! Exactly one render may be in flight: an atomic guard rejects a second
//! concurrent call with `AlreadyGenerating` (the UI's disabled generate
//! button, expressed as a mutex over the session slot). There is no
//! cancellation and no retry — a render runs to completion or failure, and a
//! failure leaves any previously produced output untouched.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

use crate::audio::decode::{decode_audio_data, decode_base64};
use crate::audio::wav::audio_buffer_to_wav;
use crate::audio::{GENERATION_CHANNELS, GENERATION_SAMPLE_RATE};
use crate::error::{ColloquyError, Result};
use crate::session::RenderedConversation;
use crate::synth::SpeechSynthesizer;
use crate::transcript::DialogueTurn;
use crate::voice::VoiceAssignments;

/// Configuration for `RenderEngine`.
///
/// The service's output format is not negotiated — these are fixed pipeline
/// constants kept as explicit configuration rather than auto-detected.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sample rate of the PCM the synthesis backend returns (Hz).
    pub sample_rate: u32,
    /// Channel count of the returned PCM.
    pub channels: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: GENERATION_SAMPLE_RATE,
            channels: GENERATION_CHANNELS,
        }
    }
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Idle,
    Generating,
    Ready,
    Error,
}

/// The pipeline driver.
///
/// `RenderEngine` is `Send + Sync` — all mutable state uses interior
/// mutability, so it can sit in an `Arc` shared with whatever host drives it.
pub struct RenderEngine {
    config: EngineConfig,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    /// `true` while a render is in flight.
    generating: AtomicBool,
    status: Mutex<RenderStatus>,
}

impl RenderEngine {
    pub fn new(config: EngineConfig, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            config,
            synthesizer,
            generating: AtomicBool::new(false),
            status: Mutex::new(RenderStatus::Idle),
        }
    }

    pub fn status(&self) -> RenderStatus {
        *self.status.lock()
    }

    /// Run the full pipeline for one transcript.
    ///
    /// Suspends only on the synthesis call; decode and encode run inline.
    ///
    /// # Errors
    /// - `ColloquyError::AlreadyGenerating` if a render is already in flight.
    /// - Any synthesis, decode, or degenerate-payload error from the stages.
    pub async fn render(
        &self,
        turns: &[DialogueTurn],
        voices: &VoiceAssignments,
    ) -> Result<RenderedConversation> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ColloquyError::AlreadyGenerating);
        }

        *self.status.lock() = RenderStatus::Generating;
        info!(turns = turns.len(), "starting speech generation");

        let result = self.render_inner(turns, voices).await;

        match &result {
            Ok(render) => {
                *self.status.lock() = RenderStatus::Ready;
                info!(
                    frames = render.audio().len(),
                    duration_secs = render.audio().duration_secs(),
                    wav_bytes = render.wav_bytes().len(),
                    "render complete"
                );
            }
            Err(e) => {
                *self.status.lock() = RenderStatus::Error;
                warn!("render failed: {e}");
            }
        }

        self.generating.store(false, Ordering::SeqCst);
        result
    }

    async fn render_inner(
        &self,
        turns: &[DialogueTurn],
        voices: &VoiceAssignments,
    ) -> Result<RenderedConversation> {
        let payload = self.synthesizer.synthesize(turns, voices).await?;
        let bytes = decode_base64(&payload)?;
        let audio = decode_audio_data(&bytes, self.config.sample_rate, self.config.channels)?;
        let wav = audio_buffer_to_wav(&audio);
        Ok(RenderedConversation::new(audio, wav))
    }
}
