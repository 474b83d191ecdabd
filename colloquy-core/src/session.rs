//! Render output and the single session slot that owns it.

use chrono::Utc;

use crate::audio::wav::WAV_MIME;
use crate::audio::AudioBuffer;

/// The complete output of one successful generation: the decoded buffer and
/// the WAV blob derived from it. Immutable once built.
#[derive(Debug, Clone)]
pub struct RenderedConversation {
    audio: AudioBuffer,
    wav: Vec<u8>,
    /// Unix timestamp (milliseconds) of when the render finished.
    created_at_ms: i64,
}

impl RenderedConversation {
    pub fn new(audio: AudioBuffer, wav: Vec<u8>) -> Self {
        Self {
            audio,
            wav,
            created_at_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn audio(&self) -> &AudioBuffer {
        &self.audio
    }

    pub fn wav_bytes(&self) -> &[u8] {
        &self.wav
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    /// Download file name: `conversation_<unix-timestamp-ms>.wav`.
    pub fn file_name(&self) -> String {
        format!("conversation_{}.wav", self.created_at_ms)
    }
}

/// Single-slot owner of the latest render.
///
/// A new successful generation fully replaces the previous one; dropping the
/// old `RenderedConversation` releases its sample and blob allocations, so
/// repeated generations never accumulate.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<RenderedConversation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new render, returning the one it displaced (if any).
    pub fn replace(&mut self, render: RenderedConversation) -> Option<RenderedConversation> {
        self.current.replace(render)
    }

    pub fn current(&self) -> Option<&RenderedConversation> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
