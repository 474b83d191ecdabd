//! `StubSynthesizer` — offline backend that fabricates PCM without a network.
//!
//! Emits one short sine tone per dialogue turn (a different pitch per
//! speaker) so the full parse → decode → encode pipeline can be exercised
//! end-to-end in tests and `--stub` runs. Output is deterministic.

use async_trait::async_trait;
use base64::Engine as _;
use tracing::debug;

use super::SpeechSynthesizer;
use crate::audio::GENERATION_SAMPLE_RATE;
use crate::error::Result;
use crate::transcript::{DialogueTurn, Speaker};
use crate::voice::VoiceAssignments;

/// Tone-generator stub backend.
pub struct StubSynthesizer {
    /// PCM frames emitted per dialogue turn.
    samples_per_turn: usize,
}

impl StubSynthesizer {
    pub fn new(samples_per_turn: usize) -> Self {
        Self { samples_per_turn }
    }

    /// A stub that produces an empty payload — the degenerate-generation
    /// case the pipeline must reject.
    pub fn empty() -> Self {
        Self::new(0)
    }

    fn tone_hz(speaker: Speaker) -> f32 {
        match speaker {
            Speaker::User => 440.0,
            Speaker::Assistant => 330.0,
        }
    }
}

impl Default for StubSynthesizer {
    fn default() -> Self {
        // 100 ms per turn at the generation rate.
        Self::new(GENERATION_SAMPLE_RATE as usize / 10)
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(
        &self,
        turns: &[DialogueTurn],
        _voices: &VoiceAssignments,
    ) -> Result<String> {
        let mut bytes = Vec::with_capacity(turns.len() * self.samples_per_turn * 2);
        for turn in turns {
            let hz = Self::tone_hz(turn.speaker);
            for i in 0..self.samples_per_turn {
                let t = i as f32 / GENERATION_SAMPLE_RATE as f32;
                let sample = (t * hz * std::f32::consts::TAU).sin() * 0.3;
                bytes.extend_from_slice(&((sample * 32_767.0) as i16).to_le_bytes());
            }
        }

        debug!(turns = turns.len(), bytes = bytes.len(), "stub synthesis");
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_turn() -> Vec<DialogueTurn> {
        vec![DialogueTurn {
            speaker: Speaker::User,
            text: "test".into(),
        }]
    }

    #[tokio::test]
    async fn output_is_deterministic() {
        let stub = StubSynthesizer::default();
        let voices = VoiceAssignments::default();
        let a = stub.synthesize(&one_turn(), &voices).await.unwrap();
        let b = stub.synthesize(&one_turn(), &voices).await.unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[tokio::test]
    async fn empty_stub_yields_empty_payload() {
        let payload = StubSynthesizer::empty()
            .synthesize(&one_turn(), &VoiceAssignments::default())
            .await
            .unwrap();
        assert_eq!(payload, "");
    }

    #[tokio::test]
    async fn payload_length_scales_with_turns() {
        let stub = StubSynthesizer::new(1200);
        let voices = VoiceAssignments::default();
        let mut turns = one_turn();
        let one = stub.synthesize(&turns, &voices).await.unwrap();
        turns.push(DialogueTurn {
            speaker: Speaker::Assistant,
            text: "reply".into(),
        });
        let two = stub.synthesize(&turns, &voices).await.unwrap();
        assert!(two.len() > one.len());
    }
}
