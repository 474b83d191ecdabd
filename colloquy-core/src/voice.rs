//! Prebuilt voice catalog and per-speaker voice selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::transcript::Speaker;

/// Prebuilt voice names accepted by the generation service.
pub const PREBUILT_VOICES: &[&str] = &[
    "Zephyr", "Puck", "Charon", "Kore", "Fenrir", "Leda", "Orus", "Aoede", "Callirrhoe",
    "Autonoe", "Enceladus", "Iapetus", "Umbriel", "Algieba", "Despina", "Erinome", "Algenib",
    "Rasalgethi", "Laomedeia", "Achernar", "Alnilam", "Schedar", "Gacrux", "Pulcherrima",
    "Achird", "Zubenelgenubi", "Vindemiatrix", "Sadachbia", "Sadaltager", "Sulafat",
];

pub const DEFAULT_USER_VOICE: &str = "Puck";
pub const DEFAULT_ASSISTANT_VOICE: &str = "Kore";

/// One prebuilt voice per transcript speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAssignments {
    pub user_voice: String,
    pub assistant_voice: String,
}

impl Default for VoiceAssignments {
    fn default() -> Self {
        Self {
            user_voice: DEFAULT_USER_VOICE.into(),
            assistant_voice: DEFAULT_ASSISTANT_VOICE.into(),
        }
    }
}

impl VoiceAssignments {
    /// The voice assigned to a speaker.
    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::User => &self.user_voice,
            Speaker::Assistant => &self.assistant_voice,
        }
    }

    /// Replace unknown voice names with the per-speaker default.
    ///
    /// Matching against the catalog is case-insensitive and the canonical
    /// casing is restored, so `"puck"` normalizes to `"Puck"`.
    pub fn normalize(&mut self) {
        self.user_voice = normalize_voice_name(&self.user_voice, DEFAULT_USER_VOICE);
        self.assistant_voice = normalize_voice_name(&self.assistant_voice, DEFAULT_ASSISTANT_VOICE);
    }
}

pub fn normalize_voice_name(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if let Some(known) = PREBUILT_VOICES
        .iter()
        .find(|v| v.eq_ignore_ascii_case(trimmed))
    {
        return (*known).to_string();
    }
    if !trimmed.is_empty() {
        warn!(voice = trimmed, fallback, "unknown voice name, using fallback");
    }
    fallback.to_string()
}
