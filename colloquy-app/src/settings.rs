//! Persistent application settings (JSON file in the user data directory).

use std::fs;
use std::path::{Path, PathBuf};

use colloquy_core::voice::{
    normalize_voice_name, DEFAULT_ASSISTANT_VOICE, DEFAULT_USER_VOICE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AppSettings {
    /// Gemini API key. `GEMINI_API_KEY` in the environment takes precedence.
    pub api_key: Option<String>,
    pub model: String,
    pub user_voice: String,
    pub assistant_voice: String,
    /// Where generated files land when no `--output` is given.
    /// `None` means the current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: colloquy_core::synth::gemini::DEFAULT_TTS_MODEL.into(),
            user_voice: DEFAULT_USER_VOICE.into(),
            assistant_voice: DEFAULT_ASSISTANT_VOICE.into(),
            output_dir: None,
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        self.api_key = self
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let model = self.model.trim();
        self.model = if model.is_empty() {
            colloquy_core::synth::gemini::DEFAULT_TTS_MODEL.into()
        } else {
            model.to_string()
        };
        self.user_voice = normalize_voice_name(&self.user_voice, DEFAULT_USER_VOICE);
        self.assistant_voice = normalize_voice_name(&self.assistant_voice, DEFAULT_ASSISTANT_VOICE);
    }
}

pub fn default_settings_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Colloquy")
            .join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".config")
            })
            .join("colloquy")
            .join("settings.json")
    }
}

pub fn load_settings(path: &Path) -> AppSettings {
    let mut settings = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<AppSettings>(&raw).ok())
        .unwrap_or_default();
    settings.normalize();
    settings
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
    fs::write(path, json)
}
