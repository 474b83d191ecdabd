//! Speaker-tagged transcript parsing.
//!
//! ## Format
//!
//! One logical turn per line starting (case-insensitively) with `User:` or
//! `Assistant:`. A non-blank line with no recognized speaker tag is a
//! continuation: its content is space-joined onto the most recent turn.
//! Blank lines are skipped. Continuation text arriving before the first
//! recognized turn has no turn to attach to and is dropped.

use serde::{Deserialize, Serialize};

use crate::error::{ColloquyError, Result};

/// Who is speaking a dialogue turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Canonical label used in speaker tags and synthesis prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous utterance by a single speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Match a speaker tag at the start of a line.
///
/// Returns the speaker and the line remainder with the whitespace after the
/// colon stripped. The tag must start at column zero — an indented tag is
/// treated as continuation text.
fn split_speaker_tag(line: &str) -> Option<(Speaker, &str)> {
    for (tag, speaker) in [("user:", Speaker::User), ("assistant:", Speaker::Assistant)] {
        if let Some(head) = line.get(..tag.len()) {
            if head.eq_ignore_ascii_case(tag) {
                return Some((speaker, line[tag.len()..].trim_start()));
            }
        }
    }
    None
}

/// Parse a raw transcript into dialogue turns.
///
/// # Errors
/// Returns `ColloquyError::NoDialogueLines` when no line carries a
/// recognized speaker tag.
pub fn parse_transcript(raw: &str) -> Result<Vec<DialogueTurn>> {
    let mut turns: Vec<DialogueTurn> = Vec::new();

    for line in raw.lines() {
        if let Some((speaker, text)) = split_speaker_tag(line) {
            turns.push(DialogueTurn {
                speaker,
                text: text.trim_end().to_string(),
            });
            continue;
        }

        let continuation = line.trim();
        if continuation.is_empty() {
            continue;
        }

        if let Some(last) = turns.last_mut() {
            if !last.text.is_empty() {
                last.text.push(' ');
            }
            last.text.push_str(continuation);
        }
        // No turn yet — preamble text, dropped.
    }

    if turns.is_empty() {
        return Err(ColloquyError::NoDialogueLines);
    }

    Ok(turns)
}
