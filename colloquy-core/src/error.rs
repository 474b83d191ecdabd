use thiserror::Error;

/// All errors produced by colloquy-core.
#[derive(Debug, Error)]
pub enum ColloquyError {
    #[error("invalid base64 audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded audio contains zero frames")]
    EmptyAudio,

    #[error("speech generation failed: {0}")]
    Generation(String),

    #[error("generation request transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transcript contains no recognized dialogue lines")]
    NoDialogueLines,

    #[error("a generation is already in flight")]
    AlreadyGenerating,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ColloquyError>;
