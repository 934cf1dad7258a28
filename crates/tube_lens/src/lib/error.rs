#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid YouTube URL or video ID: {0:?}")]
    InvalidIdentifier(String),
    #[error("Transcript cannot be empty")]
    EmptyTranscript,
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),
    #[error("Text generation failed: {0}")]
    Generation(String),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than an upstream failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidIdentifier(_) | Error::EmptyTranscript | Error::UnsupportedLanguage(_)
        )
    }
}
