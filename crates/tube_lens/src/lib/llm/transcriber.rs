use std::{fmt::Display, future::Future, path::PathBuf};

use serde::Deserialize;

/// Speech-to-text over a downloaded audio file.
pub trait Transcriber {
    const TRANSCRIBER_MODEL: &'static str;

    type Error: Display;

    fn transcribe(
        &self,
        audio_input: AudioInput,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub enum AudioInput {
    Chunked {
        chunk_duration_seconds: u16,
        chunks_dir_path: PathBuf,
        file_path: PathBuf,
    },
    File(PathBuf),
}

impl AudioInput {
    pub fn file_path(&self) -> &PathBuf {
        match self {
            AudioInput::Chunked { file_path, .. } => file_path,
            AudioInput::File(file_path) => file_path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TranscribeResponse {
    pub duration: f64,
    pub text: String,
    pub segments: Option<Vec<TranscribeSegment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}
