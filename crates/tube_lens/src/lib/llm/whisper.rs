use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::{Mutex, OnceCell};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{AudioInput, TranscribeResponse, TranscribeSegment, Transcriber};

const SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, thiserror::Error)]
pub enum WhisperError {
    #[error("Failed to load whisper model {path}: {source}")]
    Model {
        path: PathBuf,
        source: whisper_rs::WhisperError,
    },
    #[error("Whisper decode failed: {0}")]
    Decode(#[from] whisper_rs::WhisperError),
    #[error("Failed to read audio: {0}")]
    Audio(#[from] hound::Error),
    #[error("Unsupported audio format: {0}")]
    Format(String),
    #[error("Decoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Local whisper.cpp speech-to-text.
///
/// The model is loaded on first use and kept for the lifetime of the process.
/// Decoding is serialized, one transcription at a time.
pub struct WhisperTranscriber {
    model_path: PathBuf,
    context: OnceCell<Arc<WhisperContext>>,
    decode_lock: Mutex<()>,
}

impl WhisperTranscriber {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            context: OnceCell::new(),
            decode_lock: Mutex::new(()),
        }
    }

    async fn context(&self) -> Result<Arc<WhisperContext>, WhisperError> {
        self.context
            .get_or_try_init(|| async {
                let path = self.model_path.clone();
                tracing::info!(model = %path.display(), "Loading whisper model");

                tokio::task::spawn_blocking(move || {
                    let params = WhisperContextParameters::default();
                    WhisperContext::new_with_params(&path.to_string_lossy(), params)
                        .map(Arc::new)
                        .map_err(|source| WhisperError::Model { path, source })
                })
                .await?
            })
            .await
            .cloned()
    }
}

impl Transcriber for WhisperTranscriber {
    const TRANSCRIBER_MODEL: &'static str = "whisper.cpp";
    type Error = WhisperError;

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, audio_input: AudioInput) -> Result<TranscribeResponse, Self::Error> {
        let _guard = self.decode_lock.lock().await;
        let context = self.context().await?;
        let file_path = audio_input.file_path().clone();

        tokio::task::spawn_blocking(move || decode(&context, &file_path)).await?
    }
}

fn read_samples(path: &Path) -> Result<Vec<f32>, WhisperError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.sample_rate != SAMPLE_RATE || spec.bits_per_sample != 16 {
        return Err(WhisperError::Format(format!(
            "expected 16-bit mono {SAMPLE_RATE} Hz wav, got {} channel(s) at {} Hz ({} bit)",
            spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}

fn decode(context: &WhisperContext, path: &Path) -> Result<TranscribeResponse, WhisperError> {
    let samples = read_samples(path)?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(Some("auto"));
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_special(false);
    params.set_print_timestamps(false);

    let mut state = context.create_state()?;
    state.full(params, &samples)?;

    let mut text = String::new();
    let mut segments = Vec::new();

    for segment in state.as_iter() {
        let seg_text = match segment.to_str() {
            Ok(s) => s,
            Err(_) => continue,
        };
        // whisper timestamps are in centiseconds
        segments.push(TranscribeSegment {
            start: segment.start_timestamp() as f64 / 100.0,
            end: segment.end_timestamp() as f64 / 100.0,
            text: seg_text.to_string(),
        });
        text.push_str(seg_text);
    }

    Ok(TranscribeResponse {
        duration: samples.len() as f64 / SAMPLE_RATE as f64,
        text: text.trim().to_string(),
        segments: Some(segments),
    })
}
