pub mod builder;

use std::{
    fs::remove_dir_all,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    types::{AcquisitionResult, TranscriptSegment},
    yt::{AudioHandler, CaptionError, CaptionSource, VideoId},
    AudioInput, TranscribeResponse, Transcriber,
};

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub chunk_duration_seconds: u16,
}

/// Two-tier transcript acquisition: the official caption index first, then
/// download + local speech-to-text.
#[derive(Debug)]
pub struct TranscriptAcquirer<C, A, T>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    pub(crate) scratch_dir: PathBuf,
    pub(crate) captions: C,
    pub(crate) audio_handler: A,
    pub(crate) transcriber: T,
    pub(crate) chunking_config: Option<ChunkingConfig>,
}

impl<C, A, T> TranscriptAcquirer<C, A, T>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    /// Never fails: total failure is reported as `success == false` with the
    /// offline path's error message.
    #[tracing::instrument(skip_all, fields(video_id = %video_id))]
    pub async fn acquire(&self, video_id: &VideoId) -> AcquisitionResult {
        match self.captions.fetch_captions(video_id).await {
            Ok(segments) => return AcquisitionResult::official(segments),
            Err(e @ (CaptionError::NotFound(_) | CaptionError::Disabled(_))) => {
                tracing::info!(error = %e, "No official transcript, falling back to offline transcription");
            }
            Err(e @ (CaptionError::Unplayable(_) | CaptionError::Transport(_))) => {
                tracing::warn!(error = %e, "Official transcript fetch failed, falling back to offline transcription");
            }
            Err(e @ CaptionError::InvalidResponse(_)) => {
                tracing::warn!(error = %e, "Caption index answered unexpectedly, falling back to offline transcription");
            }
        }

        match self.transcribe_offline(video_id).await {
            Ok(segments) => {
                tracing::info!(count = segments.len(), "Offline transcription complete");
                AcquisitionResult::offline(segments)
            }
            Err(e) => {
                tracing::error!(error = ?e, "Offline transcription failed");
                AcquisitionResult::failed(format!("{e:#}"))
            }
        }
    }

    /// Downloads the audio into a per-attempt scratch directory and runs the
    /// transcriber over it. The directory is removed on every exit path.
    #[tracing::instrument(skip(self))]
    async fn transcribe_offline(&self, video_id: &VideoId) -> anyhow::Result<Vec<TranscriptSegment>> {
        let scratch = ScratchDir::create(&self.scratch_dir, video_id).await?;

        let audio_path = self
            .audio_handler
            .download(video_id, scratch.path())
            .await
            .context("Failed to download audio")?;

        let audio_input = match &self.chunking_config {
            Some(config) => AudioInput::Chunked {
                chunk_duration_seconds: config.chunk_duration_seconds,
                chunks_dir_path: scratch.path().join("chunks"),
                file_path: audio_path,
            },
            None => AudioInput::File(audio_path),
        };

        tracing::info!(model = T::TRANSCRIBER_MODEL, "Transcribing audio");
        let response = self
            .transcriber
            .transcribe(audio_input)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to transcribe audio: {e}"))?;

        Ok(into_segments(response))
    }
}

fn into_segments(response: TranscribeResponse) -> Vec<TranscriptSegment> {
    response
        .segments
        .unwrap_or_default()
        .into_iter()
        .map(|seg| {
            TranscriptSegment::new(seg.text.trim(), seg.start, (seg.end - seg.start).max(0.0))
        })
        .collect()
}

/// Scratch directory owned by a single offline attempt, deleted on drop.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub async fn create(root: &Path, video_id: &VideoId) -> anyhow::Result<Self> {
        let path = root.join(format!("{video_id}-{}", uuid::Uuid::new_v4().simple()));
        tokio::fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create scratch directory {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = remove_dir_all(&self.path) {
                tracing::warn!(error = ?e, path = ?self.path, "Failed to clean up scratch audio");
            } else {
                tracing::info!(path = ?self.path, "Cleaned up scratch audio");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranscribeSegment;

    #[test]
    fn test_into_segments_maps_end_to_duration() {
        let response = TranscribeResponse {
            duration: 10.0,
            text: "hello world".into(),
            segments: Some(vec![
                TranscribeSegment {
                    start: 0.0,
                    end: 2.5,
                    text: " hello ".into(),
                },
                TranscribeSegment {
                    start: 2.5,
                    end: 2.0,
                    text: "world".into(),
                },
            ]),
        };

        assert_eq!(
            into_segments(response),
            vec![
                TranscriptSegment::new("hello", 0.0, 2.5),
                TranscriptSegment::new("world", 2.5, 0.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_scratch_dir_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();

        let scratch = ScratchDir::create(root.path(), &video_id).await.unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("dQw4w9WgXcQ.wav"), b"RIFF").unwrap();
        assert!(path.exists());

        drop(scratch);
        assert!(!path.exists());
    }
}
