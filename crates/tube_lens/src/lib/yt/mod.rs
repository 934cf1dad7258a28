pub mod audio_handler;
pub mod captions;
pub mod video_id;

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use crate::types::TranscriptSegment;
pub use video_id::VideoId;

/// Failures of the official caption index that the acquirer knows how to
/// recover from.
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("No caption track found for video {0}")]
    NotFound(VideoId),
    #[error("Captions are disabled for video {0}")]
    Disabled(VideoId),
    #[error("Video is not playable: {0}")]
    Unplayable(String),
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected caption index response: {0}")]
    InvalidResponse(String),
}

/// The fast path: pre-existing transcripts published for a video.
pub trait CaptionSource {
    fn fetch_captions(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, CaptionError>> + Send;
}

/// Downloads a video's best audio stream to a local file.
pub trait AudioHandler {
    const BASE_URL: &str;

    fn download(
        &self,
        video_id: &VideoId,
        audio_dl_path: &Path,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;
}
