use yt_transcript_rs::{
    api::YouTubeTranscriptApi,
    errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason},
    FetchedTranscript,
};

use crate::{
    parser::{any_language_codes, normalize_snippets, ENGLISH_CODES},
    types::TranscriptSegment,
    yt::{CaptionError, CaptionSource, VideoId},
};

/// Official caption index, read through `yt-transcript-rs`.
///
/// English tracks are asked for first. Within one language the crate returns
/// a manually created track before an auto-generated one.
pub struct TranscriptApiCaptions {
    api: YouTubeTranscriptApi,
}

impl TranscriptApiCaptions {
    pub fn new() -> Result<Self, CaptionError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| CaptionError::InvalidResponse(e.to_string()))?;
        Ok(Self { api })
    }

    async fn fetch(
        &self,
        video_id: &VideoId,
        languages: &[&str],
    ) -> Result<FetchedTranscript, CaptionError> {
        self.api
            .fetch_transcript(video_id.as_str(), languages, false)
            .await
            .map_err(|e| caption_error(video_id, e))
    }
}

impl CaptionSource for TranscriptApiCaptions {
    #[tracing::instrument(skip(self))]
    async fn fetch_captions(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<TranscriptSegment>, CaptionError> {
        let transcript = match self.fetch(video_id, ENGLISH_CODES).await {
            Err(CaptionError::NotFound(_)) => {
                tracing::debug!("No English track, trying any language");
                self.fetch(video_id, any_language_codes()).await?
            }
            other => other?,
        };

        tracing::info!(
            language = %transcript.language_code,
            generated = transcript.is_generated,
            snippets = transcript.snippets.len(),
            "Caption track fetched"
        );

        let segments = normalize_snippets(
            transcript
                .snippets
                .into_iter()
                .map(|s| (s.text, s.start, s.duration)),
        );
        if segments.is_empty() {
            return Err(CaptionError::NotFound(video_id.clone()));
        }

        Ok(segments)
    }
}

fn caption_error(video_id: &VideoId, err: CouldNotRetrieveTranscript) -> CaptionError {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. }) => {
            CaptionError::Disabled(video_id.clone())
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            CaptionError::NotFound(video_id.clone())
        }
        Some(
            CouldNotRetrieveTranscriptReason::VideoUnavailable { .. }
            | CouldNotRetrieveTranscriptReason::VideoUnplayable { .. },
        ) => CaptionError::Unplayable(err.to_string()),
        _ => CaptionError::InvalidResponse(err.to_string()),
    }
}
