use std::sync::{Arc, Mutex};
use tube_lens::{
    types::TranscriptSegment,
    yt::{CaptionError, CaptionSource, VideoId},
};

#[derive(Clone, Debug)]
pub enum CaptionOutcome {
    Found(Vec<TranscriptSegment>),
    NotFound,
    Disabled,
    Unplayable(String),
    Invalid(String),
    /// A real connection error from a port nothing listens on
    Transport,
}

#[derive(Clone)]
pub struct MockCaptionSource {
    pub outcome: CaptionOutcome,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCaptionSource {
    pub fn new(outcome: CaptionOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn found(segments: Vec<TranscriptSegment>) -> Self {
        Self::new(CaptionOutcome::Found(segments))
    }

    pub fn not_found() -> Self {
        Self::new(CaptionOutcome::NotFound)
    }
}

impl CaptionSource for MockCaptionSource {
    async fn fetch_captions(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<TranscriptSegment>, CaptionError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        match &self.outcome {
            CaptionOutcome::Found(segments) => Ok(segments.clone()),
            CaptionOutcome::NotFound => Err(CaptionError::NotFound(video_id.clone())),
            CaptionOutcome::Disabled => Err(CaptionError::Disabled(video_id.clone())),
            CaptionOutcome::Unplayable(reason) => Err(CaptionError::Unplayable(reason.clone())),
            CaptionOutcome::Invalid(msg) => Err(CaptionError::InvalidResponse(msg.clone())),
            CaptionOutcome::Transport => {
                let err = reqwest::get("http://127.0.0.1:9/captions")
                    .await
                    .expect_err("nothing listens on the discard port");
                Err(err.into())
            }
        }
    }
}
