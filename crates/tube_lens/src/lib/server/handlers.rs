use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::Error,
    server::{error::AppResult, state::AppState},
    translate::{
        languages::{self, DEFAULT_TARGET_LANGUAGE},
        TranslatorFactory,
    },
    types::{Chapter, KeyNote, TranscriptSegment, TranscriptSource},
    yt::{AudioHandler, CaptionSource, VideoId},
    Generator, Transcriber,
};

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub video_url: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub video_id: VideoId,
    pub transcript: Vec<TranscriptSegment>,
    pub source: TranscriptSource,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptBody {
    pub transcript: Vec<TranscriptSegment>,
}

#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub transcript: Vec<TranscriptSegment>,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_target_lang() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub chapters: Vec<Chapter>,
    pub key_notes: Vec<KeyNote>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub translated_transcript: Vec<TranscriptSegment>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: BTreeMap<&'static str, &'static str>,
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "tube-lens",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn supported_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: languages::supported_languages(),
    })
}

fn non_empty(transcript: Vec<TranscriptSegment>) -> Result<Vec<TranscriptSegment>, Error> {
    if transcript.is_empty() {
        return Err(Error::EmptyTranscript);
    }
    Ok(transcript)
}

impl<C, A, T, G, F> AppState<C, A, T, G, F>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    G: Generator + Send + Sync + 'static,
    F: TranslatorFactory + Send + Sync + 'static,
{
    pub async fn transcript(
        State(state): State<Self>,
        payload: Result<Json<TranscriptRequest>, JsonRejection>,
    ) -> AppResult<Json<TranscriptResponse>> {
        let Json(request) = payload?;
        let video_id = VideoId::parse(&request.video_url)?;
        tracing::info!(%video_id, "Transcript request");

        let result = state.acquirer.acquire(&video_id).await;

        Ok(Json(TranscriptResponse {
            video_id,
            transcript: result.segments,
            source: result.source,
            success: result.success,
            error: result.error,
        }))
    }

    pub async fn summary(
        State(state): State<Self>,
        payload: Result<Json<TranscriptBody>, JsonRejection>,
    ) -> AppResult<Json<SummaryResponse>> {
        let Json(request) = payload?;
        let transcript = non_empty(request.transcript)?;
        tracing::info!(segments = transcript.len(), "Summary request");

        let summary = state.analyzer.summarize(&transcript).await?;

        Ok(Json(SummaryResponse {
            summary,
            success: true,
        }))
    }

    pub async fn analyze(
        State(state): State<Self>,
        payload: Result<Json<TranscriptBody>, JsonRejection>,
    ) -> AppResult<Json<AnalysisResponse>> {
        let Json(request) = payload?;
        let transcript = non_empty(request.transcript)?;
        tracing::info!(segments = transcript.len(), "Analysis request");

        let analysis = state.analyzer.analyze(&transcript).await?;

        Ok(Json(AnalysisResponse {
            chapters: analysis.chapters,
            key_notes: analysis.key_notes,
            success: true,
        }))
    }

    pub async fn translate(
        State(state): State<Self>,
        payload: Result<Json<TranslationRequest>, JsonRejection>,
    ) -> AppResult<Json<TranslationResponse>> {
        let Json(request) = payload?;
        let transcript = non_empty(request.transcript)?;
        tracing::info!(
            segments = transcript.len(),
            target_lang = %request.target_lang,
            "Translation request"
        );

        let translated_transcript = state
            .translator
            .translate(&transcript, &request.target_lang)
            .await?;

        Ok(Json(TranslationResponse {
            translated_transcript,
            success: true,
        }))
    }
}
