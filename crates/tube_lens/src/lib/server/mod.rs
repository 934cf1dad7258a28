mod error;
mod handlers;
mod state;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};
pub use handlers::{
    AnalysisResponse, LanguagesResponse, SummaryResponse, TranscriptBody, TranscriptRequest,
    TranscriptResponse, TranslationRequest, TranslationResponse,
};
pub use state::AppState;

use crate::{
    translate::TranslatorFactory,
    yt::{AudioHandler, CaptionSource},
    Generator, Transcriber,
};

/// Builds the HTTP surface.
///
/// ```text
/// GET    /                 -> health
/// POST   /api/transcript   -> transcript
/// POST   /api/summary      -> summary
/// POST   /api/analyze      -> analyze
/// POST   /api/translate    -> translate
/// GET    /api/languages    -> supported_languages
/// ```
pub fn router<C, A, T, G, F>(state: AppState<C, A, T, G, F>, cors: CorsLayer) -> Router
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    G: Generator + Send + Sync + 'static,
    F: TranslatorFactory + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::health))
        .route("/api/transcript", post(AppState::<C, A, T, G, F>::transcript))
        .route("/api/summary", post(AppState::<C, A, T, G, F>::summary))
        .route("/api/analyze", post(AppState::<C, A, T, G, F>::analyze))
        .route("/api/translate", post(AppState::<C, A, T, G, F>::translate))
        .route("/api/languages", get(handlers::supported_languages))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured browser origins, with credentials allowed and the
/// requested method and headers mirrored back.
pub fn build_cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins_are_validated() {
        assert!(build_cors_layer(&["http://localhost:3000".into(), " ".into()]).is_ok());
        assert!(build_cors_layer(&["http://bad\norigin".into()]).is_err());
    }
}
