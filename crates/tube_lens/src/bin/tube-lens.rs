use clap::Parser;
use tube_lens::{
    analyzer::ContentAnalyzer,
    config::{Config, SttBackend},
    openai::OpenAIClient,
    server::{self, AppState},
    tracing::init_tracing_subscriber,
    translate::{google::GoogleTranslatorFactory, SegmentTranslator},
    yt::{
        audio_handler::{AudioFormat, YtDlp},
        captions::TranscriptApiCaptions,
    },
    Transcriber, TranscriptAcquirerBuilder,
};

async fn serve<T>(config: &Config, transcriber: T, format: AudioFormat) -> anyhow::Result<()>
where
    T: Transcriber + Send + Sync + 'static,
{
    let audio_handler = YtDlp::new(format)
        .with_binary(&config.ytdlp_path)
        .with_cookies(config.ytdlp_cookies_path.clone());

    let captions = TranscriptApiCaptions::new()?;

    let mut builder = TranscriptAcquirerBuilder::new(&config.temp_dir)
        .captions(captions)
        .audio_handler(audio_handler)
        .transcriber(transcriber);
    if config.stt_backend == SttBackend::Openai {
        builder = builder.with_chunking(config.chunk_duration);
    }

    let generator = OpenAIClient::new(&config.gemini_api_key)
        .with_base_url(&config.llm_base_url)
        .with_completion_model(&config.llm_model);

    let state = AppState::new(
        builder.build(),
        ContentAnalyzer::new(generator),
        SegmentTranslator::new(GoogleTranslatorFactory::default()),
    );

    let cors = server::build_cors_layer(&config.cors_origins)?;
    let app = server::router(state, cors);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, origins = ?config.cors_origins, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(feature = "whisper")]
async fn serve_local(config: &Config) -> anyhow::Result<()> {
    let model_path = config.whisper_model_path();
    tracing::info!(model = %model_path.display(), "Using local speech-to-text");

    let transcriber = tube_lens::whisper::WhisperTranscriber::new(model_path);
    serve(config, transcriber, AudioFormat::Wav16kMono).await
}

#[cfg(not(feature = "whisper"))]
async fn serve_local(_config: &Config) -> anyhow::Result<()> {
    anyhow::bail!("STT_BACKEND=local needs the `whisper` feature, use STT_BACKEND=openai instead")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let config = Config::parse();
    init_tracing_subscriber()?;

    tokio::fs::create_dir_all(&config.temp_dir).await?;

    match config.stt_backend {
        SttBackend::Local => serve_local(&config).await,
        SttBackend::Openai => {
            tracing::info!("Using remote speech-to-text");
            let transcriber = OpenAIClient::new(config.require_openai_api_key()?)
                .with_ffmpeg(&config.ffmpeg_path);
            serve(&config, transcriber, AudioFormat::Mp3).await
        }
    }
}
