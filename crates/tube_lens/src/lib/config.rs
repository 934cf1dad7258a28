use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::openai::OpenAIClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SttBackend {
    /// whisper.cpp on this machine
    Local,
    /// OpenAI `audio/transcriptions`
    Openai,
}

impl Default for SttBackend {
    /// Local decoding when the crate is built with `whisper`
    fn default() -> Self {
        if cfg!(feature = "whisper") {
            SttBackend::Local
        } else {
            SttBackend::Openai
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn ggml_file_name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tube-lens",
    version,
    about = "Transcripts, summaries, chapters and translations for YouTube videos"
)]
pub struct Config {
    /// API key for the generative model
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// OpenAI-compatible base URL of the generative model
    #[arg(long, env = "LLM_BASE_URL", default_value = OpenAIClient::GEMINI_BASE_URL)]
    pub llm_base_url: String,

    #[arg(long, env = "LLM_MODEL", default_value = "gemini-2.0-flash")]
    pub llm_model: String,

    /// Comma separated list of allowed browser origins
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Root for per-request scratch audio
    #[arg(long, env = "TEMP_DIR", default_value = "./temp_audio")]
    pub temp_dir: PathBuf,

    #[arg(long, env = "STT_BACKEND", value_enum, default_value_t = SttBackend::default())]
    pub stt_backend: SttBackend,

    #[arg(long, env = "WHISPER_MODEL", value_enum, default_value_t = ModelSize::Base)]
    pub whisper_model: ModelSize,

    #[arg(long, env = "WHISPER_MODELS_DIR", default_value = "./models")]
    pub whisper_models_dir: PathBuf,

    /// Required when `--stt-backend openai`
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Audio chunk duration in seconds for remote transcription
    #[arg(long, default_value = "900")]
    pub chunk_duration: u16,

    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp")]
    pub ytdlp_path: PathBuf,

    /// Path to yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    pub ytdlp_cookies_path: Option<PathBuf>,

    #[arg(long, env = "FFMPEG_PATH", default_value = "ffmpeg")]
    pub ffmpeg_path: PathBuf,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn whisper_model_path(&self) -> PathBuf {
        self.whisper_models_dir
            .join(self.whisper_model.ggml_file_name())
    }

    pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("OPENAI_API_KEY must be set when STT_BACKEND=openai")
    }
}
