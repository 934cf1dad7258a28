use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Deserialize;
use tokio::process::Command;

use crate::{AudioInput, Generator, TranscribeResponse, Transcriber};

/// Client for OpenAI-compatible REST APIs (OpenAI itself, or the Gemini
/// compatibility endpoint).
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    completion_model: String,
    ffmpeg: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
}

impl OpenAIClient {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::OPENAI_BASE_URL.into(),
            completion_model: "gpt-4o-mini".into(),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }

    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    pub async fn send_transcribe_request(
        &self,
        file: impl Into<PathBuf>,
        model_name: impl Into<String>,
        prompt: Option<String>,
    ) -> Result<TranscribeResponse, OpenAIError> {
        let audio_path = file.into();

        let bytes = tokio::fs::read(&audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("chunk.mp3")
            .mime_str("audio/mpeg")?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", model_name.into())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .part("file", part);

        if let Some(prompt) = prompt {
            form = form.text("prompt", prompt);
        }

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<TranscribeResponse>().await?)
    }

    pub async fn send_completion_request(
        &self,
        system_prompt: &str,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": self.completion_model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }

    /// Splits `file_path` into fixed-length mp3 chunks named `<stem>_%03d.mp3`.
    async fn split_audio_to_chunks(
        &self,
        file_path: &Path,
        chunk_duration_seconds: u16,
        chunks_dir_path: &Path,
    ) -> Result<(), OpenAIError> {
        let base_name = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| OpenAIError::Ffmpeg("Invalid file path".into()))?;
        let pattern = chunks_dir_path.join(format!("{base_name}_%03d.mp3"));

        let output = Command::new(&self.ffmpeg)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(file_path)
            .args(["-f", "segment", "-segment_time"])
            .arg(chunk_duration_seconds.to_string())
            .args(["-c:a", "libmp3lame", "-b:a", "64k"])
            .arg(pattern)
            .output()
            .await?;

        if !output.status.success() {
            return Err(OpenAIError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl Transcriber for OpenAIClient {
    const TRANSCRIBER_MODEL: &'static str = "whisper-1";
    type Error = OpenAIError;

    async fn transcribe(&self, input: AudioInput) -> Result<TranscribeResponse, Self::Error> {
        let (file_path, chunks_dir_path, chunk_duration_seconds) = match input {
            AudioInput::File(file_path) => {
                return self
                    .send_transcribe_request(file_path, Self::TRANSCRIBER_MODEL, None)
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"));
            }
            AudioInput::Chunked {
                file_path,
                chunks_dir_path,
                chunk_duration_seconds,
            } => (file_path, chunks_dir_path, chunk_duration_seconds),
        };

        tokio::fs::create_dir_all(&chunks_dir_path).await?;

        tracing::info!("Splitting audio to chunks");
        self.split_audio_to_chunks(&file_path, chunk_duration_seconds, &chunks_dir_path)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to split audio to chunks"))?;

        // collect and sort chunk files
        let mut chunks: Vec<PathBuf> = std::fs::read_dir(&chunks_dir_path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        chunks.sort();

        let mut all_segments = Vec::new();
        let mut all_text = String::new();
        let mut time_offset = 0.0_f64;
        let mut duration = 0.0_f64;
        let mut previous_text = None;

        for chunk in &chunks {
            let response = self
                .send_transcribe_request(chunk, Self::TRANSCRIBER_MODEL, previous_text)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))?;

            duration += response.duration;

            if let Some(segments) = response.segments {
                for mut seg in segments {
                    seg.start += time_offset;
                    seg.end += time_offset;
                    all_segments.push(seg);
                }
            }

            all_text.push_str(&response.text);
            all_text.push(' ');
            previous_text = Some(response.text);
            time_offset += chunk_duration_seconds as f64;
        }

        Ok(TranscribeResponse {
            duration,
            text: all_text.trim().to_string(),
            segments: Some(all_segments),
        })
    }
}

impl Generator for OpenAIClient {
    type Error = OpenAIError;

    async fn generate(&self, instructions: &str, content: String) -> Result<String, Self::Error> {
        let response = self
            .send_completion_request(instructions, content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate content"))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api {
                status: 0,
                message: "No content in response".into(),
            })
    }
}
