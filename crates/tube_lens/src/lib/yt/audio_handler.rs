use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::Context;
use tokio::process::Command;

use crate::yt::{AudioHandler, VideoId};

/// Container the downloaded audio is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Compressed audio for remote speech-to-text uploads
    Mp3,
    /// 16 kHz mono PCM, the input the local decoder expects
    Wav16kMono,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav16kMono => "wav",
        }
    }
}

/// `yt-dlp` driven audio downloader.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_path: Option<PathBuf>,
    format: AudioFormat,
}

impl YtDlp {
    pub fn new(format: AudioFormat) -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            cookies_path: None,
            format,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_cookies(mut self, cookies_path: Option<PathBuf>) -> Self {
        self.cookies_path = cookies_path;
        self
    }

    fn build_args(&self, url: &str, output_template: &Path) -> Vec<String> {
        let mut args = vec![
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            self.format.extension().to_string(),
            "--no-playlist".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--output".to_string(),
            output_template.to_string_lossy().into_owned(),
        ];

        match self.format {
            AudioFormat::Mp3 => args.extend(["--audio-quality".to_string(), "192K".to_string()]),
            AudioFormat::Wav16kMono => args.extend([
                "--postprocessor-args".to_string(),
                "ExtractAudio:-ar 16000 -ac 1".to_string(),
            ]),
        }

        if let Some(cookies) = &self.cookies_path {
            args.extend(["--cookies".to_string(), cookies.to_string_lossy().into_owned()]);
        }

        args.push(url.to_string());
        args
    }
}

impl AudioHandler for YtDlp {
    const BASE_URL: &str = "https://www.youtube.com/watch";

    #[tracing::instrument(skip(self))]
    async fn download(&self, video_id: &VideoId, audio_dl_path: &Path) -> anyhow::Result<PathBuf> {
        let stream_url = format!("{}?v={}", Self::BASE_URL, video_id);

        let audio_output_template = audio_dl_path.join(format!("{video_id}.%(ext)s"));
        let audio_path = audio_dl_path.join(format!("{video_id}.{}", self.format.extension()));

        tokio::fs::create_dir_all(audio_dl_path)
            .await
            .with_context(|| format!("Failed to create {}", audio_dl_path.display()))?;

        tracing::info!("Downloading audio");
        let output = Command::new(&self.binary)
            .args(self.build_args(&stream_url, &audio_output_template))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to spawn yt-dlp"))
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = ?output.status.code(), error = %stderr.trim(), "yt-dlp failed");
            anyhow::bail!("Failed to download audio: {}", stderr.trim());
        }

        if !audio_path.exists() {
            anyhow::bail!(
                "yt-dlp did not produce expected file: {}",
                audio_path.display()
            );
        }

        tracing::info!(path = %audio_path.display(), "Audio downloaded");
        Ok(audio_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_args_downmix_for_local_decoder() {
        let yt_dlp = YtDlp::new(AudioFormat::Wav16kMono);
        let args = yt_dlp.build_args("https://www.youtube.com/watch?v=x", Path::new("/tmp/x.%(ext)s"));

        let joined = args.join(" ");
        assert!(joined.contains("--audio-format wav"));
        assert!(joined.contains("ExtractAudio:-ar 16000 -ac 1"));
        assert!(!joined.contains("--cookies"));
        assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=x");
    }

    #[test]
    fn test_mp3_args_forward_cookies() {
        let yt_dlp =
            YtDlp::new(AudioFormat::Mp3).with_cookies(Some(PathBuf::from("/etc/cookies.txt")));
        let args = yt_dlp.build_args("https://www.youtube.com/watch?v=x", Path::new("/tmp/x.%(ext)s"));

        let joined = args.join(" ");
        assert!(joined.contains("--audio-format mp3"));
        assert!(joined.contains("--cookies /etc/cookies.txt"));
        assert!(joined.contains("--format bestaudio/best"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let yt_dlp = YtDlp::new(AudioFormat::Mp3).with_binary("/nonexistent/yt-dlp");
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();

        let result = yt_dlp.download(&video_id, dir.path()).await;
        assert!(result.is_err());
    }
}
