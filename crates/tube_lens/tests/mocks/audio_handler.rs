use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tube_lens::yt::{AudioHandler, VideoId};

/// Writes a small placeholder file into the scratch directory, the way a real
/// download would, and records where it went.
#[derive(Clone)]
pub struct MockAudioHandler {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub downloads: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl Default for MockAudioHandler {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockAudioHandler {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl AudioHandler for MockAudioHandler {
    const BASE_URL: &'static str = "https://www.youtube.com/watch?v=";

    async fn download(&self, video_id: &VideoId, audio_dl_path: &Path) -> anyhow::Result<PathBuf> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let path = audio_dl_path.join(format!("{video_id}.wav"));
        tokio::fs::write(&path, b"RIFF....WAVEfmt ").await?;
        self.downloads.lock().unwrap().push(path.clone());
        Ok(path)
    }
}
