use std::sync::{Arc, Mutex};
use tube_lens::{AudioInput, TranscribeResponse, TranscribeSegment, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub segments: Vec<TranscribeSegment>,
    pub calls: Arc<Mutex<Vec<AudioInput>>>,
    /// Whether the audio file existed when `transcribe` was called
    pub saw_file: Arc<Mutex<Vec<bool>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriber {
    pub fn new(segments: &[(f64, f64, &str)]) -> Self {
        Self {
            segments: segments
                .iter()
                .map(|(start, end, text)| TranscribeSegment {
                    start: *start,
                    end: *end,
                    text: text.to_string(),
                })
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            saw_file: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new(&[])
        }
    }
}

impl Transcriber for MockTranscriber {
    const TRANSCRIBER_MODEL: &'static str = "mock-whisper";
    type Error = anyhow::Error;

    async fn transcribe(&self, audio_input: AudioInput) -> Result<TranscribeResponse, Self::Error> {
        self.saw_file
            .lock()
            .unwrap()
            .push(audio_input.file_path().exists());
        self.calls.lock().unwrap().push(audio_input);

        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(TranscribeResponse {
            duration: self.segments.last().map(|s| s.end).unwrap_or_default(),
            text: self
                .segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            segments: Some(self.segments.clone()),
        })
    }
}
