use serde::{Deserialize, Serialize};

/// One timed utterance of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
    /// Pre-translation text, only present on translated segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
            original: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSource {
    Official,
    Offline,
    Error,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Official => write!(f, "official"),
            TranscriptSource::Offline => write!(f, "offline"),
            TranscriptSource::Error => write!(f, "error"),
        }
    }
}

/// Outcome of a transcript acquisition. `success == false` always comes with
/// empty `segments` and a populated `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionResult {
    pub segments: Vec<TranscriptSegment>,
    pub source: TranscriptSource,
    pub success: bool,
    pub error: Option<String>,
}

impl AcquisitionResult {
    pub fn official(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            segments,
            source: TranscriptSource::Official,
            success: true,
            error: None,
        }
    }

    pub fn offline(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            segments,
            source: TranscriptSource::Offline,
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            source: TranscriptSource::Error,
            success: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub timestamp: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNote {
    pub time: String,
    pub note: String,
}

/// Structured breakdown of a video, in the order the model emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub chapters: Vec<Chapter>,
    pub key_notes: Vec<KeyNote>,
}
