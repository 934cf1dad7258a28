use serde_json::Value;

use crate::{
    error::Error,
    types::{Analysis, Chapter, KeyNote, TranscriptSegment},
    Generator,
};

/// Summaries and chapter/notes breakdowns of a transcript.
pub struct ContentAnalyzer<G> {
    generator: G,
}

impl<G> ContentAnalyzer<G>
where
    G: Generator + Send + Sync + 'static,
{
    const SUMMARY_PROMPT: &str = include_str!("./llm/prompts/summary.txt");
    const ANALYSIS_PROMPT: &str = include_str!("./llm/prompts/analysis.txt");

    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Returns the model's prose summary, trimmed but otherwise unchecked.
    #[tracing::instrument(skip_all, fields(segments = segments.len()))]
    pub async fn summarize(&self, segments: &[TranscriptSegment]) -> Result<String, Error> {
        let document = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!("Generating summary");
        let summary = self
            .generator
            .generate(Self::SUMMARY_PROMPT, document)
            .await
            .map_err(|e| Error::Generation(e.to_string()))?
            .trim()
            .to_string();

        tracing::info!(chars = summary.len(), "Summary generated");
        Ok(summary)
    }

    /// Asks the model for chapters and key notes.
    ///
    /// Malformed model output yields [`fallback_analysis`]; a failing model
    /// call is returned as an error.
    #[tracing::instrument(skip_all, fields(segments = segments.len()))]
    pub async fn analyze(&self, segments: &[TranscriptSegment]) -> Result<Analysis, Error> {
        let document = segments
            .iter()
            .map(|s| format!("[{}] {}", format_timestamp(s.start), s.text))
            .collect::<Vec<_>>()
            .join("\n");

        tracing::info!("Generating analysis");
        let response = self
            .generator
            .generate(Self::ANALYSIS_PROMPT, document)
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let analysis = parse_analysis(&response);
        tracing::info!(
            chapters = analysis.chapters.len(),
            key_notes = analysis.key_notes.len(),
            "Analysis generated"
        );
        Ok(analysis)
    }
}

/// Parses a model response into an [`Analysis`], falling back to
/// [`fallback_analysis`] when it is not the expected JSON document.
pub fn parse_analysis(response: &str) -> Analysis {
    let payload = strip_code_fence(response);

    let value = match serde_json::from_str::<Value>(payload) {
        Ok(value) => value,
        Err(e) => {
            let preview = payload.chars().take(500).collect::<String>();
            tracing::error!(error = %e, response = %preview, "Failed to parse analysis JSON");
            return fallback_analysis();
        }
    };

    if value.get("chapters").is_none() || value.get("key_notes").is_none() {
        tracing::error!("Analysis JSON is missing `chapters` or `key_notes`");
        return fallback_analysis();
    }

    serde_json::from_value::<Analysis>(value)
        .inspect_err(|e| tracing::error!(error = %e, "Invalid analysis structure"))
        .unwrap_or_else(|_| fallback_analysis())
}

/// Removes a surrounding markdown code fence (with or without a language tag).
///
/// The model sometimes wraps its JSON in one despite being told not to.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub fn fallback_analysis() -> Analysis {
    Analysis {
        chapters: vec![Chapter {
            timestamp: "0:00".into(),
            title: "Full Video".into(),
        }],
        key_notes: vec![KeyNote {
            time: "0:00".into(),
            note: "Analysis unavailable".into(),
        }],
    }
}

/// Formats seconds as `M:SS`, or `H:MM:SS` from one hour on.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
