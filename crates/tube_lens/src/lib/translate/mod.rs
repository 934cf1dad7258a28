pub mod google;
pub mod languages;

use std::{future::Future, time::Duration};

use crate::{error::Error, types::TranscriptSegment};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Translation API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected translation response: {0}")]
    InvalidResponse(String),
    #[error("Expected {expected} translations, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// A translation client. One call translates a whole batch of texts.
pub trait Translate {
    fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> impl Future<Output = Result<Vec<String>, TranslateError>> + Send;
}

/// Builds fresh translation clients. A client that failed a call is thrown
/// away and replaced before the next attempt.
pub trait TranslatorFactory {
    type Client: Translate + Send + Sync;

    fn create(&self) -> Self::Client;
}

#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub batch_size: usize,
    pub max_attempts: usize,
    pub retry_backoff: Duration,
    /// Pause between consecutive batches to stay under upstream rate limits
    pub batch_pause: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            batch_size: 15,
            max_attempts: 3,
            retry_backoff: Duration::from_secs(1),
            batch_pause: Duration::from_millis(500),
        }
    }
}

pub struct SegmentTranslator<F> {
    factory: F,
    config: TranslationConfig,
}

impl<F> SegmentTranslator<F>
where
    F: TranslatorFactory + Send + Sync + 'static,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            config: TranslationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TranslationConfig) -> Self {
        self.config = config;
        self
    }

    /// Translates `segments` into `target_lang`, batch by batch.
    ///
    /// The output has the same length, order, `start` and `duration` as the
    /// input. A batch that keeps failing keeps its original text. `original`
    /// always holds the first-ever source text, so repeated passes never
    /// overwrite it.
    #[tracing::instrument(skip(self, segments), fields(segments = segments.len()))]
    pub async fn translate(
        &self,
        segments: &[TranscriptSegment],
        target_lang: &str,
    ) -> Result<Vec<TranscriptSegment>, Error> {
        let target_lang = target_lang.trim().to_ascii_lowercase();
        if !languages::is_supported(&target_lang) {
            return Err(Error::UnsupportedLanguage(target_lang));
        }

        let batch_size = self.config.batch_size.max(1);
        let total_batches = segments.len().div_ceil(batch_size);
        let mut client = self.factory.create();
        let mut translated = Vec::with_capacity(segments.len());

        for (batch_idx, batch) in segments.chunks(batch_size).enumerate() {
            let texts = batch.iter().map(|s| s.text.clone()).collect::<Vec<_>>();
            let translated_texts = self
                .translate_with_retry(&mut client, texts, &target_lang, batch_idx)
                .await;

            translated.extend(batch.iter().zip(translated_texts).map(|(segment, text)| {
                TranscriptSegment {
                    text,
                    start: segment.start,
                    duration: segment.duration,
                    original: Some(
                        segment
                            .original
                            .clone()
                            .unwrap_or_else(|| segment.text.clone()),
                    ),
                }
            }));

            tracing::info!(
                progress = translated.len(),
                total = segments.len(),
                "Translation progress"
            );

            if batch_idx + 1 < total_batches {
                tokio::time::sleep(self.config.batch_pause).await;
            }
        }

        tracing::info!(count = translated.len(), lang = %target_lang, "Translation complete");
        Ok(translated)
    }

    /// Returns the translated texts, or `texts` unchanged once every attempt
    /// has failed.
    async fn translate_with_retry(
        &self,
        client: &mut F::Client,
        texts: Vec<String>,
        target_lang: &str,
        batch_idx: usize,
    ) -> Vec<String> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let error = match client.translate_batch(&texts, target_lang).await {
                Ok(translated) if translated.len() == texts.len() => return translated,
                Ok(translated) => TranslateError::CountMismatch {
                    expected: texts.len(),
                    actual: translated.len(),
                },
                Err(e) => e,
            };

            if attempt < max_attempts {
                tracing::warn!(
                    error = %error,
                    batch = batch_idx,
                    attempt,
                    max_attempts,
                    "Translation error, retrying"
                );
                tokio::time::sleep(self.config.retry_backoff).await;
                *client = self.factory.create();
            } else {
                tracing::error!(
                    error = %error,
                    batch = batch_idx,
                    "Translation failed after all attempts, keeping original text"
                );
            }
        }

        texts
    }
}
