use std::sync::Arc;

use crate::{
    analyzer::ContentAnalyzer,
    translate::{SegmentTranslator, TranslatorFactory},
    yt::{AudioHandler, CaptionSource},
    Generator, TranscriptAcquirer, Transcriber,
};

/// Components shared by every request, constructed once at startup.
///
/// None of them hold per-request mutable state, so clones share the same
/// instances through `Arc`.
pub struct AppState<C, A, T, G, F>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    G: Generator + Send + Sync + 'static,
    F: TranslatorFactory + Send + Sync + 'static,
{
    pub acquirer: Arc<TranscriptAcquirer<C, A, T>>,
    pub analyzer: Arc<ContentAnalyzer<G>>,
    pub translator: Arc<SegmentTranslator<F>>,
}

impl<C, A, T, G, F> AppState<C, A, T, G, F>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    G: Generator + Send + Sync + 'static,
    F: TranslatorFactory + Send + Sync + 'static,
{
    pub fn new(
        acquirer: TranscriptAcquirer<C, A, T>,
        analyzer: ContentAnalyzer<G>,
        translator: SegmentTranslator<F>,
    ) -> Self {
        Self {
            acquirer: Arc::new(acquirer),
            analyzer: Arc::new(analyzer),
            translator: Arc::new(translator),
        }
    }
}

// derive(Clone) would require every component type to be Clone
impl<C, A, T, G, F> Clone for AppState<C, A, T, G, F>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    G: Generator + Send + Sync + 'static,
    F: TranslatorFactory + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            acquirer: Arc::clone(&self.acquirer),
            analyzer: Arc::clone(&self.analyzer),
            translator: Arc::clone(&self.translator),
        }
    }
}
