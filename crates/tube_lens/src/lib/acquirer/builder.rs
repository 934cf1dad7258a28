use std::path::PathBuf;

use crate::{
    acquirer::{ChunkingConfig, TranscriptAcquirer},
    yt::{AudioHandler, CaptionSource},
    Transcriber,
};

pub struct TranscriptAcquirerBuilder<C = (), A = (), T = ()> {
    scratch_dir: PathBuf,
    captions: C,
    audio_handler: A,
    transcriber: T,
    chunking_config: Option<ChunkingConfig>,
}

impl TranscriptAcquirerBuilder {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            captions: (),
            audio_handler: (),
            transcriber: (),
            chunking_config: None,
        }
    }
}

impl<C, A, T> TranscriptAcquirerBuilder<C, A, T> {
    pub fn captions<C2: CaptionSource + Send + Sync + 'static>(
        self,
        captions: C2,
    ) -> TranscriptAcquirerBuilder<C2, A, T> {
        TranscriptAcquirerBuilder {
            scratch_dir: self.scratch_dir,
            captions,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            chunking_config: self.chunking_config,
        }
    }

    pub fn audio_handler<A2: AudioHandler + Send + Sync + 'static>(
        self,
        audio_handler: A2,
    ) -> TranscriptAcquirerBuilder<C, A2, T> {
        TranscriptAcquirerBuilder {
            scratch_dir: self.scratch_dir,
            captions: self.captions,
            audio_handler,
            transcriber: self.transcriber,
            chunking_config: self.chunking_config,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> TranscriptAcquirerBuilder<C, A, T2> {
        TranscriptAcquirerBuilder {
            scratch_dir: self.scratch_dir,
            captions: self.captions,
            audio_handler: self.audio_handler,
            transcriber,
            chunking_config: self.chunking_config,
        }
    }

    pub fn with_chunking(mut self, chunk_duration_seconds: u16) -> Self {
        self.chunking_config = Some(ChunkingConfig {
            chunk_duration_seconds,
        });
        self
    }
}

impl<C, A, T> TranscriptAcquirerBuilder<C, A, T>
where
    C: CaptionSource + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    pub fn build(self) -> TranscriptAcquirer<C, A, T> {
        TranscriptAcquirer {
            scratch_dir: self.scratch_dir,
            captions: self.captions,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            chunking_config: self.chunking_config,
        }
    }
}
