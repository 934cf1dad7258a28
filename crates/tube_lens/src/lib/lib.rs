mod acquirer;
pub mod analyzer;
pub mod config;
mod error;
mod llm;
pub mod parser;
pub mod server;
pub mod tracing;
pub mod translate;
pub mod types;
pub mod yt;

#[cfg(feature = "whisper")]
pub use llm::whisper;
pub use llm::openai;
pub use llm::{
    generator::Generator,
    transcriber::{AudioInput, TranscribeResponse, TranscribeSegment, Transcriber},
};

pub use acquirer::{builder::TranscriptAcquirerBuilder, ScratchDir, TranscriptAcquirer};
pub use analyzer::ContentAnalyzer;
pub use error::Error;
pub use translate::SegmentTranslator;
