pub mod generator;
pub mod openai;
pub mod transcriber;
#[cfg(feature = "whisper")]
pub mod whisper;
