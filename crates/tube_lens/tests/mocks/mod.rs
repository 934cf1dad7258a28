#![allow(dead_code)]

pub mod audio_handler;
pub mod caption_source;
pub mod generator;
pub mod transcriber;
pub mod translator;
