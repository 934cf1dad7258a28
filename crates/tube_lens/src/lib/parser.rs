//! # Caption Parser
//!
//! Pure helpers around the official caption index: the language order tracks
//! are requested in, and normalisation of the returned snippets.

use std::sync::LazyLock;

use crate::{translate::languages::LANGUAGES, types::TranscriptSegment};

/// English variants asked for first.
pub const ENGLISH_CODES: &[&str] = &["en", "en-US", "en-GB", "en-CA", "en-AU", "en-IN"];

static ANY_LANGUAGE_CODES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut codes = ENGLISH_CODES.to_vec();
    codes.extend(
        LANGUAGES
            .iter()
            .map(|(code, _)| *code)
            .filter(|code| !ENGLISH_CODES.contains(code)),
    );
    codes
});

/// Every language the service knows, English first. Used once no English
/// track exists, so that whichever track is published gets picked.
pub fn any_language_codes() -> &'static [&'static str] {
    &ANY_LANGUAGE_CODES
}

/// Maps raw `(text, start, duration)` snippets to transcript segments.
///
/// Line breaks inside a snippet become spaces, blank snippets are dropped and
/// negative timings are clamped to zero.
pub fn normalize_snippets<I>(snippets: I) -> Vec<TranscriptSegment>
where
    I: IntoIterator<Item = (String, f64, f64)>,
{
    snippets
        .into_iter()
        .filter_map(|(text, start, duration)| {
            let text = text.replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(text, start.max(0.0), duration.max(0.0)))
        })
        .collect()
}
