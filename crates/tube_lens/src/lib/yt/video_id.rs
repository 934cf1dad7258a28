use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::error::Error;

static WATCH_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/watch\?(?:[^#]*?&)??v=([A-Za-z0-9_-]{11})").unwrap()
});

static SHORT_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap());

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]{11})$").unwrap());

/// Canonical 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";

    /// Extracts a video id from a watch URL, a short URL or a bare id, in that
    /// order. The first pattern that matches wins.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let candidate = input.trim();

        [&*WATCH_URL_RE, &*SHORT_URL_RE, &*BARE_ID_RE]
            .iter()
            .find_map(|re| re.captures(candidate).and_then(|cap| cap.get(1)))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or_else(|| Error::InvalidIdentifier(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}", Self::WATCH_BASE_URL, self.0)
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoId::parse(s)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
