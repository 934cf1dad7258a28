use std::time::Duration;

use futures::future::try_join_all;
use reqwest::Client;
use serde_json::Value;

use crate::translate::{Translate, TranslateError, TranslatorFactory};

/// Client for the public Google Translate `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub const BASE_URL: &str = "https://translate.googleapis.com";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: Self::BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn translate_one(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let resp = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TranslateError::Api { status, message });
        }

        let body = resp.json::<Value>().await?;
        parse_translation(&body)
    }
}

/// Joins the translated sentence fragments of a `translate_a/single` response.
pub fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidResponse(truncate(body)))?;

    let translated = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect::<String>();

    if translated.is_empty() {
        return Err(TranslateError::InvalidResponse(truncate(body)));
    }
    Ok(translated)
}

fn truncate(body: &Value) -> String {
    body.to_string().chars().take(200).collect()
}

impl Translate for GoogleTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        try_join_all(texts.iter().map(|text| self.translate_one(text, target_lang))).await
    }
}

#[derive(Debug, Clone)]
pub struct GoogleTranslatorFactory {
    base_url: String,
    timeout: Duration,
}

impl Default for GoogleTranslatorFactory {
    fn default() -> Self {
        Self {
            base_url: GoogleTranslator::BASE_URL.into(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl GoogleTranslatorFactory {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl TranslatorFactory for GoogleTranslatorFactory {
    type Client = GoogleTranslator;

    fn create(&self) -> Self::Client {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to build translation client, using defaults"))
            .unwrap_or_default();

        GoogleTranslator::new(client).with_base_url(&self.base_url)
    }
}
