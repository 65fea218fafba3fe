//! HTTP client for the public Google Translate endpoint (`client=gtx`).
//!
//! The endpoint answers with nested arrays:
//! `[[["translated segment", "source segment", ...], ...], null, "en", ...]`.
//! Long inputs are split into several segments; the translation is the
//! concatenation of every segment's first element.

use futures_util::future::{BoxFuture, FutureExt};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{RemoteTranslator, TranslateError};
use crate::config::TranslationConfig;

pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslateClient {
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TranslateError::Request)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
        })
    }

    async fn request(&self, text: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(TranslateError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(TranslateError::Request)?;
        let translated = parse_segments(&body)?;
        debug!("remote translation: '{}' -> '{}'", text, translated);
        Ok(translated)
    }
}

impl RemoteTranslator for GoogleTranslateClient {
    fn translate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, TranslateError>> {
        self.request(text).boxed()
    }
}

fn parse_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }

    if out.trim().is_empty() {
        return Err(TranslateError::Empty);
    }
    Ok(out)
}
