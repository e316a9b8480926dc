use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::interface::{TranslateRequest, TranslateResponse, TranslatorInterface};

/// Translator backed by a remote HTTP/JSON translation service
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TranslatorInterface for HttpTranslator {
    async fn translate(&self, lang_from: &str, lang_to: &str, text: &str) -> Result<String> {
        let url = format!("{}/translate", self.base_url);
        let request = TranslateRequest {
            lang_from: lang_from.to_string(),
            lang_to: lang_to.to_string(),
            text: text.to_string(),
        };

        debug!("Sending translation request: {} -> {}", lang_from, lang_to);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Translation service returned {}: {}", status, body);
        }

        let result: TranslateResponse = response.json().await?;
        Ok(result.translation)
    }
}
