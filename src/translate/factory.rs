use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use super::client::HttpTranslator;
use super::interface::TranslatorInterface;
use crate::config::TranslatorConfig;

/// Factory for creating the translation collaborator
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator based on configuration
    pub fn create_translator(config: &TranslatorConfig) -> Result<Arc<dyn TranslatorInterface>> {
        info!("Initializing translator: {}", config.translator_model);

        match config.translator_model.as_str() {
            "http_translator" => {
                reqwest::Url::parse(&config.base_url).with_context(|| {
                    format!("Invalid translator_config.base_url '{}'", config.base_url)
                })?;
                let timeout = config.timeout_secs.map(Duration::from_secs);
                Ok(Arc::new(HttpTranslator::new(config.base_url.clone(), timeout)?))
            }
            other => anyhow::bail!("Unknown translator model: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, base_url: &str) -> TranslatorConfig {
        TranslatorConfig {
            translator_model: model.to_string(),
            base_url: base_url.to_string(),
            timeout_secs: Some(3),
        }
    }

    #[test]
    fn test_creates_http_translator() {
        assert!(TranslatorFactory::create_translator(&config("http_translator", "http://localhost:9000")).is_ok());
    }

    #[test]
    fn test_rejects_unknown_model_and_missing_url() {
        assert!(TranslatorFactory::create_translator(&config("babelfish", "http://x")).is_err());
        assert!(TranslatorFactory::create_translator(&config("http_translator", "")).is_err());
        assert!(TranslatorFactory::create_translator(&config("http_translator", "${TRANSLATOR_URL}")).is_err());
    }
}
