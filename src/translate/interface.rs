use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body sent to the remote translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub lang_from: String,
    pub lang_to: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// External translation lookup. Failure and timeout behaviour belong to the
/// implementation; callers surface any error unchanged.
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Translate `text` from `lang_from` to `lang_to`
    async fn translate(
        &self,
        lang_from: &str,
        lang_to: &str,
        text: &str,
    ) -> Result<String, anyhow::Error>;
}
