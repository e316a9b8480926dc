use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::payload::{TranslationRequest, TranslationResponse};
use crate::dispatcher::{Endpoint, PayloadRoot};
use crate::error::ServiceError;
use crate::soap::XmlElement;
use crate::translate::TranslatorInterface;

/// Endpoint reached for `{namespace}TranslationRequest`
pub struct TranslatorEndpoint {
    translator: Arc<dyn TranslatorInterface>,
    namespace: String,
}

impl TranslatorEndpoint {
    pub fn new(translator: Arc<dyn TranslatorInterface>, namespace: &str) -> Self {
        Self {
            translator,
            namespace: namespace.to_string(),
        }
    }

    pub fn payload_root(&self) -> PayloadRoot {
        PayloadRoot::new(&self.namespace, TranslationRequest::ELEMENT)
    }

    /// Translate `request.text` and hand the result back as-is.
    pub async fn translation(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, ServiceError> {
        debug!("Translating {} -> {}", request.lang_from, request.lang_to);
        let translation = self
            .translator
            .translate(&request.lang_from, &request.lang_to, &request.text)
            .await
            .map_err(ServiceError::Translation)?;

        Ok(TranslationResponse { translation })
    }
}

#[async_trait]
impl Endpoint for TranslatorEndpoint {
    async fn invoke(&self, payload: &XmlElement) -> Result<XmlElement, ServiceError> {
        let request = TranslationRequest::from_payload(payload, &self.namespace)?;
        Ok(self.translation(request).await?.into_payload(&self.namespace))
    }
}
