use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::soap::{extract_payload, write_envelope, XmlElement};

/// Routing key of an inbound message: the payload root's qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadRoot {
    pub namespace: String,
    pub local_part: String,
}

impl PayloadRoot {
    pub fn new(namespace: &str, local_part: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local_part: local_part.to_string(),
        }
    }

    pub fn of(element: &XmlElement) -> Self {
        Self {
            namespace: element.namespace.clone().unwrap_or_default(),
            local_part: element.local_name.clone(),
        }
    }
}

impl fmt::Display for PayloadRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local_part)
    }
}

/// Handler for one payload root
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Turn a request payload into a response payload.
    async fn invoke(&self, payload: &XmlElement) -> Result<XmlElement, ServiceError>;
}

/// Routes SOAP messages to the endpoint registered for their payload root.
#[derive(Clone, Default)]
pub struct MessageDispatcher {
    mappings: HashMap<PayloadRoot, Arc<dyn Endpoint>>,
}

impl MessageDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, root: PayloadRoot, endpoint: Arc<dyn Endpoint>) -> Self {
        info!("Mapped endpoint for {}", root);
        self.mappings.insert(root, endpoint);
        self
    }

    /// Handle one raw SOAP request and produce the serialized response
    /// envelope.
    pub async fn dispatch(&self, message: &[u8]) -> Result<String, ServiceError> {
        let message = String::from_utf8(message.to_vec())?;
        let payload = extract_payload(&message)?;
        let root = PayloadRoot::of(&payload);

        let endpoint = self
            .mappings
            .get(&root)
            .ok_or_else(|| ServiceError::NoEndpoint(root.clone()))?;

        let span = info_span!("soap_message", message_id = %Uuid::new_v4(), payload_root = %root);
        async move {
            debug!("Invoking endpoint");
            let response = endpoint.invoke(&payload).await?;
            debug!("Endpoint returned {}", response.expanded_name());
            write_envelope(&response)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::SOAP_ENV_NS;

    struct EchoEndpoint;

    #[async_trait]
    impl Endpoint for EchoEndpoint {
        async fn invoke(&self, payload: &XmlElement) -> Result<XmlElement, ServiceError> {
            Ok(XmlElement::new(payload.namespace.as_deref(), "Echo").with_text(payload.text.as_str()))
        }
    }

    fn envelope(payload: &str) -> String {
        format!(
            r#"<s:Envelope xmlns:s="{}"><s:Body>{}</s:Body></s:Envelope>"#,
            SOAP_ENV_NS, payload
        )
    }

    fn dispatcher() -> MessageDispatcher {
        MessageDispatcher::new().register(PayloadRoot::new("urn:echo", "Ping"), Arc::new(EchoEndpoint))
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_payload_root() {
        let response = dispatcher()
            .dispatch(envelope(r#"<Ping xmlns="urn:echo">hi</Ping>"#).as_bytes())
            .await
            .unwrap();

        let payload = extract_payload(&response).unwrap();
        assert!(payload.is("urn:echo", "Echo"));
        assert_eq!(payload.text, "hi");
    }

    #[tokio::test]
    async fn test_dispatch_requires_matching_namespace() {
        let result = dispatcher()
            .dispatch(envelope(r#"<Ping xmlns="urn:other">hi</Ping>"#).as_bytes())
            .await;

        match result {
            Err(ServiceError::NoEndpoint(root)) => {
                assert_eq!(root.to_string(), "{urn:other}Ping");
            }
            other => panic!("expected NoEndpoint, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_rejects_invalid_utf8() {
        let result = dispatcher().dispatch(&[0x3c, 0xff, 0xfe]).await;
        assert!(matches!(result, Err(ServiceError::Encoding(_))));
    }
}
