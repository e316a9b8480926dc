use std::fmt;

use super::xml::XmlElement;
use super::SOAP_ENV_NS;

/// SOAP 1.1 fault code. `Client` means the message itself was at fault,
/// `Server` means processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    Client,
    Server,
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultCode::Client => write!(f, "SOAP-ENV:Client"),
            FaultCode::Server => write!(f, "SOAP-ENV:Server"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: FaultCode,
    pub message: String,
    pub detail: Vec<String>,
}

impl SoapFault {
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Client,
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Server,
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: Vec<String>) -> Self {
        self.detail = detail;
        self
    }

    /// The `Fault` body element. Its children are unqualified, and
    /// `faultcode` relies on the `SOAP-ENV` prefix bound by the envelope.
    pub fn to_element(&self) -> XmlElement {
        let mut fault = XmlElement::new(Some(SOAP_ENV_NS), "Fault")
            .with_child(XmlElement::new(None, "faultcode").with_text(self.code.to_string()))
            .with_child(XmlElement::new(None, "faultstring").with_text(self.message.as_str()));

        if !self.detail.is_empty() {
            let detail = self.detail.iter().fold(XmlElement::new(None, "detail"), |d, entry| {
                d.with_child(XmlElement::new(None, "ValidationError").with_text(entry.as_str()))
            });
            fault = fault.with_child(detail);
        }
        fault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::{extract_payload, write_envelope};

    #[test]
    fn test_fault_envelope_shape() {
        let fault = SoapFault::client("Validation error")
            .with_detail(vec!["missing langTo".to_string()]);

        let message = write_envelope(&fault.to_element()).unwrap();
        let body = extract_payload(&message).unwrap();

        assert!(body.is(SOAP_ENV_NS, "Fault"));
        assert_eq!(body.children[0].local_name, "faultcode");
        assert_eq!(body.children[0].text, "SOAP-ENV:Client");
        assert_eq!(body.children[1].text, "Validation error");
        assert_eq!(body.children[2].children[0].text, "missing langTo");
    }

    #[test]
    fn test_server_fault_has_no_detail() {
        let element = SoapFault::server("boom").to_element();
        assert_eq!(element.children.len(), 2);
        assert_eq!(element.children[0].text, "SOAP-ENV:Server");
    }
}
