pub mod envelope;
pub mod fault;
pub mod xml;

pub use envelope::{extract_payload, write_envelope};
pub use fault::{FaultCode, SoapFault};
pub use xml::XmlElement;

/// SOAP 1.1 envelope namespace
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the translation payload elements
pub const TRANSLATOR_NAMESPACE_URI: &str = "http://translator/web/ws/schema";

pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
