use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::xml::{self, XmlElement};
use super::SOAP_ENV_NS;
use crate::error::ServiceError;

/// Parse a SOAP 1.1 message and return the payload root, the first element
/// inside `Body`.
pub fn extract_payload(message: &str) -> Result<XmlElement, ServiceError> {
    let envelope = xml::parse(message)?;
    if !envelope.is(SOAP_ENV_NS, "Envelope") {
        return Err(ServiceError::Malformed(format!(
            "expected a SOAP 1.1 Envelope, found {}",
            envelope.expanded_name()
        )));
    }

    let body = envelope
        .children
        .into_iter()
        .find(|child| child.is(SOAP_ENV_NS, "Body"))
        .ok_or_else(|| ServiceError::Malformed("SOAP Envelope has no Body".to_string()))?;

    body.children
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Malformed("SOAP Body is empty".to_string()))
}

/// Wrap `payload` in a SOAP 1.1 envelope.
pub fn write_envelope(payload: &XmlElement) -> Result<String, ServiceError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("SOAP-ENV:Envelope").with_attributes([("xmlns:SOAP-ENV", SOAP_ENV_NS)]),
    ))?;
    writer.write_event(Event::Empty(BytesStart::new("SOAP-ENV:Header")))?;
    writer.write_event(Event::Start(BytesStart::new("SOAP-ENV:Body")))?;
    xml::write_element(&mut writer, payload, None)?;
    writer.write_event(Event::End(BytesEnd::new("SOAP-ENV:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("SOAP-ENV:Envelope")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::TRANSLATOR_NAMESPACE_URI;

    #[test]
    fn test_extract_payload_skips_header() {
        let message = format!(
            r#"<soapenv:Envelope xmlns:soapenv="{}" xmlns:tr="{}">
                <soapenv:Header><tr:ignored/></soapenv:Header>
                <soapenv:Body><tr:TranslationRequest/></soapenv:Body>
            </soapenv:Envelope>"#,
            SOAP_ENV_NS, TRANSLATOR_NAMESPACE_URI
        );
        let payload = extract_payload(&message).unwrap();
        assert!(payload.is(TRANSLATOR_NAMESPACE_URI, "TranslationRequest"));
    }

    #[test]
    fn test_extract_payload_requires_soap_envelope() {
        let wrong_ns = r#"<Envelope xmlns="urn:other"><Body><x/></Body></Envelope>"#;
        assert!(matches!(
            extract_payload(wrong_ns),
            Err(ServiceError::Malformed(_))
        ));

        let empty_body = format!(r#"<e:Envelope xmlns:e="{}"><e:Body/></e:Envelope>"#, SOAP_ENV_NS);
        assert!(matches!(
            extract_payload(&empty_body),
            Err(ServiceError::Malformed(_))
        ));
    }

    #[test]
    fn test_written_envelope_parses_back() {
        let payload = XmlElement::new(Some(TRANSLATOR_NAMESPACE_URI), "TranslationResponse")
            .with_child(XmlElement::new(Some(TRANSLATOR_NAMESPACE_URI), "translation").with_text("bonjour"));

        let message = write_envelope(&payload).unwrap();
        assert!(message.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(extract_payload(&message).unwrap(), payload);
    }
}
