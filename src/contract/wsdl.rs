use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::Writer;

use super::schema::XsdSchema;
use crate::error::ServiceError;

const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
const WSDL_SOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

const REQUEST_SUFFIX: &str = "Request";
const RESPONSE_SUFFIX: &str = "Response";
const FAULT_SUFFIX: &str = "Fault";

/// WSDL 1.1 definition derived from a schema: messages come from elements
/// named `*Request`, `*Response` or `*Fault`, and each request element
/// becomes one document/literal operation.
#[derive(Debug, Clone)]
pub struct Wsdl11Definition {
    schema: XsdSchema,
    port_type_name: String,
    location_uri: String,
    transform_locations: bool,
}

struct Operation<'a> {
    name: &'a str,
    input: &'a str,
    output: Option<String>,
    fault: Option<String>,
}

impl Wsdl11Definition {
    pub fn new(
        schema: XsdSchema,
        port_type_name: &str,
        location_uri: &str,
        transform_locations: bool,
    ) -> Self {
        Self {
            schema,
            port_type_name: port_type_name.to_string(),
            location_uri: location_uri.to_string(),
            transform_locations,
        }
    }

    pub fn schema(&self) -> &XsdSchema {
        &self.schema
    }

    /// Address published in `soap:address`. A relative location becomes
    /// absolute against the requesting origin (`scheme://host[:port]`) when
    /// transformation is on.
    pub fn location(&self, origin: Option<&str>) -> String {
        match origin {
            Some(origin) if self.transform_locations && self.location_uri.starts_with('/') => {
                format!("{}{}", origin.trim_end_matches('/'), self.location_uri)
            }
            _ => self.location_uri.clone(),
        }
    }

    fn operations(&self) -> Vec<Operation<'_>> {
        self.schema
            .elements()
            .iter()
            .filter_map(|element| {
                let name = element.strip_suffix(REQUEST_SUFFIX)?;
                let output = format!("{}{}", name, RESPONSE_SUFFIX);
                let fault = format!("{}{}", name, FAULT_SUFFIX);
                Some(Operation {
                    name,
                    input: element.as_str(),
                    output: self.schema.declares(&output).then_some(output),
                    fault: self.schema.declares(&fault).then_some(fault),
                })
            })
            .collect()
    }

    pub fn render(&self, origin: Option<&str>) -> Result<String, ServiceError> {
        let tns = self.schema.target_namespace();
        let binding_name = format!("{}Soap11", self.port_type_name);
        let operations = self.operations();

        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        w.write_event(Event::Start(BytesStart::new("wsdl:definitions").with_attributes([
            ("xmlns:wsdl", WSDL_NS),
            ("xmlns:soap", WSDL_SOAP_NS),
            ("xmlns:tns", tns),
            ("targetNamespace", tns),
        ])))?;

        w.write_event(Event::Start(BytesStart::new("wsdl:types")))?;
        self.inline_schema(&mut w)?;
        w.write_event(Event::End(BytesEnd::new("wsdl:types")))?;

        let message_suffixes = [REQUEST_SUFFIX, RESPONSE_SUFFIX, FAULT_SUFFIX];
        for element in self.schema.elements() {
            if !message_suffixes.iter().any(|s| element.ends_with(s)) {
                continue;
            }
            let part_element = format!("tns:{}", element);
            w.write_event(Event::Start(
                BytesStart::new("wsdl:message").with_attributes([("name", element.as_str())]),
            ))?;
            w.write_event(Event::Empty(BytesStart::new("wsdl:part").with_attributes([
                ("element", part_element.as_str()),
                ("name", element.as_str()),
            ])))?;
            w.write_event(Event::End(BytesEnd::new("wsdl:message")))?;
        }

        w.write_event(Event::Start(
            BytesStart::new("wsdl:portType").with_attributes([("name", self.port_type_name.as_str())]),
        ))?;
        for op in &operations {
            w.write_event(Event::Start(
                BytesStart::new("wsdl:operation").with_attributes([("name", op.name)]),
            ))?;
            write_port_message(&mut w, "wsdl:input", op.input)?;
            if let Some(output) = &op.output {
                write_port_message(&mut w, "wsdl:output", output)?;
            }
            if let Some(fault) = &op.fault {
                write_port_message(&mut w, "wsdl:fault", fault)?;
            }
            w.write_event(Event::End(BytesEnd::new("wsdl:operation")))?;
        }
        w.write_event(Event::End(BytesEnd::new("wsdl:portType")))?;

        let port_type_ref = format!("tns:{}", self.port_type_name);
        w.write_event(Event::Start(BytesStart::new("wsdl:binding").with_attributes([
            ("name", binding_name.as_str()),
            ("type", port_type_ref.as_str()),
        ])))?;
        w.write_event(Event::Empty(BytesStart::new("soap:binding").with_attributes([
            ("style", "document"),
            ("transport", SOAP_HTTP_TRANSPORT),
        ])))?;
        for op in &operations {
            w.write_event(Event::Start(
                BytesStart::new("wsdl:operation").with_attributes([("name", op.name)]),
            ))?;
            w.write_event(Event::Empty(
                BytesStart::new("soap:operation").with_attributes([("soapAction", "")]),
            ))?;
            write_literal_body(&mut w, "wsdl:input", "soap:body", op.input)?;
            if let Some(output) = &op.output {
                write_literal_body(&mut w, "wsdl:output", "soap:body", output)?;
            }
            if let Some(fault) = &op.fault {
                write_literal_body(&mut w, "wsdl:fault", "soap:fault", fault)?;
            }
            w.write_event(Event::End(BytesEnd::new("wsdl:operation")))?;
        }
        w.write_event(Event::End(BytesEnd::new("wsdl:binding")))?;

        let service_name = format!("{}Service", self.port_type_name);
        let binding_ref = format!("tns:{}", binding_name);
        let location = self.location(origin);
        w.write_event(Event::Start(
            BytesStart::new("wsdl:service").with_attributes([("name", service_name.as_str())]),
        ))?;
        w.write_event(Event::Start(BytesStart::new("wsdl:port").with_attributes([
            ("binding", binding_ref.as_str()),
            ("name", binding_name.as_str()),
        ])))?;
        w.write_event(Event::Empty(
            BytesStart::new("soap:address").with_attributes([("location", location.as_str())]),
        ))?;
        w.write_event(Event::End(BytesEnd::new("wsdl:port")))?;
        w.write_event(Event::End(BytesEnd::new("wsdl:service")))?;

        w.write_event(Event::End(BytesEnd::new("wsdl:definitions")))?;
        Ok(String::from_utf8(w.into_inner())?)
    }

    /// Copy the schema document into `w`, minus its prolog.
    fn inline_schema<W: std::io::Write>(&self, w: &mut Writer<W>) -> Result<(), ServiceError> {
        let mut reader = Reader::from_str(self.schema.source());
        reader.trim_text(true);
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => {}
                event => w.write_event(event)?,
            }
        }
        Ok(())
    }
}

fn write_port_message<W: std::io::Write>(
    w: &mut Writer<W>,
    tag: &str,
    element: &str,
) -> Result<(), quick_xml::Error> {
    let message = format!("tns:{}", element);
    w.write_event(Event::Empty(
        BytesStart::new(tag).with_attributes([("message", message.as_str()), ("name", element)]),
    ))?;
    Ok(())
}

fn write_literal_body<W: std::io::Write>(
    w: &mut Writer<W>,
    tag: &str,
    body_tag: &str,
    element: &str,
) -> Result<(), quick_xml::Error> {
    w.write_event(Event::Start(BytesStart::new(tag).with_attributes([("name", element)])))?;
    let mut body = BytesStart::new(body_tag).with_attributes([("use", "literal")]);
    if body_tag == "soap:fault" {
        body.push_attribute(("name", element));
    }
    w.write_event(Event::Empty(body))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
