use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use quick_xml::Writer;

use crate::error::ServiceError;

/// Namespace-resolved XML element.
///
/// Only what payload binding needs is kept: attributes lose their prefix,
/// namespace declarations are dropped, and all text of an element is
/// concatenated verbatim (no trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(namespace: Option<&str>, local_name: &str) -> Self {
        Self {
            namespace: namespace.map(|ns| ns.to_string()),
            local_name: local_name.to_string(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[cfg(test)]
    pub fn child(&self, namespace: &str, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, local_name))
    }

    /// `{namespace}localName`
    pub fn expanded_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.local_name),
            None => self.local_name.clone(),
        }
    }
}

/// Parse a complete document into its root element.
pub fn parse(input: &str) -> Result<XmlElement, ServiceError> {
    let mut reader = NsReader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) => stack.push(element_from(ns, &e)?),
            (ns, Event::Empty(e)) => {
                let element = element_from(ns, &e)?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ServiceError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::Text(t)) => match stack.last_mut() {
                Some(top) => top.text.push_str(&t.unescape()?),
                None if t.iter().all(u8::is_ascii_whitespace) => {}
                None => {
                    return Err(ServiceError::Malformed(
                        "text content outside of the root element".to_string(),
                    ))
                }
            },
            (_, Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ServiceError::Malformed(format!(
            "element '{}' is not closed",
            open.local_name
        )));
    }
    root.ok_or_else(|| ServiceError::Malformed("document has no root element".to_string()))
}

fn element_from(ns: ResolveResult, start: &BytesStart) -> Result<XmlElement, ServiceError> {
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(ServiceError::Malformed(format!(
                "unbound namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            )))
        }
    };

    let mut element = XmlElement {
        namespace,
        local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes: Vec::new(),
        text: String::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ServiceError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ServiceError::Malformed(
                "document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Write `element` and its subtree. A default namespace declaration is
/// emitted whenever the element's namespace differs from `parent_ns`.
pub fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
    parent_ns: Option<&str>,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.local_name.as_str());
    if element.namespace.as_deref() != parent_ns {
        start.push_attribute(("xmlns", element.namespace.as_deref().unwrap_or("")));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if element.children.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    } else {
        for child in &element.children {
            write_element(writer, child, element.namespace.as_deref())?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.local_name.as_str())))?;
    Ok(())
}
