use std::path::Path;

use anyhow::{Context, Result};

use crate::config::read_text_file;
use crate::soap::xml;

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// An XSD document served verbatim, plus the facts WSDL generation needs.
#[derive(Debug, Clone)]
pub struct XsdSchema {
    source: String,
    target_namespace: String,
    elements: Vec<String>,
}

impl XsdSchema {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = read_text_file(path)
            .with_context(|| format!("Failed to read schema {}", path.display()))?;
        Self::parse(source).with_context(|| format!("Invalid schema {}", path.display()))
    }

    pub fn parse(source: String) -> Result<Self> {
        let root = xml::parse(&source)?;
        if !root.is(XSD_NS, "schema") {
            anyhow::bail!("root element is {}, expected xs:schema", root.expanded_name());
        }

        let target_namespace = root
            .attribute("targetNamespace")
            .ok_or_else(|| anyhow::anyhow!("schema has no targetNamespace"))?
            .to_string();

        let elements = root
            .children
            .iter()
            .filter(|c| c.is(XSD_NS, "element"))
            .filter_map(|c| c.attribute("name").map(|n| n.to_string()))
            .collect();

        Ok(Self {
            source,
            target_namespace,
            elements,
        })
    }

    /// The document exactly as loaded
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Names of the top-level element declarations, in document order
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn declares(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }
}
