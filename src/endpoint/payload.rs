use crate::error::ServiceError;
use crate::soap::XmlElement;

const REQUEST_FIELDS: [&str; 3] = ["langFrom", "langTo", "text"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub lang_from: String,
    pub lang_to: String,
    pub text: String,
}

impl TranslationRequest {
    pub const ELEMENT: &'static str = "TranslationRequest";

    /// Bind a `TranslationRequest` payload, validating it against the
    /// published schema: a sequence of exactly one `langFrom`, `langTo` and
    /// `text` qualified by `namespace`, each with simple content.
    pub fn from_payload(payload: &XmlElement, namespace: &str) -> Result<Self, ServiceError> {
        let mut violations = Vec::new();
        let mut values: [Option<String>; 3] = Default::default();
        let mut children = payload.children.iter();

        for (slot, name) in values.iter_mut().zip(REQUEST_FIELDS) {
            match children.next() {
                Some(child) if child.is(namespace, name) => {
                    if child.children.is_empty() {
                        *slot = Some(child.text.clone());
                    } else {
                        violations.push(format!("Element '{}' must not have element children", name));
                    }
                }
                Some(child) => {
                    violations.push(format!(
                        "Invalid content was found starting with element '{}'. Expected '{}'",
                        child.expanded_name(),
                        name
                    ));
                    break;
                }
                None => {
                    violations.push(format!(
                        "The content of element '{}' is not complete. Expected '{}'",
                        Self::ELEMENT,
                        name
                    ));
                    break;
                }
            }
        }

        for extra in children {
            violations.push(format!("Unexpected element '{}'", extra.expanded_name()));
        }

        match values {
            [Some(lang_from), Some(lang_to), Some(text)] if violations.is_empty() => Ok(Self {
                lang_from,
                lang_to,
                text,
            }),
            _ => Err(ServiceError::Validation(violations)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translation: String,
}

impl TranslationResponse {
    pub const ELEMENT: &'static str = "TranslationResponse";

    pub fn into_payload(self, namespace: &str) -> XmlElement {
        XmlElement::new(Some(namespace), Self::ELEMENT)
            .with_child(XmlElement::new(Some(namespace), "translation").with_text(self.translation))
    }
}
