pub mod schema;
pub mod wsdl;

use anyhow::Result;
use tracing::info;

use crate::config::ContractConfig;
use crate::endpoint::{TranslationRequest, TranslationResponse};
use schema::XsdSchema;
use wsdl::Wsdl11Definition;

/// Documents published under the service root for client generation
#[derive(Debug, Clone)]
pub struct ServiceContract {
    wsdl: Wsdl11Definition,
    schema_file_name: String,
    wsdl_file_name: String,
}

pub enum ContractDocument {
    Schema(String),
    Wsdl(String),
}

impl ServiceContract {
    /// Load the schema and prepare the WSDL. Fails if the schema does not
    /// describe the translation messages.
    pub fn load(config: &ContractConfig) -> Result<Self> {
        let schema = XsdSchema::load(&config.schema_path)?;

        if schema.target_namespace() != config.target_namespace {
            anyhow::bail!(
                "Schema {} has targetNamespace {}, expected {}",
                config.schema_path,
                schema.target_namespace(),
                config.target_namespace
            );
        }
        for element in [TranslationRequest::ELEMENT, TranslationResponse::ELEMENT] {
            if !schema.declares(element) {
                anyhow::bail!("Schema {} does not declare {}", config.schema_path, element);
            }
        }

        info!(
            "Loaded schema {} ({} elements)",
            config.schema_path,
            schema.elements().len()
        );

        let contract = Self {
            wsdl: Wsdl11Definition::new(
                schema,
                &config.port_type_name,
                &config.location_uri,
                config.transform_wsdl_locations,
            ),
            schema_file_name: format!("{}.xsd", config.schema_name),
            wsdl_file_name: format!("{}.wsdl", config.wsdl_name),
        };
        info!(
            "Publishing {} and {}",
            contract.schema_file_name(),
            contract.wsdl_file_name()
        );

        Ok(contract)
    }

    pub fn schema_file_name(&self) -> &str {
        &self.schema_file_name
    }

    pub fn wsdl_file_name(&self) -> &str {
        &self.wsdl_file_name
    }

    /// Look up a published document by file name. `origin` is the
    /// `scheme://host[:port]` the fetching request was addressed to.
    pub fn document(
        &self,
        file_name: &str,
        origin: Option<&str>,
    ) -> Result<Option<ContractDocument>, crate::error::ServiceError> {
        if file_name == self.schema_file_name {
            Ok(Some(ContractDocument::Schema(self.wsdl.schema().source().to_string())))
        } else if file_name == self.wsdl_file_name {
            Ok(Some(ContractDocument::Wsdl(self.wsdl.render(origin)?)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::TRANSLATOR_NAMESPACE_URI;
    use std::io::Write;

    fn schema_path() -> String {
        concat!(env!("CARGO_MANIFEST_DIR"), "/resources/ws/translator.xsd").to_string()
    }

    fn config(schema_path: String) -> ContractConfig {
        ContractConfig {
            schema_path,
            ..ContractConfig::default()
        }
    }

    #[test]
    fn test_load_bundled_schema() {
        let contract = ServiceContract::load(&config(schema_path())).unwrap();
        assert_eq!(contract.schema_file_name(), "translatorSchema.xsd");
        assert_eq!(contract.wsdl_file_name(), "translator.wsdl");
    }

    #[test]
    fn test_schema_document_is_served_verbatim() {
        let contract = ServiceContract::load(&config(schema_path())).unwrap();
        let on_disk = std::fs::read_to_string(schema_path()).unwrap();

        for _ in 0..2 {
            match contract.document("translatorSchema.xsd", Some("http://localhost")).unwrap() {
                Some(ContractDocument::Schema(body)) => assert_eq!(body, on_disk),
                _ => panic!("expected schema document"),
            }
        }
        assert!(contract.document("other.xsd", None).unwrap().is_none());
    }

    #[test]
    fn test_wsdl_names_translation_operation() {
        let contract = ServiceContract::load(&config(schema_path())).unwrap();
        match contract.document("translator.wsdl", Some("http://localhost:8080")).unwrap() {
            Some(ContractDocument::Wsdl(body)) => {
                assert!(body.contains(r#"<wsdl:operation name="Translation">"#));
                assert!(body.contains(r#"<wsdl:portType name="TranslationPort">"#));
                assert!(body.contains(r#"location="http://localhost:8080/ws""#));
            }
            _ => panic!("expected wsdl document"),
        }
    }

    #[test]
    fn test_missing_schema_is_fatal() {
        assert!(ServiceContract::load(&config("missing/translator.xsd".to_string())).is_err());
    }

    #[test]
    fn test_schema_without_request_element_is_fatal() {
        let mut file = tempfile::Builder::new().suffix(".xsd").tempfile().unwrap();
        write!(
            file,
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="{}">
                <xs:element name="TranslationResponse" type="xs:string"/>
            </xs:schema>"#,
            TRANSLATOR_NAMESPACE_URI
        )
        .unwrap();

        let err = ServiceContract::load(&config(file.path().to_str().unwrap().to_string())).unwrap_err();
        assert!(err.to_string().contains("TranslationRequest"));
    }

    #[test]
    fn test_schema_must_match_configured_namespace() {
        let other = ContractConfig {
            target_namespace: "urn:other".to_string(),
            ..config(schema_path())
        };
        let err = ServiceContract::load(&other).unwrap_err();
        assert!(err.to_string().contains("expected urn:other"));

        let mut file = tempfile::Builder::new().suffix(".xsd").tempfile().unwrap();
        write!(
            file,
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:other">
                <xs:element name="TranslationRequest" type="xs:string"/>
                <xs:element name="TranslationResponse" type="xs:string"/>
            </xs:schema>"#
        )
        .unwrap();
        let matching = ContractConfig {
            schema_path: file.path().to_str().unwrap().to_string(),
            ..other
        };
        assert!(ServiceContract::load(&matching).is_ok());
    }
}
