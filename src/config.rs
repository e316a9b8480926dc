use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    pub translator_config: TranslatorConfig,
    #[serde(default)]
    pub contract_config: ContractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path the message dispatcher is mounted on.
    #[serde(default = "default_service_root")]
    pub service_root: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_service_root() -> String {
    "/ws".to_string()
}

/// Settings for the external translation collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_translator_model")]
    pub translator_model: String,
    pub base_url: String,
    /// No timeout is applied when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_translator_model() -> String {
    "http_translator".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Namespace of the message payloads. The schema must declare it as its
    /// `targetNamespace`.
    #[serde(default = "default_target_namespace")]
    pub target_namespace: String,
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
    #[serde(default = "default_schema_name")]
    pub schema_name: String,
    #[serde(default = "default_wsdl_name")]
    pub wsdl_name: String,
    #[serde(default = "default_port_type_name")]
    pub port_type_name: String,
    #[serde(default = "default_location_uri")]
    pub location_uri: String,
    #[serde(default = "default_transform_wsdl_locations")]
    pub transform_wsdl_locations: bool,
}

fn default_target_namespace() -> String {
    crate::soap::TRANSLATOR_NAMESPACE_URI.to_string()
}

fn default_schema_path() -> String {
    "resources/ws/translator.xsd".to_string()
}

fn default_schema_name() -> String {
    "translatorSchema".to_string()
}

fn default_wsdl_name() -> String {
    "translator".to_string()
}

fn default_port_type_name() -> String {
    "TranslationPort".to_string()
}

fn default_location_uri() -> String {
    "/ws".to_string()
}

fn default_transform_wsdl_locations() -> bool {
    true
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&read_text_file(path)?);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark if present.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path)?;
    let (cow, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        anyhow::bail!("File is not valid UTF-8");
    }
    Ok(cow.into_owned())
}

/// Replace `${VAR_NAME}` with the value of the environment variable.
/// Unset variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static pattern");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_root: default_service_root(),
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            target_namespace: default_target_namespace(),
            schema_path: default_schema_path(),
            schema_name: default_schema_name(),
            wsdl_name: default_wsdl_name(),
            port_type_name: default_port_type_name(),
            location_uri: default_location_uri(),
            transform_wsdl_locations: default_transform_wsdl_locations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_applies_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "translator_config:\n  base_url: http://localhost:9000").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.system_config.service_root, "/ws");
        assert_eq!(config.translator_config.translator_model, "http_translator");
        assert_eq!(config.translator_config.timeout_secs, None);
        assert_eq!(config.contract_config.port_type_name, "TranslationPort");
        assert_eq!(config.contract_config.schema_name, "translatorSchema");
        assert!(config.contract_config.transform_wsdl_locations);
        assert_eq!(
            config.contract_config.target_namespace,
            "http://translator/web/ws/schema"
        );
    }

    #[test]
    fn test_contract_namespace_override() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "translator_config:\n  base_url: http://t\ncontract_config:\n  target_namespace: urn:other\n  schema_path: other.xsd"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.contract_config.target_namespace, "urn:other");
        assert_eq!(config.contract_config.schema_path, "other.xsd");
        assert_eq!(config.contract_config.wsdl_name, "translator");
    }

    #[test]
    fn test_load_json_with_bom() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        write!(
            file,
            r#"{{"system_config": {{"port": 9090}}, "translator_config": {{"base_url": "http://t"}}}}"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.system_config.port, 9090);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.translator_config.base_url, "http://t");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("TRANSLATOR_WS_TEST_URL", "http://translator:7000");
        let out = substitute_env_vars("base_url: ${TRANSLATOR_WS_TEST_URL}\nother: ${TRANSLATOR_WS_UNSET_VAR}");
        assert_eq!(
            out,
            "base_url: http://translator:7000\nother: ${TRANSLATOR_WS_UNSET_VAR}"
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::load("does/not/exist.yaml").is_err());
    }
}
