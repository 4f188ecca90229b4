//! Document metadata loaded from a YAML or JSON file.
//!
//! ```yaml
//! title: Swagger Document UI
//! version: 1.0.0
//! host: localhost:3000
//! basePath: /api
//! securitySchemes:
//!   Authorization:
//!     type: apiKey
//!     in: header
//!     name: Authorization
//! ```

use crate::document::{Contact, License, SecurityScheme, Server};
use crate::error::{Error, Result};
use crate::openapi_builder::DocumentBuilder;
use crate::shape::DocumentShape;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Every field is optional; unset fields keep the builder defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Option<Vec<String>>,
    pub servers: Vec<Server>,
    pub global_prefix: Option<String>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    /// Shape used when none is given on the command line
    pub shape: Option<DocumentShape>,
}

impl DocumentConfig {
    /// Load a config file, choosing the format from its extension.
    ///
    /// `.json` files are read as JSON, `.yaml` / `.yml` as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading document config from {}", path.display());
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::Config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|err| Error::Config(format!("YAML: {}", err)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|err| Error::Config(format!("JSON: {}", err)))
    }

    /// Copy every set field onto `builder`
    pub fn apply(&self, mut builder: DocumentBuilder) -> DocumentBuilder {
        if let Some(title) = &self.title {
            builder = builder.title(title);
        }
        if let Some(description) = &self.description {
            builder = builder.description(description);
        }
        if let Some(version) = &self.version {
            builder = builder.version(version);
        }
        if let Some(terms) = &self.terms_of_service {
            builder = builder.terms_of_service(terms);
        }
        if let Some(contact) = &self.contact {
            builder = builder.contact(contact.clone());
        }
        if let Some(license) = &self.license {
            builder = builder.license(license.clone());
        }
        if let Some(host) = &self.host {
            builder = builder.host(host);
        }
        if let Some(base_path) = &self.base_path {
            builder = builder.base_path(base_path);
        }
        if let Some(schemes) = &self.schemes {
            builder = builder.schemes(schemes.iter().cloned());
        }
        for server in &self.servers {
            builder = builder.server(server.clone());
        }
        if let Some(prefix) = &self.global_prefix {
            builder = builder.global_prefix(prefix);
        }
        for (name, scheme) in &self.security_schemes {
            builder = builder.security_scheme(name, scheme.clone());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    const YAML: &str = r#"
title: Swagger Document UI
description: This is a document for apis
version: 1.0.0
host: localhost:3000
basePath: /api
schemes: [https]
shape: swagger2
securitySchemes:
  Authorization:
    type: apiKey
    in: header
    name: Authorization
"#;

    #[test]
    fn test_yaml_config_is_applied() {
        let config = DocumentConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.shape, Some(DocumentShape::Swagger2));

        let document = config.apply(DocumentBuilder::new()).build(&[]).unwrap();
        assert_eq!(document.info.title, "Swagger Document UI");
        assert_eq!(document.info.version, "1.0.0");
        assert_eq!(document.host.as_deref(), Some("localhost:3000"));
        assert_eq!(document.base_path.as_deref(), Some("/api"));
        assert_eq!(document.schemes, vec!["https"]);
        assert_eq!(
            document.security_schemes["Authorization"],
            SecurityScheme::api_key_header("Authorization")
        );
        // Untouched fields keep their defaults.
        assert_eq!(
            document.info.terms_of_service.as_deref(),
            Some("http://swagger.io/terms/")
        );
    }

    #[test]
    fn test_load_by_extension() {
        let temp_dir = TempDir::new().unwrap();

        let json_path = temp_dir.path().join("doc.json");
        let mut file = fs::File::create(&json_path).unwrap();
        file.write_all(br#"{"title": "From JSON", "globalPrefix": "api"}"#)
            .unwrap();
        let config = DocumentConfig::load(&json_path).unwrap();
        assert_eq!(config.title.as_deref(), Some("From JSON"));
        assert_eq!(config.global_prefix.as_deref(), Some("api"));

        let yaml_path = temp_dir.path().join("doc.yml");
        fs::write(&yaml_path, YAML).unwrap();
        assert_eq!(
            DocumentConfig::load(&yaml_path).unwrap(),
            DocumentConfig::from_yaml_str(YAML).unwrap()
        );

        let toml_path = temp_dir.path().join("doc.toml");
        fs::write(&toml_path, "title = 'x'").unwrap();
        assert!(matches!(
            DocumentConfig::load(&toml_path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = DocumentConfig::from_yaml_str("titel: typo").unwrap_err();
        assert!(matches!(err, Error::Config(message) if message.contains("titel")));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = DocumentConfig::load(&temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
