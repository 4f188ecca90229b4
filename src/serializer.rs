//! Serialization module for converting documents to YAML or JSON format.
//!
//! The document is first rendered into the requested [`DocumentShape`], then encoded.

use crate::document::Document;
use crate::error::Result;
use crate::shape::{openapi3, swagger2, DocumentShape};
use log::debug;
use std::fs;
use std::path::Path;

/// Render a document into a JSON value of the given shape.
pub fn to_value(doc: &Document, shape: DocumentShape) -> Result<serde_json::Value> {
    let value = match shape {
        DocumentShape::Swagger2 => serde_json::to_value(swagger2::encode(doc))?,
        DocumentShape::OpenApi3 => serde_json::to_value(openapi3::encode(doc))?,
    };
    Ok(value)
}

/// Serializes a document to YAML format.
///
/// # Errors
///
/// Returns [`Error::Serialization`](crate::Error::Serialization) if encoding fails.
pub fn serialize_yaml(doc: &Document, shape: DocumentShape) -> Result<String> {
    debug!("Serializing {:?} document to YAML", shape);
    let yaml = match shape {
        DocumentShape::Swagger2 => serde_yaml::to_string(&swagger2::encode(doc))?,
        DocumentShape::OpenApi3 => serde_yaml::to_string(&openapi3::encode(doc))?,
    };
    Ok(yaml)
}

/// Serializes a document to JSON format with pretty printing.
///
/// # Example
///
/// ```
/// use routedoc::openapi_builder::DocumentBuilder;
/// use routedoc::serializer::serialize_json;
/// use routedoc::shape::DocumentShape;
///
/// let document = DocumentBuilder::new().title("Pets").build(&[]).unwrap();
/// let json = serialize_json(&document, DocumentShape::OpenApi3).unwrap();
/// assert!(json.contains("\"openapi\": \"3.0.0\""));
/// ```
pub fn serialize_json(doc: &Document, shape: DocumentShape) -> Result<String> {
    debug!("Serializing {:?} document to JSON", shape);
    let json = match shape {
        DocumentShape::Swagger2 => serde_json::to_string_pretty(&swagger2::encode(doc))?,
        DocumentShape::OpenApi3 => serde_json::to_string_pretty(&openapi3::encode(doc))?,
    };
    Ok(json)
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does. Missing parent
/// directories are created.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
