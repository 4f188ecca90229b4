//! Wire shapes a [`Document`](crate::document::Document) can be rendered into.
//!
//! - [`swagger2`]: the legacy single-root shape. Parameters carry their type inline and
//!   body schemas are referenced from a flat `definitions` map.
//! - [`openapi3`]: the current shape. Request bodies are separate objects referencing
//!   `components.schemas`.

pub mod openapi3;
pub mod swagger2;

use serde::{Deserialize, Serialize};

/// Document version shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum DocumentShape {
    /// `swagger: "2.0"`
    #[serde(rename = "swagger2")]
    #[value(name = "swagger2")]
    Swagger2,
    /// `openapi: "3.0.0"`
    #[default]
    #[serde(rename = "openapi3")]
    #[value(name = "openapi3")]
    OpenApi3,
}

impl DocumentShape {
    /// Version marker written at the document root
    pub fn version(self) -> &'static str {
        match self {
            DocumentShape::Swagger2 => swagger2::VERSION,
            DocumentShape::OpenApi3 => openapi3::VERSION,
        }
    }
}

/// `SignUpUser` -> `signUpUser`
pub fn first_letter_to_lower(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `{"$ref": ...}` node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub fn new(prefix: &str, name: &str) -> Self {
        Self {
            reference: format!("{}{}", prefix, name),
        }
    }
}
