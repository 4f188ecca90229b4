//! Version-agnostic description of an API.
//!
//! The types here carry no wire conventions: references hold plain schema names and
//! parameters hold typed kinds. The encoders in [`crate::shape`] decide how each piece is
//! rendered.

use crate::route::HttpMethod;
use crate::schema_generator::SchemaRegistry;
use crate::type_mapper::SchemaType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A server the API is reachable at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

/// Security scheme object, shared by both document shapes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// `apiKey`, `http`, `basic`, `oauth2`, ...
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header, query or cookie name for `apiKey` schemes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
}

impl SecurityScheme {
    /// An API key carried in the given header
    pub fn api_key_header(header: impl Into<String>) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            name: Some(header.into()),
            location: Some("header".to_string()),
            ..Self::default()
        }
    }

    /// HTTP bearer authentication
    pub fn bearer(bearer_format: Option<String>) -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: Some("bearer".to_string()),
            bearer_format,
            ..Self::default()
        }
    }
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Path,
    FormData,
}

impl ParameterLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::FormData => "formData",
        }
    }
}

/// Value kind of a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Scalar {
        schema_type: SchemaType,
        format: Option<String>,
    },
    /// A file upload
    File,
}

/// A single operation parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Default / example value, copied verbatim from the `example` tag
    pub default: Option<String>,
    pub description: Option<String>,
    pub kind: ParameterKind,
}

/// Named security scheme with its (always empty) scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub scheme: String,
    pub scopes: Vec<String>,
}

impl SecurityRequirement {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            scopes: Vec::new(),
        }
    }
}

/// Request body referencing a registered schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub schema_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub description: String,
    /// Registered schema describing the payload
    pub schema_name: Option<String>,
}

impl Response {
    /// The default `200` response
    pub fn ok() -> Self {
        Self {
            description: "Ok".to_string(),
            schema_name: None,
        }
    }
}

/// Description of one (path, method) route
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    pub tags: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub consumes: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Append a parameter, replacing in place any parameter with the same name and location.
    ///
    /// Returns `true` when an existing parameter was replaced.
    pub fn push_parameter(&mut self, parameter: Parameter) -> bool {
        match self
            .parameters
            .iter_mut()
            .find(|p| p.name == parameter.name && p.location == parameter.location)
        {
            Some(existing) => {
                *existing = parameter;
                true
            }
            None => {
                self.parameters.push(parameter);
                false
            }
        }
    }
}

/// All operations registered under one path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
}

impl PathItem {
    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
        }
    }

    /// Store the operation for `method`, returning the one it replaced
    pub fn set(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    pub fn get(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Filled slots in method order
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.get(method).map(|op| (method, op)))
    }
}

/// The assembled API description
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
    pub servers: Vec<Server>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    pub schemas: SchemaRegistry,
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    /// Look up the operation registered at `path` for `method`
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get(method))
    }
}
