//! `openapi: "3.0.0"` encoder.

use super::Reference;
use crate::document::{
    Document, Info, Operation, Parameter, ParameterKind, PathItem, Response, SecurityScheme,
    Server,
};
use crate::schema_generator::Schema;
use indexmap::IndexMap;
use serde::Serialize;

pub const VERSION: &str = "3.0.0";

const SCHEMAS: &str = "#/components/schemas/";
const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize)]
pub struct OpenApiDocument {
    pub openapi: &'static str,
    pub info: Info,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItemObject>,
    #[serde(skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.security_schemes.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PathItemObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<OperationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationObject>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationObject {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<IndexMap<String, Vec<String>>>,
    pub responses: IndexMap<String, ResponseObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterObject {
    pub name: String,
    #[serde(rename = "in")]
    pub location: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub schema: ParameterSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTypeObject {
    pub schema: Reference,
}

/// Content is keyed by the body type name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBodyObject {
    pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaTypeObject>>,
}

/// Render `document` in the current shape.
///
/// Without configured servers, a server is derived from the host and base path.
pub fn encode(document: &Document) -> OpenApiDocument {
    let mut servers = document.servers.clone();
    if servers.is_empty() {
        if let Some(host) = &document.host {
            let base_path = document.base_path.as_deref().unwrap_or_default();
            servers.push(Server::new(format!("http://{}{}", host, base_path)));
        }
    }

    OpenApiDocument {
        openapi: VERSION,
        info: document.info.clone(),
        servers,
        paths: document
            .paths
            .iter()
            .map(|(path, item)| (path.clone(), path_item(item)))
            .collect(),
        components: Components {
            schemas: document
                .schemas
                .iter()
                .map(|(name, schema)| (name.to_string(), schema.clone()))
                .collect(),
            security_schemes: document.security_schemes.clone(),
        },
    }
}

fn path_item(item: &PathItem) -> PathItemObject {
    PathItemObject {
        get: item.get.as_ref().map(operation),
        post: item.post.as_ref().map(operation),
        put: item.put.as_ref().map(operation),
        patch: item.patch.as_ref().map(operation),
        delete: item.delete.as_ref().map(operation),
    }
}

fn operation(op: &Operation) -> OperationObject {
    OperationObject {
        tags: op.tags.clone(),
        consumes: op.consumes.clone(),
        parameters: op.parameters.iter().map(parameter).collect(),
        request_body: op.request_body.as_ref().map(|body| RequestBodyObject {
            content: IndexMap::from([(body.schema_name.clone(), media_type(&body.schema_name))]),
        }),
        security: op
            .security
            .iter()
            .map(|requirement| {
                IndexMap::from([(requirement.scheme.clone(), requirement.scopes.clone())])
            })
            .collect(),
        responses: op
            .responses
            .iter()
            .map(|(status, response)| (status.clone(), response_object(response)))
            .collect(),
    }
}

fn parameter(param: &Parameter) -> ParameterObject {
    let (schema_type, format) = match &param.kind {
        ParameterKind::Scalar {
            schema_type,
            format,
        } => (schema_type.as_str(), format.clone()),
        ParameterKind::File => (Some("file"), None),
    };

    ParameterObject {
        name: param.name.clone(),
        location: param.location.as_str(),
        description: param.description.clone(),
        required: param.required,
        schema: ParameterSchema {
            schema_type,
            format,
            default: param.default.clone(),
        },
    }
}

fn response_object(response: &Response) -> ResponseObject {
    ResponseObject {
        description: response.description.clone(),
        content: response
            .schema_name
            .as_deref()
            .map(|name| IndexMap::from([(JSON_MEDIA_TYPE.to_string(), media_type(name))])),
    }
}

fn media_type(schema_name: &str) -> MediaTypeObject {
    MediaTypeObject {
        schema: Reference::new(SCHEMAS, schema_name),
    }
}
