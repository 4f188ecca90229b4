//! Legacy `swagger: "2.0"` encoder.

use super::{first_letter_to_lower, Reference};
use crate::document::{
    Document, Info, Operation, Parameter, ParameterKind, PathItem, Response, SecurityScheme,
};
use crate::schema_generator::Schema;
use indexmap::IndexMap;
use serde::Serialize;

pub const VERSION: &str = "2.0";

const DEFINITIONS: &str = "#/definitions/";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger2Document {
    pub swagger: &'static str,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Keyed by the lower-camel type name used in `$ref`s
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,
    pub paths: IndexMap<String, PathItemObject>,
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
pub struct OperationObject {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterObject>,
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
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Only set on body parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Reference>,
}

/// Render `document` in the legacy shape
pub fn encode(document: &Document) -> Swagger2Document {
    Swagger2Document {
        swagger: VERSION,
        info: document.info.clone(),
        host: document.host.clone(),
        base_path: document.base_path.clone(),
        schemes: document.schemes.clone(),
        security_definitions: document.security_schemes.clone(),
        definitions: document
            .schemas
            .iter()
            .map(|(name, schema)| (first_letter_to_lower(name), schema.clone()))
            .collect(),
        paths: document
            .paths
            .iter()
            .map(|(path, item)| (path.clone(), path_item(item)))
            .collect(),
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
    let body = op.request_body.iter().map(|body| ParameterObject {
        name: body.schema_name.clone(),
        location: "body",
        description: None,
        required: false,
        param_type: None,
        format: None,
        default: None,
        schema: Some(definition_ref(&body.schema_name)),
    });

    OperationObject {
        tags: op.tags.clone(),
        consumes: op.consumes.clone(),
        parameters: body.chain(op.parameters.iter().map(parameter)).collect(),
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
    let (param_type, format) = match &param.kind {
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
        param_type,
        format,
        default: param.default.clone(),
        schema: None,
    }
}

fn response_object(response: &Response) -> ResponseObject {
    ResponseObject {
        description: response.description.clone(),
        schema: response.schema_name.as_deref().map(definition_ref),
    }
}

fn definition_ref(name: &str) -> Reference {
    Reference::new(DEFINITIONS, &first_letter_to_lower(name))
}
