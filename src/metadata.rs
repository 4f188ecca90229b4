//! Route annotations and their extraction into operation fields.

use crate::type_resolver::{Describe, ResolvedType};
use log::debug;

/// Metadata attached to a route or to a route group
#[derive(Debug, Clone)]
pub enum RouteAnnotation {
    Tag(Vec<String>),
    /// Names of required security schemes
    Security(Vec<String>),
    /// Consumed media types
    Consumer(Vec<String>),
    File(Vec<FileOptions>),
    /// Payload returned with `200`
    OkResponse(ResolvedType),
    /// Annotations owned by other consumers
    Other {
        key: String,
        value: serde_json::Value,
    },
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl RouteAnnotation {
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteAnnotation::Tag(strings(tags))
    }

    pub fn security<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteAnnotation::Security(strings(schemes))
    }

    pub fn consumes<I, S>(media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteAnnotation::Consumer(strings(media_types))
    }

    pub fn files(files: impl IntoIterator<Item = FileOptions>) -> Self {
        RouteAnnotation::File(files.into_iter().collect())
    }

    pub fn ok_response<T: Describe + ?Sized>() -> Self {
        RouteAnnotation::OkResponse(T::describe())
    }

    pub fn other(key: impl Into<String>, value: serde_json::Value) -> Self {
        RouteAnnotation::Other {
            key: key.into(),
            value,
        }
    }
}

/// A declared file upload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileOptions {
    pub name: String,
    pub required: bool,
    pub description: String,
}

impl FileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Operation fields carried by the annotations of one route
#[derive(Debug, Clone, Default)]
pub struct RouteMetadata {
    pub tags: Vec<String>,
    pub security: Vec<String>,
    pub consumes: Vec<String>,
    pub files: Vec<FileOptions>,
    pub ok_response: Option<ResolvedType>,
}

/// Collect the operation fields of a route.
///
/// The first annotation of each kind wins; later ones of the same kind are ignored.
pub fn extract(annotations: &[RouteAnnotation]) -> RouteMetadata {
    let mut tags = None;
    let mut security = None;
    let mut consumes = None;
    let mut files = None;
    let mut ok_response = None;

    for annotation in annotations {
        match annotation {
            RouteAnnotation::Tag(values) => {
                tags.get_or_insert_with(|| values.clone());
            }
            RouteAnnotation::Security(values) => {
                security.get_or_insert_with(|| values.clone());
            }
            RouteAnnotation::Consumer(values) => {
                consumes.get_or_insert_with(|| values.clone());
            }
            RouteAnnotation::File(values) => {
                files.get_or_insert_with(|| values.clone());
            }
            RouteAnnotation::OkResponse(ty) => {
                ok_response.get_or_insert_with(|| ty.clone());
            }
            RouteAnnotation::Other { key, .. } => {
                debug!("Ignoring annotation {}", key);
            }
        }
    }

    RouteMetadata {
        tags: tags.unwrap_or_default(),
        security: security.unwrap_or_default(),
        consumes: consumes.unwrap_or_default(),
        files: files.unwrap_or_default(),
        ok_response,
    }
}
