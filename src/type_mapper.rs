//! Maps type descriptors onto primitive schema types.

use crate::type_resolver::{ResolvedType, TypeKind};
use serde::Serialize;

/// Format attached to every temporal value
pub const DATE_TIME_FORMAT: &str = "date-time";

/// Primitive schema type tag.
///
/// `Unmapped` marks a type with no schema counterpart (maps, opaque values). It is not an
/// error: the node is emitted without a `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
    #[default]
    Unmapped,
}

impl SchemaType {
    /// Wire name of the type, `None` for `Unmapped`
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            SchemaType::Boolean => Some("boolean"),
            SchemaType::Integer => Some("integer"),
            SchemaType::Number => Some("number"),
            SchemaType::String => Some("string"),
            SchemaType::Object => Some("object"),
            SchemaType::Array => Some("array"),
            SchemaType::Unmapped => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        *self == SchemaType::Unmapped
    }
}

/// Result of mapping one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub schema_type: SchemaType,
    /// `Some("date-time")` for temporal values
    pub format: Option<&'static str>,
}

impl TypeMapping {
    fn plain(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            format: None,
        }
    }
}

/// Map a type descriptor onto its schema type.
///
/// Temporal values map to `string` with the `date-time` format. An indirection to a struct
/// is an `object`; an indirection to anything else maps like its target.
pub fn map_type(ty: &ResolvedType) -> TypeMapping {
    match &ty.kind {
        TypeKind::Temporal => TypeMapping {
            schema_type: SchemaType::String,
            format: Some(DATE_TIME_FORMAT),
        },
        TypeKind::Primitive(primitive) => {
            let schema_type = if primitive.is_integer() {
                SchemaType::Integer
            } else if primitive.is_float() {
                SchemaType::Number
            } else if primitive.is_text() {
                SchemaType::String
            } else {
                SchemaType::Boolean
            };
            TypeMapping::plain(schema_type)
        }
        TypeKind::Struct(_) => TypeMapping::plain(SchemaType::Object),
        TypeKind::Pointer(inner) => {
            let target = inner();
            if target.is_struct() {
                TypeMapping::plain(SchemaType::Object)
            } else {
                map_type(&target)
            }
        }
        TypeKind::Sequence(_) => TypeMapping::plain(SchemaType::Array),
        TypeKind::Map(_) | TypeKind::Opaque => TypeMapping::plain(SchemaType::Unmapped),
    }
}
