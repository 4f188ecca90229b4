use crate::document::{Parameter, ParameterKind, ParameterLocation};
use crate::error::{Error, Result};
use crate::type_mapper::{map_type, SchemaType};
use crate::type_resolver::{FieldDef, ResolvedType, StructDef, TypeKind};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

/// Default limit on nested struct expansion
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Schema generator - converts type descriptors to schema trees
#[derive(Debug)]
pub struct SchemaGenerator {
    /// Schemas registered so far, keyed by schema name
    schemas: SchemaRegistry,
    /// Type identity behind each schema name
    identities: IndexMap<String, String>,
    max_depth: usize,
}

/// Schema node
///
/// Properties keep the declaration order of the fields they were built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "SchemaType::is_unmapped")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    /// Only `date-time` is produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element schema for `array` nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
}

/// Locations whose parameters are scanned from struct fields.
///
/// `formData` parameters only come from file annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLocation {
    Query,
    Path,
}

impl ScanLocation {
    /// Field tag holding the parameter name
    pub fn tag_key(self) -> &'static str {
        match self {
            ScanLocation::Query => "query",
            ScanLocation::Path => "path",
        }
    }
}

impl From<ScanLocation> for ParameterLocation {
    fn from(location: ScanLocation) -> Self {
        match location {
            ScanLocation::Query => ParameterLocation::Query,
            ScanLocation::Path => ParameterLocation::Path,
        }
    }
}

/// Illustrative value attached to a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Example {
    Text(String),
    /// Comma separated example of an `array` property
    List(Vec<String>),
}

/// Named schemas, in registration order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SchemaRegistry(IndexMap<String, Schema>);

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            ..Self::default()
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `schema` under `name`, returning the schema it replaced
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.0.insert(name.into(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.0.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaGenerator {
    pub fn new() -> Self {
        debug!("Initializing SchemaGenerator");
        Self {
            schemas: SchemaRegistry::new(),
            identities: IndexMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how many structs deep nested expansion may go
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Synthesize the `object` schema of a struct descriptor.
    ///
    /// Pointer layers around the struct are stripped first. Any other descriptor fails with
    /// [`Error::NotAStruct`].
    pub fn generate_schema(&self, ty: &ResolvedType) -> Result<Schema> {
        let target = ty.deref();
        let def = target.as_struct().ok_or_else(|| Error::NotAStruct {
            type_name: target.name.clone(),
        })?;

        debug!("Generating schema for type: {}", target.name);
        let mut ancestry = Vec::new();
        self.struct_schema(&target, def, &mut ancestry)
    }

    /// Synthesize the schema of `ty` and register it under the type name.
    ///
    /// Returns the name the schema was registered under. A distinct type whose name is
    /// already taken gets a numbered name (`Item_2`).
    pub fn register(&mut self, ty: &ResolvedType) -> Result<String> {
        let schema = self.generate_schema(ty)?;
        let name = self.schema_name(&ty.deref());
        if self.schemas.register(name.clone(), schema).is_some() {
            debug!("Schema for {} already exists, replacing it", name);
        }
        Ok(name)
    }

    fn schema_name(&mut self, target: &ResolvedType) -> String {
        let mut name = target.name.clone();
        let mut suffix = 1;
        loop {
            match self.identities.get(&name) {
                Some(id) if *id == target.id => return name,
                Some(_) => {
                    suffix += 1;
                    name = format!("{}_{}", target.name, suffix);
                }
                None => {
                    if suffix > 1 {
                        warn!(
                            "Schema name {} is taken by another type, registering {} as {}",
                            target.name, target.id, name
                        );
                    }
                    self.identities.insert(name.clone(), target.id.clone());
                    return name;
                }
            }
        }
    }

    /// Get all registered schemas
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn into_schemas(self) -> SchemaRegistry {
        self.schemas
    }

    /// `ancestry` holds the identities of the structs being expanded
    fn struct_schema(
        &self,
        target: &ResolvedType,
        def: &StructDef,
        ancestry: &mut Vec<String>,
    ) -> Result<Schema> {
        if ancestry.contains(&target.id) || ancestry.len() >= self.max_depth {
            return Err(Error::CyclicType {
                type_name: target.name.clone(),
                depth: ancestry.len(),
            });
        }

        ancestry.push(target.id.clone());
        let mut schema = Schema::of_type(SchemaType::Object);
        for field in &def.fields {
            let Some(property) = property_name(field) else {
                continue;
            };
            if field.tags.has_token("validate", "required") {
                schema.required.push(property.clone());
            }
            let field_schema = self.field_schema(field, ancestry)?;
            schema.properties.insert(property, field_schema);
        }
        ancestry.pop();

        Ok(schema)
    }

    fn field_schema(&self, field: &FieldDef, ancestry: &mut Vec<String>) -> Result<Schema> {
        let ty = field.resolve();
        let mapping = map_type(&ty);
        if mapping.schema_type.is_unmapped() {
            debug!("Field {} of type {} has no schema type", field.name, ty.name);
        }

        let mut schema = Schema {
            schema_type: mapping.schema_type,
            format: mapping.format.map(String::from),
            ..Schema::default()
        };

        if let Some(example) = field.tags.get("example").filter(|e| !e.is_empty()) {
            schema.example = Some(match mapping.schema_type {
                SchemaType::Array => {
                    Example::List(example.split(',').map(String::from).collect())
                }
                _ => Example::Text(example.to_string()),
            });
        }

        if mapping.schema_type == SchemaType::Array {
            if let TypeKind::Sequence(element) = ty.deref().kind {
                schema.items = Some(Box::new(self.item_schema(&element(), ancestry)?));
            }
        } else if field.tags.has_token("validate", "nested") {
            let target = ty.deref();
            if let Some(def) = target.as_struct() {
                let nested = self.struct_schema(&target, def, ancestry)?;
                schema.required = nested.required;
                schema.properties = nested.properties;
            }
        }

        Ok(schema)
    }

    /// Schema of a sequence element
    fn item_schema(&self, element: &ResolvedType, ancestry: &mut Vec<String>) -> Result<Schema> {
        let target = element.deref();
        if let Some(def) = target.as_struct() {
            return self.struct_schema(&target, def, ancestry);
        }

        let mapping = map_type(&target);
        let mut schema = Schema {
            schema_type: mapping.schema_type,
            format: mapping.format.map(String::from),
            ..Schema::default()
        };
        if let TypeKind::Sequence(inner) = target.kind {
            schema.items = Some(Box::new(self.item_schema(&inner(), ancestry)?));
        }
        Ok(schema)
    }
}

/// Synthesize the schema of an optional descriptor; `None` in, `None` out
pub fn synthesize(ty: Option<&ResolvedType>) -> Result<Option<Schema>> {
    ty.map(|ty| SchemaGenerator::new().generate_schema(ty))
        .transpose()
}

/// Property name of a field, `None` when the field is left out of the schema.
///
/// Non-`pub` fields, truthy `hidden` tags and a `json` name of `-` all exclude the field.
fn property_name(field: &FieldDef) -> Option<String> {
    if !field.exported || field.tags.is_truthy("hidden") {
        return None;
    }

    let json_name = field
        .tags
        .get("json")
        .and_then(|tag| tag.split(',').next())
        .map(str::trim)
        .unwrap_or_default();

    match json_name {
        "-" => None,
        "" => Some(field.name.to_lowercase()),
        name => Some(name.to_string()),
    }
}

/// Turn the fields of a struct bound to `location` into parameters.
///
/// Every field yields one parameter, named after its `query` / `path` tag. A field without
/// that tag yields a parameter with an empty name.
pub fn scan_parameters(ty: &ResolvedType, location: ScanLocation) -> Result<Vec<Parameter>> {
    let target = ty.deref();
    let def = target.as_struct().ok_or_else(|| Error::NotAStruct {
        type_name: target.name.clone(),
    })?;

    let tag_key = location.tag_key();
    let parameters = def
        .fields
        .iter()
        .map(|field| {
            let name = field.tags.get(tag_key).unwrap_or_default().to_string();
            if name.is_empty() {
                warn!(
                    "Field {}.{} has no `{}` tag, emitting an unnamed parameter",
                    target.name, field.name, tag_key
                );
            }

            let mapping = map_type(&field.resolve());
            Parameter {
                name,
                location: location.into(),
                required: field.tags.has_token("validate", "required"),
                default: field
                    .tags
                    .get("example")
                    .filter(|e| !e.is_empty())
                    .map(String::from),
                description: None,
                kind: ParameterKind::Scalar {
                    schema_type: mapping.schema_type,
                    format: mapping.format.map(String::from),
                },
            }
        })
        .collect();

    Ok(parameters)
}
