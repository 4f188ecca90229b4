//! Static type descriptors used for shape discovery.
//!
//! Every type that can be bound to a route implements [`Describe`], which resolves the type
//! into a [`ResolvedType`]: a name plus a [`TypeKind`]. Struct descriptors list their fields
//! in declaration order together with the field's tags (the `#[describe(...)]` attribute).
//!
//! Child types are referenced through [`DescribeFn`] pointers rather than resolved eagerly,
//! so describing a self-referential type is always finite. Only schema synthesis walks the
//! graph, and it guards against cycles itself.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

/// Lazily produces the descriptor of a type.
pub type DescribeFn = fn() -> ResolvedType;

/// Types whose shape can be introspected.
///
/// Implemented for the primitives, `String`, common wrappers and collections, and for any
/// struct through `#[derive(Describe)]`.
pub trait Describe {
    /// Resolve this type into its descriptor
    fn describe() -> ResolvedType;
}

/// Resolved type information
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// Identity of the type; distinct types never share one
    pub id: String,
    /// The type name, used as the schema name of struct types
    pub name: String,
    /// The kind of type (struct, primitive, wrapper, etc.)
    pub kind: TypeKind,
}

/// Type kind - represents different categories of types
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A primitive type (String, i32, etc.)
    Primitive(PrimitiveType),
    /// An instant in time
    Temporal,
    /// A struct type with fields
    Struct(StructDef),
    /// An indirection to another type (`Option<T>`, `Box<T>`, ...)
    Pointer(DescribeFn),
    /// A sequence of elements (`Vec<T>`, arrays, sets)
    Sequence(DescribeFn),
    /// A map; only the value type is recorded
    Map(DescribeFn),
    /// Anything without a schema counterpart
    Opaque,
}

/// Struct definition with fields
#[derive(Debug, Clone, Default)]
pub struct StructDef {
    /// The fields of the struct, in declaration order
    pub fields: Vec<FieldDef>,
}

/// Field definition in a struct
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field identifier
    pub name: &'static str,
    /// Whether the field is visible outside its module (`pub`)
    pub exported: bool,
    /// Tags attached to this field
    pub tags: FieldTags,
    /// Descriptor of the field type
    pub ty: DescribeFn,
}

/// Primitive types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Char,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl PrimitiveType {
    /// Whether this is a signed or unsigned integer of any width
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveType::I8
                | PrimitiveType::I16
                | PrimitiveType::I32
                | PrimitiveType::I64
                | PrimitiveType::I128
                | PrimitiveType::Isize
                | PrimitiveType::U8
                | PrimitiveType::U16
                | PrimitiveType::U32
                | PrimitiveType::U64
                | PrimitiveType::U128
                | PrimitiveType::Usize
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveType::F32 | PrimitiveType::F64)
    }

    pub fn is_text(self) -> bool {
        matches!(self, PrimitiveType::String | PrimitiveType::Char)
    }
}

/// Key/value tags of a struct field, in declaration order.
///
/// Lookup follows struct-tag conventions: the first entry for a key wins and list-valued
/// tags (such as `validate`) are comma separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldTags(&'static [(&'static str, &'static str)]);

impl FieldTags {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    /// Value of the first tag named `key`
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    /// Comma separated tokens of the tag named `key`
    pub fn tokens(&self, key: &str) -> impl Iterator<Item = &'static str> {
        self.get(key)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Whether the tag named `key` lists `token` literally
    pub fn has_token(&self, key: &str, token: &str) -> bool {
        self.tokens(key).any(|t| t == token)
    }

    /// Whether the tag named `key` holds a truthy value (`true`, `1`, `yes`)
    pub fn is_truthy(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(str::trim),
            Some("true") | Some("1") | Some("yes")
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FieldDef {
    /// Create an exported, untagged field
    pub fn new(name: &'static str, ty: DescribeFn) -> Self {
        Self {
            name,
            exported: true,
            tags: FieldTags::default(),
            ty,
        }
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn tags(mut self, tags: FieldTags) -> Self {
        self.tags = tags;
        self
    }

    /// Resolve the field type
    pub fn resolve(&self) -> ResolvedType {
        (self.ty)()
    }
}

impl ResolvedType {
    /// Create a descriptor whose identity is its name
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind,
        }
    }

    /// Replace the identity, usually with [`std::any::type_name`]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Descriptor for a struct with the given fields
    pub fn structure(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::new(name, TypeKind::Struct(StructDef { fields }))
    }

    pub fn primitive(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self::new(name, TypeKind::Primitive(primitive))
    }

    /// Strip every pointer layer and return the pointed-to type
    pub fn deref(&self) -> ResolvedType {
        let mut current = self.clone();
        while let TypeKind::Pointer(inner) = current.kind {
            current = inner();
        }
        current
    }

    /// The struct definition of this type, if it is one
    pub fn as_struct(&self) -> Option<&StructDef> {
        match &self.kind {
            TypeKind::Struct(def) => Some(def),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Name with the element types of wrappers spelled out, e.g. `Vec_User`
    pub fn label(&self) -> String {
        match self.kind {
            TypeKind::Pointer(inner) | TypeKind::Sequence(inner) | TypeKind::Map(inner) => {
                format!("{}_{}", self.name, inner().label())
            }
            _ => self.name.clone(),
        }
    }
}

/// Name of a generic struct instantiated with `args`.
///
/// `Page<User>` becomes `Page_User`, so every instantiation gets its own schema name.
pub fn generic_name(base: &str, args: &[DescribeFn]) -> String {
    args.iter().fold(base.to_string(), |mut name, arg| {
        name.push('_');
        name.push_str(&arg().label());
        name
    })
}

macro_rules! describe_primitive {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> ResolvedType {
                    ResolvedType::primitive(stringify!($ty), PrimitiveType::$primitive)
                }
            }
        )*
    };
}

describe_primitive! {
    String => String,
    str => String,
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

macro_rules! describe_wrapper {
    ($kind:ident: $($name:literal => $ty:ident),* $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty<T> {
                fn describe() -> ResolvedType {
                    ResolvedType::new($name, TypeKind::$kind(<T as Describe>::describe))
                }
            }
        )*
    };
}

describe_wrapper!(Pointer: "Box" => Box, "Rc" => Rc, "Arc" => Arc);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> ResolvedType {
        ResolvedType::new("Option", TypeKind::Pointer(<T as Describe>::describe))
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> ResolvedType {
        T::describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> ResolvedType {
        ResolvedType::new("Vec", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> ResolvedType {
        ResolvedType::new("VecDeque", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> ResolvedType {
        ResolvedType::new("slice", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> ResolvedType {
        ResolvedType::new("array", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> ResolvedType {
        ResolvedType::new("HashSet", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> ResolvedType {
        ResolvedType::new("BTreeSet", TypeKind::Sequence(<T as Describe>::describe))
    }
}

impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> ResolvedType {
        ResolvedType::new("HashMap", TypeKind::Map(<V as Describe>::describe))
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> ResolvedType {
        ResolvedType::new("BTreeMap", TypeKind::Map(<V as Describe>::describe))
    }
}

impl<K, V: Describe, S> Describe for indexmap::IndexMap<K, V, S> {
    fn describe() -> ResolvedType {
        ResolvedType::new("IndexMap", TypeKind::Map(<V as Describe>::describe))
    }
}

impl Describe for serde_json::Value {
    fn describe() -> ResolvedType {
        ResolvedType::new("Value", TypeKind::Opaque)
    }
}

impl Describe for () {
    fn describe() -> ResolvedType {
        ResolvedType::new("()", TypeKind::Opaque)
    }
}

impl Describe for SystemTime {
    fn describe() -> ResolvedType {
        ResolvedType::new("SystemTime", TypeKind::Temporal)
    }
}

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn describe() -> ResolvedType {
        ResolvedType::new("DateTime", TypeKind::Temporal)
    }
}

impl Describe for chrono::NaiveDateTime {
    fn describe() -> ResolvedType {
        ResolvedType::new("NaiveDateTime", TypeKind::Temporal)
    }
}
