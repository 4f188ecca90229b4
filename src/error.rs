/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A route binding has no instance or is not struct-shaped
    #[error("invalid binding on route `{route}`: {reason}")]
    InvalidBinding { route: String, reason: String },

    /// A struct descriptor was expected
    #[error("type `{type_name}` is not a struct")]
    NotAStruct { type_name: String },

    /// Nested synthesis revisited a type already being expanded
    #[error("cyclic type graph at `{type_name}` (depth {depth})")]
    CyclicType { type_name: String, depth: usize },

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML: {}", err))
    }
}
