//! routedoc - API description documents synthesized from route definitions.
//!
//! A host application lists its routes together with the types bound to them and the
//! annotations attached to them. routedoc introspects those types through compile-time
//! descriptors and assembles a document in either the legacy `swagger: "2.0"` shape or the
//! `openapi: "3.0.0"` shape.
//!
//! # Architecture
//!
//! 1. [`type_resolver`] - Static type descriptors (`#[derive(Describe)]`)
//! 2. [`type_mapper`] - Maps descriptors onto schema types
//! 3. [`schema_generator`] - Builds schema trees and scans parameters
//! 4. [`metadata`] - Route annotations (tags, security, uploads, ...)
//! 5. [`openapi_builder`] - Assembles operations and builds the [`Document`]
//! 6. [`shape`] - Renders a document into one of the wire shapes
//! 7. [`serializer`] - Serializes the document to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use routedoc::metadata::RouteAnnotation;
//! use routedoc::openapi_builder::DocumentBuilder;
//! use routedoc::route::{Binding, Route, RouteGroup};
//! use routedoc::serializer::serialize_yaml;
//! use routedoc::shape::DocumentShape;
//! use routedoc::Describe;
//!
//! #[derive(Describe)]
//! pub struct SignUpUser {
//!     #[describe(validate = "required,isEmail", example = "john@gmail.com")]
//!     pub email: String,
//! }
//!
//! let routes = RouteGroup::new("Auth")
//!     .annotate(RouteAnnotation::tags(["Auth"]))
//!     .route(Route::post("").bind(Binding::body::<SignUpUser>()))
//!     .into_routes();
//!
//! let document = DocumentBuilder::new()
//!     .title("Swagger Document UI")
//!     .build(&routes)
//!     .unwrap();
//! assert!(document.schemas.contains("SignUpUser"));
//!
//! let yaml = serialize_yaml(&document, DocumentShape::OpenApi3).unwrap();
//! println!("{}", yaml);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

extern crate self as routedoc;

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod metadata;
pub mod openapi_builder;
pub mod route;
pub mod schema_generator;
pub mod serializer;
pub mod shape;
pub mod type_mapper;
pub mod type_resolver;
pub mod viewer;

pub use document::Document;
pub use error::{Error, Result};
pub use routedoc_derive::Describe;
pub use type_resolver::Describe;
