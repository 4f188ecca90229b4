//! Route definitions consumed by the document builder.
//!
//! A host application describes its API as an ordered list of [`Route`]s. Each route names
//! an HTTP method and a path template, the input types bound to it, and the annotations
//! attached to it. Routes declared through a [`RouteGroup`] share the group prefix and
//! inherit the group annotations.
//!
//! # Example
//!
//! ```
//! use routedoc::metadata::RouteAnnotation;
//! use routedoc::route::{Binding, Route, RouteGroup};
//! use routedoc::Describe;
//!
//! #[derive(Describe)]
//! pub struct FindUser {
//!     #[describe(query = "name")]
//!     pub name: String,
//! }
//!
//! let routes = RouteGroup::new("Users")
//!     .annotate(RouteAnnotation::tags(["User"]))
//!     .route(Route::get("").bind(Binding::query::<FindUser>()))
//!     .into_routes();
//! assert_eq!(routes[0].group.as_deref(), Some("Users"));
//! ```

use crate::error::Error;
use crate::metadata::RouteAnnotation;
use crate::type_resolver::{Describe, ResolvedType};
use std::fmt;
use std::str::FromStr;

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Every method, in document order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(Error::UnsupportedMethod(method.to_string())),
        }
    }
}

/// Where a bound input is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingLocation {
    Body,
    Query,
    Path,
}

impl BindingLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingLocation::Body => "body",
            BindingLocation::Query => "query",
            BindingLocation::Path => "path",
        }
    }
}

/// An input type bound to a route.
///
/// `value` is `None` when the host registered the binding without a type instance.
#[derive(Debug, Clone)]
pub struct Binding {
    pub location: BindingLocation,
    pub value: Option<ResolvedType>,
}

impl Binding {
    pub fn new(location: BindingLocation, value: Option<ResolvedType>) -> Self {
        Self { location, value }
    }

    pub fn body<T: Describe + ?Sized>() -> Self {
        Self::new(BindingLocation::Body, Some(T::describe()))
    }

    pub fn query<T: Describe + ?Sized>() -> Self {
        Self::new(BindingLocation::Query, Some(T::describe()))
    }

    pub fn path<T: Describe + ?Sized>() -> Self {
        Self::new(BindingLocation::Path, Some(T::describe()))
    }

    /// A binding registered without a type
    pub fn absent(location: BindingLocation) -> Self {
        Self::new(location, None)
    }
}

/// Complete information about a single API endpoint.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: HttpMethod,
    /// The URL path pattern (e.g. `{id}` or `/users/:id`), relative to the group prefix
    pub path: String,
    /// Prefix of the group the route was declared in
    pub group: Option<String>,
    pub bindings: Vec<Binding>,
    pub annotations: Vec<RouteAnnotation>,
}

impl Route {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            group: None,
            bindings: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn group(mut self, prefix: impl Into<String>) -> Self {
        self.group = Some(prefix.into());
        self
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn annotate(mut self, annotation: RouteAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Routes sharing a prefix and a set of annotations, like a controller
#[derive(Debug, Clone)]
pub struct RouteGroup {
    pub prefix: String,
    pub annotations: Vec<RouteAnnotation>,
    pub routes: Vec<Route>,
}

impl RouteGroup {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            annotations: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Annotate every route of the group
    pub fn annotate(mut self, annotation: RouteAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Flatten the group. Group annotations precede the annotations of each route.
    pub fn into_routes(self) -> Vec<Route> {
        let RouteGroup {
            prefix,
            annotations,
            routes,
        } = self;

        routes
            .into_iter()
            .map(|mut route| {
                route.group = Some(prefix.clone());
                let own = std::mem::take(&mut route.annotations);
                route.annotations = annotations.iter().cloned().chain(own).collect();
                route
            })
            .collect()
    }
}
