use crate::document::{
    Contact, Document, Info, License, Operation, Parameter, ParameterKind, ParameterLocation,
    PathItem, RequestBody, Response, SecurityRequirement, SecurityScheme, Server,
};
use crate::error::{Error, Result};
use crate::metadata::{self, FileOptions};
use crate::route::{BindingLocation, Route};
use crate::schema_generator::{scan_parameters, ScanLocation, SchemaGenerator, SchemaRegistry};
use crate::type_resolver::ResolvedType;
use indexmap::IndexMap;
use log::{debug, info};

/// API document builder
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    info: Info,
    host: Option<String>,
    base_path: Option<String>,
    schemes: Vec<String>,
    servers: Vec<Server>,
    /// Prefix put in front of every route path
    global_prefix: Option<String>,
    security_schemes: IndexMap<String, SecurityScheme>,
}

/// Paths and schemas produced from a list of routes
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub paths: IndexMap<String, PathItem>,
    pub schemas: SchemaRegistry,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Create a new DocumentBuilder with default info
    pub fn new() -> Self {
        debug!("Initializing DocumentBuilder");
        Self {
            info: Info {
                title: "Swagger UI".to_string(),
                description: Some("This is a sample server.".to_string()),
                version: "1.0".to_string(),
                terms_of_service: Some("http://swagger.io/terms/".to_string()),
                contact: Some(Contact {
                    name: Some("API Support".to_string()),
                    url: Some("http://www.swagger.io/support".to_string()),
                    email: Some("support@swagger.io".to_string()),
                }),
                license: Some(License {
                    name: "Apache 2.0".to_string(),
                    url: Some("http://www.apache.org/licenses/LICENSE-2.0.html".to_string()),
                }),
            },
            host: None,
            base_path: None,
            schemes: vec!["http".to_string(), "https".to_string()],
            servers: Vec::new(),
            global_prefix: None,
            security_schemes: IndexMap::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn terms_of_service(mut self, terms: impl Into<String>) -> Self {
        self.info.terms_of_service = Some(terms.into());
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.info.contact = Some(contact);
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.info.license = Some(license);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a server; servers are kept in insertion order
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn global_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.global_prefix = Some(prefix.into());
        self
    }

    /// Register a security scheme under `name`, replacing any scheme of that name
    pub fn security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.into(), scheme);
        self
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Build the document for `routes`.
    ///
    /// Every call starts from scratch, so building twice from the same routes yields equal
    /// documents.
    pub fn build(&self, routes: &[Route]) -> Result<Document> {
        debug!("Building document from {} routes", routes.len());
        let Assembly { paths, schemas } = assemble(routes, self.global_prefix.as_deref())?;

        info!(
            "Built document with {} paths and {} schemas",
            paths.len(),
            schemas.len()
        );

        Ok(Document {
            info: self.info.clone(),
            host: self.host.clone(),
            base_path: self.base_path.clone(),
            schemes: self.schemes.clone(),
            servers: self.servers.clone(),
            security_schemes: self.security_schemes.clone(),
            schemas,
            paths,
        })
    }
}

/// Assemble one operation per route, in route order.
///
/// A later route registered for the same normalized path and method replaces the earlier
/// one.
pub fn assemble(routes: &[Route], global_prefix: Option<&str>) -> Result<Assembly> {
    let mut generator = SchemaGenerator::new();
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    for route in routes {
        let path = normalize_path(global_prefix, route.group.as_deref(), &route.path);
        let label = format!("{} {}", route.method, path);
        debug!("Adding route: {}", label);

        let operation = assemble_operation(route, &label, &mut generator)?;
        if paths
            .entry(path)
            .or_default()
            .set(route.method, operation)
            .is_some()
        {
            debug!("Replacing previously registered operation {}", label);
        }
    }

    Ok(Assembly {
        paths,
        schemas: generator.into_schemas(),
    })
}

fn assemble_operation(
    route: &Route,
    label: &str,
    generator: &mut SchemaGenerator,
) -> Result<Operation> {
    let mut operation = Operation::default();

    for binding in &route.bindings {
        let ty = binding.value.as_ref().ok_or_else(|| Error::InvalidBinding {
            route: label.to_string(),
            reason: format!("{} binding has no type", binding.location.as_str()),
        })?;

        match binding.location {
            BindingLocation::Body => {
                let schema_name = register(generator, ty, label)?;
                if operation.request_body.is_some() {
                    debug!("Route {} binds several bodies, keeping {}", label, schema_name);
                }
                operation.request_body = Some(RequestBody { schema_name });
            }
            BindingLocation::Query | BindingLocation::Path => {
                let location = match binding.location {
                    BindingLocation::Path => ScanLocation::Path,
                    _ => ScanLocation::Query,
                };
                let parameters =
                    scan_parameters(ty, location).map_err(|err| invalid_binding(err, label))?;
                for parameter in parameters {
                    push_parameter(&mut operation, parameter, label);
                }
            }
        }
    }

    let metadata = metadata::extract(&route.annotations);
    operation.tags = metadata.tags;
    operation.security = metadata
        .security
        .into_iter()
        .map(SecurityRequirement::new)
        .collect();
    operation.consumes = metadata.consumes;
    for file in metadata.files {
        push_parameter(&mut operation, file_parameter(file), label);
    }

    let mut response = Response::ok();
    if let Some(ty) = &metadata.ok_response {
        response.schema_name = Some(register(generator, ty, label)?);
    }
    operation.responses.insert("200".to_string(), response);

    Ok(operation)
}

fn register(generator: &mut SchemaGenerator, ty: &ResolvedType, label: &str) -> Result<String> {
    generator
        .register(ty)
        .map_err(|err| invalid_binding(err, label))
}

/// Attach the route to a non-struct error; other errors pass through
fn invalid_binding(err: Error, label: &str) -> Error {
    match err {
        Error::NotAStruct { type_name } => Error::InvalidBinding {
            route: label.to_string(),
            reason: format!("`{}` is not a struct", type_name),
        },
        other => other,
    }
}

fn push_parameter(operation: &mut Operation, parameter: Parameter, label: &str) {
    let name = parameter.name.clone();
    let location = parameter.location;
    if operation.push_parameter(parameter) {
        debug!(
            "Route {} redeclares {} parameter `{}`, keeping the later one",
            label,
            location.as_str(),
            name
        );
    }
}

fn file_parameter(file: FileOptions) -> Parameter {
    Parameter {
        name: file.name,
        location: ParameterLocation::FormData,
        required: file.required,
        default: None,
        description: Some(file.description).filter(|d| !d.is_empty()),
        kind: ParameterKind::File,
    }
}

/// Join the application prefix, the group prefix and the route path.
///
/// Prefixes are lowercased. `:param` segments are converted to `{param}`; the result has a
/// single leading slash and no trailing slash, and the root is `/`.
pub fn normalize_path(global_prefix: Option<&str>, group: Option<&str>, path: &str) -> String {
    let prefixes = [global_prefix, group]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect::<Vec<_>>();

    let segments: Vec<String> = prefixes
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(path))
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RouteAnnotation;
    use crate::route::{Binding, HttpMethod, RouteGroup};
    use crate::Describe;
    use pretty_assertions::assert_eq;

    #[derive(Describe)]
    #[allow(dead_code)]
    pub struct SignUpUser {
        #[describe(validate = "required,isEmail", example = "john@gmail.com")]
        pub email: String,
    }

    #[derive(Describe)]
    #[allow(dead_code)]
    pub struct FindUser {
        #[describe(validate = "required", query = "name", example = "ac")]
        pub name: String,
        #[describe(query = "age")]
        pub age: u32,
    }

    #[derive(Describe)]
    #[allow(dead_code)]
    pub struct NarrowUser {
        #[describe(query = "name")]
        pub name: u8,
    }

    #[derive(Describe)]
    #[allow(dead_code)]
    pub struct PostId {
        #[describe(path = "id", validate = "required")]
        pub id: u64,
    }

    #[derive(Describe)]
    #[allow(dead_code)]
    pub struct UserView {
        pub id: u64,
    }

    #[test]
    fn test_builder_defaults() {
        let document = DocumentBuilder::new().build(&[]).unwrap();

        assert_eq!(document.info.title, "Swagger UI");
        assert_eq!(document.info.version, "1.0");
        assert_eq!(
            document.info.description.as_deref(),
            Some("This is a sample server.")
        );
        assert_eq!(
            document.info.terms_of_service.as_deref(),
            Some("http://swagger.io/terms/")
        );
        let contact = document.info.contact.unwrap();
        assert_eq!(contact.email.as_deref(), Some("support@swagger.io"));
        assert_eq!(document.info.license.unwrap().name, "Apache 2.0");
        assert_eq!(document.schemes, vec!["http", "https"]);
        assert!(document.paths.is_empty());
        assert!(document.schemas.is_empty());
    }

    #[test]
    fn test_builder_setters() {
        let builder = DocumentBuilder::new()
            .title("Swagger Document UI")
            .description("This is a document for apis")
            .version("1.0.0")
            .host("localhost:3000")
            .base_path("/api")
            .schemes(["https"])
            .server(Server::new("http://localhost:3000/api"))
            .security_scheme("Authorization", SecurityScheme::api_key_header("Authorization"));

        assert_eq!(builder.info().title, "Swagger Document UI");
        let document = builder.build(&[]).unwrap();
        assert_eq!(document.info.version, "1.0.0");
        assert_eq!(document.host.as_deref(), Some("localhost:3000"));
        assert_eq!(document.base_path.as_deref(), Some("/api"));
        assert_eq!(document.schemes, vec!["https"]);
        assert_eq!(document.servers.len(), 1);
        assert_eq!(
            document.security_schemes["Authorization"].location.as_deref(),
            Some("header")
        );
    }

    #[test]
    fn test_normalize_path_axum_style() {
        let converted = normalize_path(None, None, "/users/:id/posts/:post_id");
        assert_eq!(converted, "/users/{id}/posts/{post_id}");
    }

    #[test]
    fn test_normalize_path_with_prefixes() {
        assert_eq!(normalize_path(Some("api"), Some("Users"), ""), "/api/users");
        assert_eq!(normalize_path(None, Some("Posts"), "{id}"), "/posts/{id}");
        assert_eq!(normalize_path(None, Some("/Posts/"), "/{postId}/"), "/posts/{postId}");
        assert_eq!(normalize_path(None, None, "/users/list"), "/users/list");
    }

    #[test]
    fn test_normalize_path_root() {
        assert_eq!(normalize_path(None, None, ""), "/");
        assert_eq!(normalize_path(Some("/"), None, "//"), "/");
    }

    #[test]
    fn test_routes_share_path_items() {
        let routes = RouteGroup::new("Users")
            .annotate(RouteAnnotation::tags(["User"]))
            .annotate(RouteAnnotation::security(["authorization"]))
            .route(Route::get("").bind(Binding::query::<FindUser>()))
            .route(Route::post("").bind(Binding::body::<SignUpUser>()))
            .into_routes();

        let document = DocumentBuilder::new().build(&routes).unwrap();
        assert_eq!(document.paths.len(), 1);

        let get = document.operation("/users", HttpMethod::Get).unwrap();
        assert_eq!(get.tags, vec!["User"]);
        assert_eq!(get.security, vec![SecurityRequirement::new("authorization")]);
        assert_eq!(get.parameters.len(), 2);
        assert_eq!(get.parameters[0].name, "name");
        assert_eq!(get.parameters[0].default.as_deref(), Some("ac"));
        assert!(get.request_body.is_none());

        let post = document.operation("/users", HttpMethod::Post).unwrap();
        assert!(post.parameters.is_empty());
        assert_eq!(
            post.request_body,
            Some(RequestBody {
                schema_name: "SignUpUser".to_string()
            })
        );
        assert!(document.schemas.contains("SignUpUser"));
        assert_eq!(post.responses["200"], Response::ok());
    }

    #[test]
    fn test_add_routes_different_methods() {
        let routes: Vec<Route> = HttpMethod::ALL
            .into_iter()
            .map(|method| Route::new(method, "/resource"))
            .collect();

        let document = DocumentBuilder::new().build(&routes).unwrap();
        let path_item = &document.paths["/resource"];
        assert_eq!(path_item.operations().count(), 5);
    }

    #[test]
    fn test_later_route_wins() {
        let routes = vec![
            Route::get("/users").annotate(RouteAnnotation::tags(["First"])),
            Route::get("users/").annotate(RouteAnnotation::tags(["Second"])),
        ];

        let document = DocumentBuilder::new().build(&routes).unwrap();
        assert_eq!(document.paths.len(), 1);
        let get = document.operation("/users", HttpMethod::Get).unwrap();
        assert_eq!(get.tags, vec!["Second"]);
    }

    #[test]
    fn test_parameters_are_unique_per_location() {
        let routes = vec![Route::get("/users/:id")
            .bind(Binding::query::<FindUser>())
            .bind(Binding::query::<NarrowUser>())
            .bind(Binding::path::<PostId>())];

        let document = DocumentBuilder::new().build(&routes).unwrap();
        let get = document.operation("/users/{id}", HttpMethod::Get).unwrap();

        let names: Vec<_> = get
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location))
            .collect();
        assert_eq!(
            names,
            vec![
                ("name", ParameterLocation::Query),
                ("age", ParameterLocation::Query),
                ("id", ParameterLocation::Path),
            ]
        );
        assert!(!get.parameters[0].required);
        assert!(get.parameters[2].required);
    }

    #[test]
    fn test_file_annotation() {
        let routes = RouteGroup::new("Posts")
            .route(
                Route::post("")
                    .annotate(RouteAnnotation::consumes(["multipart/form-data"]))
                    .annotate(RouteAnnotation::files([FileOptions::new("file")
                        .required(true)
                        .description("file upload")])),
            )
            .into_routes();

        let document = DocumentBuilder::new().build(&routes).unwrap();
        let post = document.operation("/posts", HttpMethod::Post).unwrap();

        assert_eq!(post.consumes, vec!["multipart/form-data"]);
        assert_eq!(
            post.parameters,
            vec![Parameter {
                name: "file".to_string(),
                location: ParameterLocation::FormData,
                required: true,
                default: None,
                description: Some("file upload".to_string()),
                kind: ParameterKind::File,
            }]
        );
    }

    #[test]
    fn test_ok_response_is_registered() {
        let routes = vec![Route::get("/users/{id}")
            .bind(Binding::path::<PostId>())
            .annotate(RouteAnnotation::ok_response::<UserView>())];

        let document = DocumentBuilder::new().build(&routes).unwrap();
        let get = document.operation("/users/{id}", HttpMethod::Get).unwrap();
        assert_eq!(get.responses["200"].schema_name.as_deref(), Some("UserView"));
        assert!(document.schemas.contains("UserView"));
    }

    #[test]
    fn test_absent_binding_fails() {
        let routes = vec![Route::post("/auth").bind(Binding::absent(BindingLocation::Body))];

        let err = DocumentBuilder::new().build(&routes).unwrap_err();
        match err {
            Error::InvalidBinding { route, reason } => {
                assert_eq!(route, "POST /auth");
                assert!(reason.contains("body"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_struct_binding_fails() {
        let routes = vec![Route::get("/users").bind(Binding::query::<Vec<String>>())];

        let err = DocumentBuilder::new().build(&routes).unwrap_err();
        assert!(matches!(err, Error::InvalidBinding { route, .. } if route == "GET /users"));
    }

    #[test]
    fn test_build_is_repeatable() {
        let routes = vec![
            Route::post("/auth").bind(Binding::body::<SignUpUser>()),
            Route::get("/users").bind(Binding::query::<FindUser>()),
        ];
        let builder = DocumentBuilder::new().global_prefix("API");

        let first = builder.build(&routes).unwrap();
        let second = builder.build(&routes).unwrap();
        assert_eq!(first, second);
        assert!(first.paths.contains_key("/api/auth"));
    }
}
