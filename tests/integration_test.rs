#[path = "fixtures/sample_app.rs"]
mod sample_app;

use pretty_assertions::assert_eq;
use routedoc::document::{SecurityScheme, Server};
use routedoc::openapi_builder::DocumentBuilder;
use routedoc::route::{Binding, HttpMethod, Route};
use routedoc::serializer::{serialize_json, serialize_yaml, to_value, write_to_file};
use routedoc::shape::DocumentShape;
use routedoc::{Describe, Document};
use serde_json::{json, Value};
use tempfile::TempDir;

fn build_document() -> Document {
    DocumentBuilder::new()
        .title("Swagger Document UI")
        .description("This is a document for apis")
        .version("1.0.0")
        .host("localhost:3000")
        .base_path("/api")
        .security_scheme("Authorization", SecurityScheme::api_key_header("Authorization"))
        .build(&sample_app::routes())
        .expect("Failed to build document")
}

/// Every `$ref` found anywhere under `value`
fn collect_refs(value: &Value, refs: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("$ref", Value::String(reference)) => refs.push(reference.clone()),
                    _ => collect_refs(child, refs),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_refs(item, refs)),
        _ => {}
    }
}

fn assert_refs_resolve(value: &Value) -> usize {
    let mut refs = Vec::new();
    collect_refs(value, &mut refs);
    for reference in &refs {
        let pointer = reference.trim_start_matches('#');
        assert!(
            value.pointer(pointer).is_some(),
            "Unresolved reference {}",
            reference
        );
    }
    refs.len()
}

#[test]
fn test_document_model() {
    let document = build_document();

    let paths: Vec<_> = document.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/auth", "/users", "/users/me", "/posts", "/posts/{id}"]);

    let posts = &document.paths["/posts/{id}"];
    assert!(posts.get.is_some());
    assert!(posts.put.is_some());
    assert!(posts.delete.is_some());
    assert!(posts.post.is_none());

    let names: Vec<_> = document.schemas.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["SignUpUser", "UserView"]);

    let signup = document.schemas.get("SignUpUser").expect("SignUpUser schema");
    assert_eq!(signup.required, vec!["email", "password", "birth"]);

    let find = document
        .operation("/users", HttpMethod::Get)
        .expect("GET /users");
    assert_eq!(find.parameters.len(), 2);
}

#[test]
fn test_swagger2_end_to_end_generation() {
    let document = build_document();
    let value = to_value(&document, DocumentShape::Swagger2).expect("Failed to encode");

    assert_eq!(value["swagger"], "2.0");
    assert_eq!(
        value["info"],
        json!({
            "title": "Swagger Document UI",
            "description": "This is a document for apis",
            "version": "1.0.0",
            "termsOfService": "http://swagger.io/terms/",
            "contact": {
                "name": "API Support",
                "url": "http://www.swagger.io/support",
                "email": "support@swagger.io"
            },
            "license": {
                "name": "Apache 2.0",
                "url": "http://www.apache.org/licenses/LICENSE-2.0.html"
            }
        })
    );
    assert_eq!(value["schemes"], json!(["http", "https"]));
    assert_eq!(value["host"], "localhost:3000");
    assert_eq!(value["basePath"], "/api");
    assert_eq!(
        value["securityDefinitions"],
        json!({"Authorization": {"type": "apiKey", "name": "Authorization", "in": "header"}})
    );

    let paths = value["paths"].as_object().expect("paths object");
    assert_eq!(paths.len(), 5);

    let auth = &value["paths"]["/auth"]["post"];
    assert_eq!(auth["tags"], json!(["Auth"]));
    assert_eq!(auth["parameters"][0]["name"], "SignUpUser");
    assert_eq!(auth["parameters"][0]["in"], "body");
    assert_eq!(auth["parameters"][0]["required"], false);
    assert_eq!(
        auth["parameters"][0]["schema"]["$ref"],
        "#/definitions/signUpUser"
    );
    assert!(auth.get("security").is_none());
    assert!(auth.get("consumes").is_none());
    assert_eq!(auth["responses"]["200"]["description"], "Ok");

    let users = &value["paths"]["/users"];
    assert_eq!(users["get"]["tags"], json!(["User"]));
    assert_eq!(users["post"]["tags"], json!(["User"]));
    assert_eq!(users["post"]["security"], json!([{"authorization": []}]));
    assert_eq!(
        users["get"]["parameters"],
        json!([
            {"name": "name", "in": "query", "required": true, "type": "string", "default": "ac"},
            {"name": "age", "in": "query", "required": true, "type": "integer"}
        ])
    );

    let upload = &value["paths"]["/posts"]["post"];
    assert_eq!(upload["tags"], json!(["Post"]));
    assert_eq!(upload["consumes"], json!(["multipart/form-data"]));
    assert_eq!(
        upload["parameters"][0],
        json!({
            "name": "file",
            "in": "formData",
            "description": "file upload",
            "required": true,
            "type": "file"
        })
    );

    assert_eq!(
        value["definitions"]["signUpUser"]["properties"]["birth"],
        json!({"type": "string", "example": "2024-12-12", "format": "date-time"})
    );
    assert_eq!(
        value["paths"]["/users/me"]["get"]["responses"]["200"]["schema"]["$ref"],
        "#/definitions/userView"
    );
}

#[test]
fn test_openapi3_end_to_end_generation() {
    let document = build_document();
    let value = to_value(&document, DocumentShape::OpenApi3).expect("Failed to encode");

    assert_eq!(value["openapi"], "3.0.0");
    assert!(value.get("swagger").is_none());
    assert!(value.get("definitions").is_none());
    assert_eq!(value["servers"], json!([{"url": "http://localhost:3000/api"}]));

    let auth = &value["paths"]["/auth"]["post"];
    assert_eq!(
        auth["requestBody"]["content"]["SignUpUser"]["schema"]["$ref"],
        "#/components/schemas/SignUpUser"
    );
    assert!(auth.get("parameters").is_none());

    assert_eq!(
        value["paths"]["/users"]["get"]["parameters"][0],
        json!({
            "name": "name",
            "in": "query",
            "required": true,
            "schema": {"type": "string", "default": "ac"}
        })
    );
    assert_eq!(
        value["paths"]["/posts"]["post"]["parameters"][0]["schema"],
        json!({"type": "file"})
    );
    assert_eq!(
        value["paths"]["/users/me"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"]["$ref"],
        "#/components/schemas/UserView"
    );

    let components = &value["components"];
    assert!(components["schemas"].get("SignUpUser").is_some());
    assert!(components["securitySchemes"].get("Authorization").is_some());
}

#[test]
fn test_references_resolve_in_both_shapes() {
    let document = build_document();

    for shape in [DocumentShape::Swagger2, DocumentShape::OpenApi3] {
        let value = to_value(&document, shape).expect("Failed to encode");
        let count = assert_refs_resolve(&value);
        assert_eq!(count, 3, "{:?} should carry three references", shape);
    }
}

#[derive(Describe)]
#[allow(dead_code)]
pub struct Page<T> {
    #[describe(validate = "nested")]
    pub item: T,
}

#[derive(Describe)]
#[allow(dead_code)]
pub struct Post {
    pub title: String,
}

#[test]
fn test_generic_bodies_reference_their_own_schema() {
    let routes = vec![
        Route::post("/users").bind(Binding::body::<Page<sample_app::UserView>>()),
        Route::post("/posts").bind(Binding::body::<Page<Post>>()),
    ];
    let document = DocumentBuilder::new()
        .build(&routes)
        .expect("Failed to build document");

    for shape in [DocumentShape::Swagger2, DocumentShape::OpenApi3] {
        let value = to_value(&document, shape).expect("Failed to encode");
        assert_eq!(assert_refs_resolve(&value), 2);
    }

    let value = to_value(&document, DocumentShape::OpenApi3).expect("Failed to encode");
    assert_eq!(
        value["paths"]["/users"]["post"]["requestBody"]["content"]["Page_UserView"]["schema"]
            ["$ref"],
        "#/components/schemas/Page_UserView"
    );
    let schemas = &value["components"]["schemas"];
    assert!(schemas["Page_UserView"]["properties"]["item"]["properties"]
        .get("id")
        .is_some());
    assert!(schemas["Page_Post"]["properties"]["item"]["properties"]
        .get("title")
        .is_some());
}

#[test]
fn test_configured_servers_win() {
    let document = DocumentBuilder::new()
        .host("localhost:3000")
        .server(Server::new("https://api.example.com/v1"))
        .build(&sample_app::routes())
        .expect("Failed to build document");

    let value = to_value(&document, DocumentShape::OpenApi3).expect("Failed to encode");
    assert_eq!(value["servers"], json!([{"url": "https://api.example.com/v1"}]));
}

#[test]
fn test_build_is_repeatable() {
    let routes = sample_app::routes();
    let builder = DocumentBuilder::new().global_prefix("api");

    let first = builder.build(&routes).expect("first build");
    let second = builder.build(&routes).expect("second build");

    assert_eq!(first, second);
    assert_eq!(
        serialize_json(&first, DocumentShape::OpenApi3).unwrap(),
        serialize_json(&second, DocumentShape::OpenApi3).unwrap()
    );
    assert!(first.paths.contains_key("/api/posts/{id}"));
}

#[test]
fn test_yaml_serialization_format() {
    let document = build_document();
    let yaml = serialize_yaml(&document, DocumentShape::Swagger2).expect("Failed to serialize");

    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("Invalid YAML");
    assert_eq!(parsed["swagger"], serde_yaml::Value::from("2.0"));
    assert_eq!(parsed["info"]["title"], serde_yaml::Value::from("Swagger Document UI"));
    assert!(parsed["paths"]["/posts/{id}"]["delete"].is_mapping());
}

#[test]
fn test_json_written_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("docs").join("openapi.json");

    let document = build_document();
    let json = serialize_json(&document, DocumentShape::OpenApi3).expect("Failed to serialize");
    write_to_file(&json, &path).expect("Failed to write document");

    let content = std::fs::read_to_string(&path).expect("Failed to read document");
    let parsed: Value = serde_json::from_str(&content).expect("Invalid JSON");
    assert_eq!(parsed["info"]["title"], "Swagger Document UI");
}
