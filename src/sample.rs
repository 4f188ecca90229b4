//! Routes of the bundled sample application: auth, users and posts controllers.

use routedoc::metadata::{FileOptions, RouteAnnotation};
use routedoc::route::{Binding, Route, RouteGroup};
use routedoc::Describe;

#[derive(Describe)]
#[allow(dead_code)]
pub struct SignUpUser {
    #[describe(validate = "isAlpha", example = "John")]
    pub name: String,
    #[describe(validate = "required,isEmail", example = "john@gmail.com")]
    pub email: String,
    #[describe(validate = "required,isStrongPassword", example = "12345678@Tc")]
    pub password: String,
    #[describe(validate = "required", example = "2024-12-12")]
    pub birth: chrono::DateTime<chrono::Utc>,
}

#[derive(Describe)]
#[allow(dead_code)]
pub struct FindUser {
    #[describe(validate = "required,isAlpha", query = "name", example = "ac")]
    pub name: String,
    #[describe(validate = "required,isInt", query = "age")]
    pub age: u32,
}

#[derive(Describe)]
#[allow(dead_code)]
pub struct PostId {
    #[describe(validate = "required", path = "id")]
    pub id: u64,
}

fn auth_controller() -> RouteGroup {
    RouteGroup::new("Auth")
        .annotate(RouteAnnotation::tags(["Auth"]))
        .route(Route::post("").bind(Binding::body::<SignUpUser>()))
}

fn users_controller() -> RouteGroup {
    RouteGroup::new("Users")
        .annotate(RouteAnnotation::tags(["User"]))
        .annotate(RouteAnnotation::security(["authorization"]))
        .route(Route::get("").bind(Binding::query::<FindUser>()))
        .route(Route::post("").bind(Binding::body::<SignUpUser>()))
}

fn posts_controller() -> RouteGroup {
    RouteGroup::new("Posts")
        .annotate(RouteAnnotation::tags(["Post"]))
        .route(
            Route::post("")
                .annotate(RouteAnnotation::consumes(["multipart/form-data"]))
                .annotate(RouteAnnotation::files([FileOptions::new("file")
                    .required(true)
                    .description("file upload")])),
        )
        .route(Route::get(""))
        .route(Route::get("{id}").bind(Binding::path::<PostId>()))
        .route(Route::put("{id}").bind(Binding::path::<PostId>()))
        .route(Route::delete("{id}").bind(Binding::path::<PostId>()))
}

/// Every route of the sample application, in registration order
pub fn routes() -> Vec<Route> {
    [auth_controller(), users_controller(), posts_controller()]
        .into_iter()
        .flat_map(RouteGroup::into_routes)
        .collect()
}
