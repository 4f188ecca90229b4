// Sample application shared by the integration tests

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
pub struct UserView {
    pub id: u64,
    pub name: String,
}

pub fn routes() -> Vec<Route> {
    let auth = RouteGroup::new("Auth")
        .annotate(RouteAnnotation::tags(["Auth"]))
        .route(Route::post("").bind(Binding::body::<SignUpUser>()));

    let users = RouteGroup::new("Users")
        .annotate(RouteAnnotation::tags(["User"]))
        .annotate(RouteAnnotation::security(["authorization"]))
        .route(Route::get("").bind(Binding::query::<FindUser>()))
        .route(Route::post("").bind(Binding::body::<SignUpUser>()))
        .route(Route::get("me").annotate(RouteAnnotation::ok_response::<UserView>()));

    let posts = RouteGroup::new("Posts")
        .annotate(RouteAnnotation::tags(["Post"]))
        .route(
            Route::post("")
                .annotate(RouteAnnotation::consumes(["multipart/form-data"]))
                .annotate(RouteAnnotation::files([FileOptions::new("file")
                    .required(true)
                    .description("file upload")])),
        )
        .route(Route::get(""))
        .route(Route::get("{id}"))
        .route(Route::put("{id}"))
        .route(Route::delete(":id"));

    [auth, users, posts]
        .into_iter()
        .flat_map(RouteGroup::into_routes)
        .collect()
}
