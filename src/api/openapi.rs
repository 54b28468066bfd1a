use crate::{
    api::response::ErrorResponse,
    model::{Environment, User},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::auth::auth,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::users::user_envs,
        crate::api::handlers::envs::create_env,
        crate::api::handlers::envs::get_env,
        crate::api::handlers::envs::update_env,
        crate::api::handlers::envs::delete_env,
        crate::api::handlers::envs::env_users,
    ),
    components(schemas(
        User,
        Environment,
        ErrorResponse,
        crate::api::handlers::users::UserEnvsRequest,
        crate::api::handlers::envs::EnvUsersRequest,
    )),
    tags(
        (name = "users", description = "User CRUD and authentication"),
        (name = "environments", description = "Environment CRUD and membership"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

/// Generated OpenAPI document for the service routes.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_route_table() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/user/auth",
            "/user/",
            "/user/{uid}",
            "/user/envs",
            "/env/",
            "/env/{uid}",
            "/env/users",
            "/health",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
