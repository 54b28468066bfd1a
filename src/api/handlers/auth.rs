use crate::{
    api::{
        handlers::repo_error_response,
        response::{error_response, json_response, ErrorResponse},
    },
    model::User,
    repo::DynRepository,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Json, Response},
};
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/user/auth",
    request_body = User,
    responses (
        (status = 200, description = "Authentication successful, returns the user identifier", body = String),
        (status = 400, description = "Missing or undecodable JSON body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    ),
    tag= "users"
)]
// axum handler for user authentication
#[instrument(skip(repo, payload))]
pub async fn auth(
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<User>>,
) -> Response {
    // A missing body or a non-JSON content type never reaches the repository
    let Some(Json(user)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    match repo.auth_user(&user).await {
        Ok(id) => {
            debug!("user {} logged in", user.name);

            json_response(StatusCode::OK, &id)
        }
        Err(err) => repo_error_response("auth_user", &err),
    }
}
