//! Environment CRUD and membership-query handlers, mirroring the user side.

use crate::{
    api::{
        handlers::repo_error_response,
        response::{error_response, json_response, ErrorResponse},
    },
    model::{Environment, User},
    repo::DynRepository,
};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct EnvUsersRequest {
    pub title: String,
}

#[utoipa::path(
    post,
    path= "/env/",
    request_body = Environment,
    responses (
        (status = 200, description = "Environment created, returns its identifier", body = String),
        (status = 400, description = "Missing or undecodable JSON body", body = ErrorResponse),
    ),
    tag= "environments"
)]
#[instrument(skip(repo, payload))]
pub async fn create_env(
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<Environment>>,
) -> Response {
    let Some(Json(env)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    match repo.add_upd_env(&env).await {
        Ok(id) => json_response(StatusCode::OK, &id),
        Err(err) => repo_error_response("add_upd_env", &err),
    }
}

#[utoipa::path(
    get,
    path= "/env/{uid}",
    params(
        ("uid" = String, Path, description = "Environment title to look up")
    ),
    responses (
        (status = 200, description = "Environment found", body = Environment),
        (status = 404, description = "Environment not found", body = ErrorResponse),
    ),
    tag= "environments"
)]
#[instrument(skip(repo))]
pub async fn get_env(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
) -> Response {
    match repo.get_env(&uid).await {
        Ok(env) => {
            debug!("get_env = {:?}", env);

            json_response(StatusCode::OK, &env)
        }
        Err(err) => repo_error_response("get_env", &err),
    }
}

#[utoipa::path(
    put,
    path= "/env/{uid}",
    request_body = Environment,
    params(
        ("uid" = Uuid, Path, description = "Environment identifier")
    ),
    responses (
        (status = 200, description = "Environment updated, returns its identifier", body = String),
        (status = 400, description = "Invalid identifier or JSON body", body = ErrorResponse),
    ),
    tag= "environments"
)]
#[instrument(skip(repo, payload))]
pub async fn update_env(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<Environment>>,
) -> Response {
    let Ok(id) = Uuid::parse_str(uid.trim()) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid environment identifier");
    };

    let Some(Json(mut env)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    // The path identifier wins over whatever the body carries
    env.id = Some(id);

    match repo.add_upd_env(&env).await {
        Ok(id) => json_response(StatusCode::OK, &id),
        Err(err) => repo_error_response("add_upd_env", &err),
    }
}

#[utoipa::path(
    delete,
    path= "/env/{uid}",
    params(
        ("uid" = Uuid, Path, description = "Environment identifier")
    ),
    responses (
        (status = 200, description = "Environment deleted", body = String),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Environment not found", body = ErrorResponse),
    ),
    tag= "environments"
)]
#[instrument(skip(repo))]
pub async fn delete_env(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
) -> Response {
    let Ok(id) = Uuid::parse_str(uid.trim()) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid environment identifier");
    };

    match repo.del_env(id).await {
        Ok(()) => json_response(StatusCode::OK, &""),
        Err(err) => repo_error_response("del_env", &err),
    }
}

#[utoipa::path(
    post,
    path= "/env/users",
    request_body = EnvUsersRequest,
    responses (
        (status = 200, description = "Users belonging to the titled environment", body = [User]),
        (status = 400, description = "Missing or undecodable JSON body", body = ErrorResponse),
        (status = 404, description = "Environment not found", body = ErrorResponse),
    ),
    tag= "environments"
)]
#[instrument(skip(repo, payload))]
pub async fn env_users(
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<EnvUsersRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    match repo.get_env_users(&request.title).await {
        Ok(users) => {
            debug!("get_env_users({}) = {:?}", request.title, users);

            json_response(StatusCode::OK, &users)
        }
        Err(err) => repo_error_response("get_env_users", &err),
    }
}
