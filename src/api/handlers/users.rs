//! User CRUD and membership-query handlers.
//!
//! Reads key users by name (the GET path segment is passed verbatim to the
//! repository lookup); deletes key by UUID. Each handler performs exactly one
//! repository call.

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
pub struct UserEnvsRequest {
    pub name: String,
}

#[utoipa::path(
    post,
    path= "/user/",
    request_body = User,
    responses (
        (status = 200, description = "User created, returns its identifier", body = String),
        (status = 400, description = "Missing or undecodable JSON body", body = ErrorResponse),
    ),
    tag= "users"
)]
#[instrument(skip(repo, payload))]
pub async fn create_user(
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<User>>,
) -> Response {
    let Some(Json(user)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    match repo.add_upd_user(&user).await {
        Ok(id) => json_response(StatusCode::OK, &id),
        Err(err) => repo_error_response("add_upd_user", &err),
    }
}

#[utoipa::path(
    get,
    path= "/user/{uid}",
    params(
        ("uid" = String, Path, description = "User name to look up")
    ),
    responses (
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    tag= "users"
)]
#[instrument(skip(repo))]
pub async fn get_user(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
) -> Response {
    match repo.get_user(&uid).await {
        Ok(user) => {
            debug!("get_user = {:?}", user);

            json_response(StatusCode::OK, &user)
        }
        Err(err) => repo_error_response("get_user", &err),
    }
}

#[utoipa::path(
    put,
    path= "/user/{uid}",
    request_body = User,
    params(
        ("uid" = Uuid, Path, description = "User identifier")
    ),
    responses (
        (status = 200, description = "User updated, returns its identifier", body = String),
        (status = 400, description = "Invalid identifier or JSON body", body = ErrorResponse),
    ),
    tag= "users"
)]
#[instrument(skip(repo, payload))]
pub async fn update_user(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<User>>,
) -> Response {
    let Ok(id) = Uuid::parse_str(uid.trim()) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid user identifier");
    };

    let Some(Json(mut user)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    // The path identifier wins over whatever the body carries
    user.id = Some(id);

    match repo.add_upd_user(&user).await {
        Ok(id) => json_response(StatusCode::OK, &id),
        Err(err) => repo_error_response("add_upd_user", &err),
    }
}

#[utoipa::path(
    delete,
    path= "/user/{uid}",
    params(
        ("uid" = Uuid, Path, description = "User identifier")
    ),
    responses (
        (status = 200, description = "User deleted", body = String),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    tag= "users"
)]
#[instrument(skip(repo))]
pub async fn delete_user(
    Path(uid): Path<String>,
    Extension(repo): Extension<DynRepository>,
) -> Response {
    let Ok(id) = Uuid::parse_str(uid.trim()) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid user identifier");
    };

    match repo.del_user(id).await {
        Ok(()) => json_response(StatusCode::OK, &""),
        Err(err) => repo_error_response("del_user", &err),
    }
}

#[utoipa::path(
    post,
    path= "/user/envs",
    request_body = UserEnvsRequest,
    responses (
        (status = 200, description = "Environments the named user belongs to", body = [Environment]),
        (status = 400, description = "Missing or undecodable JSON body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    tag= "users"
)]
#[instrument(skip(repo, payload))]
pub async fn user_envs(
    Extension(repo): Extension<DynRepository>,
    payload: Option<Json<UserEnvsRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid or missing JSON body");
    };

    match repo.get_user_envs(&request.name).await {
        Ok(envs) => {
            debug!("get_user_envs({}) = {:?}", request.name, envs);

            json_response(StatusCode::OK, &envs)
        }
        Err(err) => repo_error_response("get_user_envs", &err),
    }
}
