pub mod health;
pub use self::health::health;

pub mod auth;
pub use self::auth::auth;

pub mod users;

pub mod envs;

// common functions for the handlers
use crate::{
    api::response::error_response,
    repo::RepoError,
};
use axum::{http::StatusCode, response::Response};
use tracing::error;

/// Map a repository error to the HTTP error envelope.
pub(crate) fn repo_error_response(operation: &str, err: &RepoError) -> Response {
    match err {
        RepoError::NotFound => error_response(StatusCode::NOT_FOUND, "not found"),
        RepoError::Unauthorized => {
            error_response(StatusCode::UNAUTHORIZED, "invalid credentials")
        }
        RepoError::Database(db_err) => {
            error!("{operation} failed: {db_err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
