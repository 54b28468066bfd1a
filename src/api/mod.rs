//! HTTP façade: route table, server loop and request spans.
//!
//! Each route binds to one handler, each handler makes exactly one
//! [`crate::repo::Repository`] call and writes the result through the JSON
//! helpers in [`response`].

use crate::repo::{DynRepository, PgRepository};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub(crate) mod handlers;
pub mod response;

mod openapi;
pub use openapi::openapi;

/// Build the application router around a repository.
#[must_use]
pub fn router(repo: DynRepository) -> Router {
    Router::new()
        // authorization
        .route("/user/auth", post(handlers::auth))
        // user crud
        .route("/user/", post(handlers::users::create_user))
        .route("/user/envs", post(handlers::users::user_envs))
        .route(
            "/user/:uid",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        // env crud
        .route("/env/", post(handlers::envs::create_env))
        .route("/env/users", post(handlers::envs::env_users))
        .route(
            "/env/:uid",
            get(handlers::envs::get_env)
                .put(handlers::envs::update_env)
                .delete(handlers::envs::delete_env),
        )
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(repo)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String) -> Result<()> {
    // Connect to database
    let repo: DynRepository = Arc::new(
        PgRepository::connect(&dsn)
            .await
            .context("Failed to connect to database")?,
    );

    let app = router(repo.clone());

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    repo.close().await;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
