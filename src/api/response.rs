//! JSON response helpers shared by all handlers.
//!
//! Success and error payloads go through the same serializer: marshal the
//! payload, set `Content-Type: application/json` and terminate the body with
//! a newline. A marshal failure is answered with a plain 500 diagnostic
//! instead of the payload.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serialize `payload` and write it with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(mut body) => {
            body.push(b'\n');

            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("can't marshal data: {err}"),
        )
            .into_response(),
    }
}

/// Write an error envelope with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::Serializer;

    struct Failing;

    impl Serialize for Failing {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(serde::ser::Error::custom("boom"))
        }
    }

    #[tokio::test]
    async fn writes_json_with_trailing_newline() {
        let response = json_response(StatusCode::OK, &"some-id");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"\"some-id\"\n");
    }

    #[tokio::test]
    async fn marshal_failure_is_a_500_diagnostic() {
        let response = json_response(StatusCode::OK, &Failing);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("can't marshal data:"));
    }

    #[tokio::test]
    async fn error_envelope_shape() {
        let response = error_response(StatusCode::NOT_FOUND, "user not found");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error, "user not found");
    }
}
