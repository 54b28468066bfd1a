//! Domain entities shared by the HTTP layer and the repository.
//!
//! Identifiers are assigned by the repository on first upsert, so `id` is
//! optional on the wire. Optional fields that are absent from a request stay
//! absent when the entity is serialized back, which keeps decode/encode
//! round-trips lossless.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_all_fields() {
        let input = r#"{"id":"0a8ff751-4c70-44cf-a7a4-13e7fd10e2ac","name":"alice","password":"x"}"#;
        let user: User = serde_json::from_str(input).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.password.as_deref(), Some("x"));

        let output = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&output).unwrap();
        assert_eq!(user, back);
    }

    #[test]
    fn user_absent_fields_stay_absent() {
        let user: User = serde_json::from_str(r#"{"name":"bob"}"#).unwrap();
        assert_eq!(user.id, None);
        assert_eq!(user.password, None);

        let output = serde_json::to_string(&user).unwrap();
        assert_eq!(output, r#"{"name":"bob"}"#);
    }

    #[test]
    fn environment_round_trips() {
        let env: Environment = serde_json::from_str(r#"{"title":"staging"}"#).unwrap();
        assert_eq!(env.title, "staging");

        let output = serde_json::to_string(&env).unwrap();
        let back: Environment = serde_json::from_str(&output).unwrap();
        assert_eq!(env, back);
    }
}
