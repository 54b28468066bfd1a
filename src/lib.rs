//! # Ambienti
//!
//! `ambienti` is an HTTP service exposing CRUD endpoints for users and
//! environments plus the membership queries between them.
//!
//! ## Membership model
//!
//! Users and environments form a many-to-many relation owned entirely by the
//! [`repo::Repository`] collaborator. The HTTP layer holds no state across
//! requests; querying a user's environments and an environment's users is
//! always answered from the same underlying membership relation.
//!
//! ## Repository boundary
//!
//! All persistence and authentication goes through the [`repo::Repository`]
//! trait. The server wires in the Postgres implementation; the in-memory
//! implementation backs the integration tests and any embedded use.

pub mod api;
pub mod cli;
pub mod model;
pub mod repo;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
