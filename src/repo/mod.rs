//! Repository boundary for users, environments and their membership.
//!
//! The HTTP layer only sees this trait; any implementation (Postgres,
//! in-memory) satisfies it. Every method is driven by the request future, so
//! a client disconnect drops the future and aborts in-flight work.

use crate::model::{Environment, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryRepository;
pub use self::postgres::PgRepository;

/// Shared handle the router layers into every handler.
pub type DynRepository = Arc<dyn Repository>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not found")]
    NotFound,

    #[error("invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Authenticate a user, returning its identifier.
    async fn auth_user(&self, user: &User) -> Result<String, RepoError>;

    /// Fetch a user by name.
    async fn get_user(&self, name: &str) -> Result<User, RepoError>;

    /// Insert or update a user, returning its identifier.
    async fn add_upd_user(&self, user: &User) -> Result<String, RepoError>;

    /// Delete a user by identifier.
    async fn del_user(&self, id: Uuid) -> Result<(), RepoError>;

    /// Environments the named user is a member of.
    async fn get_user_envs(&self, name: &str) -> Result<Vec<Environment>, RepoError>;

    /// Insert or update an environment, returning its identifier.
    async fn add_upd_env(&self, env: &Environment) -> Result<String, RepoError>;

    /// Fetch an environment by title.
    async fn get_env(&self, title: &str) -> Result<Environment, RepoError>;

    /// Delete an environment by identifier.
    async fn del_env(&self, id: Uuid) -> Result<(), RepoError>;

    /// Users that are members of the titled environment.
    async fn get_env_users(&self, title: &str) -> Result<Vec<User>, RepoError>;

    /// Release underlying resources.
    async fn close(&self);
}
