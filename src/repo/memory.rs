//! In-memory repository.
//!
//! Backs the integration tests and embedded use. A single membership set
//! keeps the user/environment relation bidirectionally consistent: both
//! membership queries are answered from the same pairs.

use crate::{
    model::{Environment, User},
    repo::{RepoError, Repository},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    envs: HashMap<Uuid, Environment>,
    memberships: HashSet<(Uuid, Uuid)>,
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a user to an environment by name and title.
    ///
    /// # Errors
    /// Returns `NotFound` if either side does not exist.
    pub async fn link(&self, name: &str, title: &str) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        let user_id = inner
            .users
            .values()
            .find(|user| user.name == name)
            .and_then(|user| user.id)
            .ok_or(RepoError::NotFound)?;

        let env_id = inner
            .envs
            .values()
            .find(|env| env.title == title)
            .and_then(|env| env.id)
            .ok_or(RepoError::NotFound)?;

        inner.memberships.insert((user_id, env_id));

        Ok(())
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn auth_user(&self, user: &User) -> Result<String, RepoError> {
        let inner = self.inner.read().await;

        inner
            .users
            .values()
            .find(|stored| {
                stored.name == user.name
                    && stored.password.is_some()
                    && stored.password == user.password
            })
            .and_then(|stored| stored.id)
            .map(|id| id.to_string())
            .ok_or(RepoError::Unauthorized)
    }

    async fn get_user(&self, name: &str) -> Result<User, RepoError> {
        let inner = self.inner.read().await;

        inner
            .users
            .values()
            .find(|user| user.name == name)
            .map(|user| User {
                id: user.id,
                name: user.name.clone(),
                password: None,
            })
            .ok_or(RepoError::NotFound)
    }

    async fn add_upd_user(&self, user: &User) -> Result<String, RepoError> {
        let mut inner = self.inner.write().await;

        let id = user.id.unwrap_or_else(Uuid::new_v4);
        let previous = inner.users.get(&id).and_then(|u| u.password.clone());

        inner.users.insert(
            id,
            User {
                id: Some(id),
                name: user.name.clone(),
                password: user.password.clone().or(previous),
            },
        );

        Ok(id.to_string())
    }

    async fn del_user(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        if inner.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        inner.memberships.retain(|(user_id, _)| *user_id != id);

        Ok(())
    }

    async fn get_user_envs(&self, name: &str) -> Result<Vec<Environment>, RepoError> {
        let inner = self.inner.read().await;

        let user_id = inner
            .users
            .values()
            .find(|user| user.name == name)
            .and_then(|user| user.id)
            .ok_or(RepoError::NotFound)?;

        let mut envs: Vec<Environment> = inner
            .memberships
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, env_id)| inner.envs.get(env_id).cloned())
            .collect();
        envs.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(envs)
    }

    async fn add_upd_env(&self, env: &Environment) -> Result<String, RepoError> {
        let mut inner = self.inner.write().await;

        let id = env.id.unwrap_or_else(Uuid::new_v4);
        inner.envs.insert(
            id,
            Environment {
                id: Some(id),
                title: env.title.clone(),
            },
        );

        Ok(id.to_string())
    }

    async fn get_env(&self, title: &str) -> Result<Environment, RepoError> {
        let inner = self.inner.read().await;

        inner
            .envs
            .values()
            .find(|env| env.title == title)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn del_env(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        if inner.envs.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        inner.memberships.retain(|(_, env_id)| *env_id != id);

        Ok(())
    }

    async fn get_env_users(&self, title: &str) -> Result<Vec<User>, RepoError> {
        let inner = self.inner.read().await;

        let env_id = inner
            .envs
            .values()
            .find(|env| env.title == title)
            .and_then(|env| env.id)
            .ok_or(RepoError::NotFound)?;

        let mut users: Vec<User> = inner
            .memberships
            .iter()
            .filter(|(_, eid)| *eid == env_id)
            .filter_map(|(user_id, _)| inner.users.get(user_id))
            .map(|user| User {
                id: user.id,
                name: user.name.clone(),
                password: None,
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(users)
    }

    async fn close(&self) {}
}
