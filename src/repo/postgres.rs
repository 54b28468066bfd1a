//! Postgres-backed repository.
//!
//! Schema lives in `sql/schema.sql`: `users`, `environments` and the
//! `user_environments` join table (cascading deletes keep the membership
//! relation consistent when either side goes away).

use crate::{
    model::{Environment, User},
    repo::{RepoError, Repository},
};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Connect to the database and build the repository.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be established.
    pub async fn connect(dsn: &str) -> Result<Self, RepoError> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await?;

        Ok(Self { pool })
    }

    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn auth_user(&self, user: &User) -> Result<String, RepoError> {
        let Some(password) = user.password.as_deref() else {
            return Err(RepoError::Unauthorized);
        };

        let row = sqlx::query("SELECT id FROM users WHERE name = $1 AND password = $2")
            .bind(&user.name)
            .bind(password)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row.get::<Uuid, _>("id").to_string())
            .ok_or(RepoError::Unauthorized)
    }

    async fn get_user(&self, name: &str) -> Result<User, RepoError> {
        let row = sqlx::query("SELECT id, name FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| User {
            id: Some(row.get("id")),
            name: row.get("name"),
            password: None,
        })
        .ok_or(RepoError::NotFound)
    }

    async fn add_upd_user(&self, user: &User) -> Result<String, RepoError> {
        let id = user.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query(
            r"
            INSERT INTO users (id, name, password)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                password = COALESCE(EXCLUDED.password, users.password)
            RETURNING id
            ",
        )
        .bind(id)
        .bind(&user.name)
        .bind(user.password.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<Uuid, _>("id").to_string())
    }

    async fn del_user(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn get_user_envs(&self, name: &str) -> Result<Vec<Environment>, RepoError> {
        let user = sqlx::query("SELECT id FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)?;

        let rows = sqlx::query(
            r"
            SELECT e.id, e.title
            FROM environments e
            JOIN user_environments m ON m.environment_id = e.id
            WHERE m.user_id = $1
            ORDER BY e.title
            ",
        )
        .bind(user.get::<Uuid, _>("id"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Environment {
                id: Some(row.get("id")),
                title: row.get("title"),
            })
            .collect())
    }

    async fn add_upd_env(&self, env: &Environment) -> Result<String, RepoError> {
        let id = env.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query(
            r"
            INSERT INTO environments (id, title)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET title = EXCLUDED.title
            RETURNING id
            ",
        )
        .bind(id)
        .bind(&env.title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<Uuid, _>("id").to_string())
    }

    async fn get_env(&self, title: &str) -> Result<Environment, RepoError> {
        let row = sqlx::query("SELECT id, title FROM environments WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Environment {
            id: Some(row.get("id")),
            title: row.get("title"),
        })
        .ok_or(RepoError::NotFound)
    }

    async fn del_env(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM environments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn get_env_users(&self, title: &str) -> Result<Vec<User>, RepoError> {
        let env = sqlx::query("SELECT id FROM environments WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)?;

        let rows = sqlx::query(
            r"
            SELECT u.id, u.name
            FROM users u
            JOIN user_environments m ON m.user_id = u.id
            WHERE m.environment_id = $1
            ORDER BY u.name
            ",
        )
        .bind(env.get::<Uuid, _>("id"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| User {
                id: Some(row.get("id")),
                name: row.get("name"),
                password: None,
            })
            .collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
