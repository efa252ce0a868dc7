use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
}

/// Capability interface over the user table. `PgUserStore` is the production
/// implementation; `InMemoryUserStore` backs the tests. Which one a service
/// gets is decided once, at startup.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> anyhow::Result<User>;
    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;
    /// Returns false when no row with that id exists.
    async fn update(&self, id: i32, username: &str, password_hash: &str) -> anyhow::Result<bool>;
    /// Returns false when no row with that id exists.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: i32, username: &str, password_hash: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

/// HashMap-backed store for tests. Like the table it stands in for, it does
/// not enforce username uniqueness; that check lives in the service.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: Mutex<MemInner>,
}

#[derive(Default)]
struct MemInner {
    next_id: i32,
    users: HashMap<i32, User>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut inner = self.inner.lock().expect("user store lock");
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().expect("user store lock");
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().expect("user store lock");
        Ok(inner.users.get(&id).cloned())
    }

    async fn update(&self, id: i32, username: &str, password_hash: &str) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().expect("user store lock");
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.username = username.to_string();
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().expect("user store lock");
        Ok(inner.users.remove(&id).is_some())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let inner = self.inner.lock().expect("user store lock");
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}
