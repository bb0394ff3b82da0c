use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schoolhub_db::PgPool;
use schoolhub_models::{UpdateUserRequest, User, UserRole};
use sqlx::FromRow;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::error::UserError;

/// A user ready to be stored; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub subject: Option<String>,
}

/// A stored user together with its credential, for login checks only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`UserError::UsernameTaken`] when the username is in use.
    async fn insert(&self, user: NewUser) -> Result<User, UserError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserCredentials>, UserError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;
    async fn list(&self) -> Result<Vec<User>, UserError>;
    async fn update(&self, id: Uuid, patch: UpdateUserRequest) -> Result<Option<User>, UserError>;
    /// Returns false when no user has that username.
    async fn set_password(&self, username: &str, password_hash: &str) -> Result<bool, UserError>;
    async fn delete(&self, id: Uuid) -> Result<bool, UserError>;
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password: String,
    role: UserRole,
    subject: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserCredentials {
    fn from(row: UserRow) -> Self {
        Self {
            password_hash: row.password,
            user: User {
                id: row.id,
                username: row.username,
                role: row.role,
                subject: row.subject,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

fn map_unique_violation(e: sqlx::Error) -> UserError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return UserError::UsernameTaken;
    }
    UserError::Database(e)
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, username, password, role, subject)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, username, role, subject, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.subject)
        .fetch_one(&self.db)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, password, role, subject, created_at, updated_at
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(UserCredentials::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, role, subject, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, username, role, subject, created_at, updated_at
               FROM users ORDER BY created_at, username"#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: UpdateUserRequest) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET username = COALESCE($2, username),
                   role = COALESCE($3, role),
                   subject = COALESCE($4, subject),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, username, role, subject, created_at, updated_at"#,
        )
        .bind(id)
        .bind(patch.username)
        .bind(patch.role)
        .bind(patch.subject)
        .fetch_optional(&self.db)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    #[instrument(skip(self, password_hash))]
    async fn set_password(&self, username: &str, password_hash: &str) -> Result<bool, UserError> {
        let result = sqlx::query(
            "UPDATE users SET password = $2, updated_at = NOW() WHERE username = $1",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory users keyed by id, for development without PostgreSQL and tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, UserCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().await;
        if users.values().any(|u| u.user.username == user.username) {
            return Err(UserError::UsernameTaken);
        }

        let now = Utc::now();
        let stored = User {
            id: Uuid::new_v4(),
            username: user.username,
            role: user.role,
            subject: user.subject,
            created_at: now,
            updated_at: now,
        };
        users.insert(
            stored.id,
            UserCredentials {
                user: stored.clone(),
                password_hash: user.password_hash,
            },
        );

        debug!(user_id = %stored.id, "User stored in memory");
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserError> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let users = self.users.lock().await;
        Ok(users.get(&id).map(|u| u.user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().await;
        let mut list: Vec<User> = users.values().map(|u| u.user.clone()).collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(list)
    }

    async fn update(&self, id: Uuid, patch: UpdateUserRequest) -> Result<Option<User>, UserError> {
        let mut users = self.users.lock().await;

        if let Some(username) = &patch.username
            && users
                .values()
                .any(|u| u.user.id != id && &u.user.username == username)
        {
            return Err(UserError::UsernameTaken);
        }

        let Some(stored) = users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(username) = patch.username {
            stored.user.username = username;
        }
        if let Some(role) = patch.role {
            stored.user.role = role;
        }
        if let Some(subject) = patch.subject {
            stored.user.subject = Some(subject);
        }
        stored.user.updated_at = Utc::now();

        Ok(Some(stored.user.clone()))
    }

    async fn set_password(&self, username: &str, password_hash: &str) -> Result<bool, UserError> {
        let mut users = self.users.lock().await;
        match users.values_mut().find(|u| u.user.username == username) {
            Some(stored) => {
                stored.password_hash = password_hash.to_string();
                stored.user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        let mut users = self.users.lock().await;
        Ok(users.remove(&id).is_some())
    }
}
