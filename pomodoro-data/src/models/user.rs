/// User model and database operations
///
/// A user owns zero or more task lists through the `tasklist_user_link`
/// table. Credentials live in the same row but are only ever read through the
/// [`UserAuth`] projection, so the full [`User`] record never carries the
/// password hash.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::models::user::{CreateUser, User, UserAuth};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), pomodoro_data::error::DataError> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let auth = UserAuth::find_by_username(&pool, "alice").await?;
/// assert_eq!(auth.username, user.username);
/// # Ok(())
/// # }
/// ```

use crate::error::{DataError, DataResult};
use crate::models::task_list::TaskList;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// User identity with the ids of the lists it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated user id
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Ids of every list linked to this user
    pub lists: Vec<i64>,
}

/// Authentication projection of a user row
///
/// Only the login name and the stored hash. Hashing and verification happen
/// outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAuth {
    pub username: String,

    /// Password hash as stored (never plaintext)
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,

    /// Already-hashed password
    pub password_hash: String,
}

impl User {
    /// Finds a user by username, including its list ids
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UserNotFound`] when no user has this username, or
    /// a database error.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> DataResult<Self> {
        let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DataError::UserNotFound {
                username: username.to_string(),
            })?;

        let lists = Self::list_ids(pool, id).await?;

        Ok(User {
            id,
            username: username.to_string(),
            lists,
        })
    }

    /// Ids of the lists linked to a user, ascending
    ///
    /// An unknown user simply has no lists.
    pub async fn list_ids(pool: &PgPool, user_id: i64) -> DataResult<Vec<i64>> {
        TaskList::ids_for_user(pool, user_id).await
    }

    /// Creates a user and returns the full record
    ///
    /// A fresh user owns no lists, so no link lookup is made.
    ///
    /// # Errors
    ///
    /// Returns a database error if the username is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> DataResult<Self> {
        let username = data.username.clone();
        let id = UserAuth::create(pool, data).await?;

        Ok(User {
            id,
            username,
            lists: Vec::new(),
        })
    }
}

impl UserAuth {
    /// Finds the credential projection for a username
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UserNotFound`] when no user has this username.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> DataResult<Self> {
        sqlx::query_as::<_, UserAuth>("SELECT username, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DataError::UserNotFound {
                username: username.to_string(),
            })
    }

    /// Inserts a user and returns the generated id
    pub async fn create(pool: &PgPool, data: CreateUser) -> DataResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .fetch_one(pool)
        .await?;

        debug!(user_id = id, username = %data.username, "Created user");
        Ok(id)
    }
}
