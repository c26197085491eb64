/// Task list model and database operations
///
/// Lists are shared between users through `tasklist_user_link` and own their
/// todos through `todos.todo_list`. There is no fetch that loads both sides at
/// once: [`TaskList::find_with_users`] fills `users`, and
/// [`TaskList::find_with_tasks`] fills `tasks`. The other collection is left
/// empty.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lists (
///     id BIGSERIAL PRIMARY KEY,
///     list_name TEXT NOT NULL
/// );
///
/// CREATE TABLE tasklist_user_link (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     todo_list BIGINT NOT NULL REFERENCES lists(id),
///     UNIQUE (user_id, todo_list)
/// );
/// ```

use crate::error::{DataError, DataResult};
use crate::models::todo::TodoStub;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// A named list of todos with its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: i64,

    pub name: String,

    /// Member user ids; only populated by [`TaskList::find_with_users`]
    pub users: Vec<i64>,

    /// Todo stubs; only populated by [`TaskList::find_with_tasks`]
    pub tasks: Vec<TodoStub>,
}

impl TaskList {
    /// Creates a list and links it to the user creating it
    ///
    /// Both inserts share one transaction, so a failed link never leaves an
    /// orphaned list behind.
    ///
    /// # Returns
    ///
    /// The id of the new list
    ///
    /// # Errors
    ///
    /// Returns a database error if either insert fails (for example, an
    /// unknown user id violates the link table's foreign key).
    pub async fn create(pool: &PgPool, user_id: i64, name: &str) -> DataResult<i64> {
        let mut tx = pool.begin().await?;

        let list_id: i64 =
            sqlx::query_scalar("INSERT INTO lists (list_name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("INSERT INTO tasklist_user_link (user_id, todo_list) VALUES ($1, $2)")
            .bind(user_id)
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(list_id, user_id, "Created task list");
        Ok(list_id)
    }

    /// Fetches a list with only its member user ids populated
    ///
    /// # Errors
    ///
    /// Returns [`DataError::ListNotFound`] if the list does not exist.
    pub async fn find_with_users(pool: &PgPool, id: i64) -> DataResult<Self> {
        let name = Self::find_name(pool, id).await?;

        let users: Vec<i64> = sqlx::query_scalar(
            "SELECT user_id FROM tasklist_user_link WHERE todo_list = $1 ORDER BY user_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(TaskList {
            id,
            name,
            users,
            tasks: Vec::new(),
        })
    }

    /// Fetches a list with only its todo stubs populated
    ///
    /// # Errors
    ///
    /// Returns [`DataError::ListNotFound`] if the list does not exist.
    pub async fn find_with_tasks(pool: &PgPool, id: i64) -> DataResult<Self> {
        let name = Self::find_name(pool, id).await?;

        let tasks = sqlx::query_as::<_, TodoStub>(
            r#"
            SELECT id, todo_name, completed_at, todo_list
            FROM todos
            WHERE todo_list = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(TaskList {
            id,
            name,
            users: Vec::new(),
            tasks,
        })
    }

    /// Ids of the lists linked to a user, ascending
    pub async fn ids_for_user(pool: &PgPool, user_id: i64) -> DataResult<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT todo_list FROM tasklist_user_link WHERE user_id = $1 ORDER BY todo_list",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    async fn find_name(pool: &PgPool, id: i64) -> DataResult<String> {
        sqlx::query_scalar("SELECT list_name FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(DataError::ListNotFound { id })
    }
}
