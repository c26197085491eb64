/// Todo model and database operations
///
/// A todo belongs to exactly one list and takes part in any number of
/// directed dependency edges. The full [`Todo`] record resolves those edges
/// in both directions into [`TodoStub`]s:
///
/// - `depends_on_this`: todos that depend on this one
/// - `this_depends_on`: todos this one depends on
///
/// Both directions come back from a single joined query. Edges whose other
/// endpoint has been deleted are skipped.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     todo_name TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     completed_at TIMESTAMPTZ,
///     todo_list BIGINT NOT NULL REFERENCES lists(id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::models::todo::{NewTodo, Todo};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, list_id: i64) -> Result<(), pomodoro_data::error::DataError> {
/// let id = Todo::create(&pool, NewTodo::now("write report", list_id)).await?;
///
/// let todo = Todo::mark_complete(&pool, id).await?;
/// assert!(todo.is_complete());
/// # Ok(())
/// # }
/// ```

use crate::error::{DataError, DataResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// Todo with both dependency directions resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,

    pub name: String,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,

    /// None while the todo is incomplete
    pub completed_at: Option<DateTime<Utc>>,

    /// Owning list id
    pub list: i64,

    /// Todos that depend on this one
    pub depends_on_this: Vec<TodoStub>,

    /// Todos this one depends on
    pub this_depends_on: Vec<TodoStub>,
}

/// Lightweight projection of a todo, without dependency resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoStub {
    pub id: i64,

    #[sqlx(rename = "todo_name")]
    pub name: String,

    pub completed_at: Option<DateTime<Utc>>,

    #[sqlx(rename = "todo_list")]
    pub list: i64,
}

/// Input for creating a todo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub list: i64,
}

impl NewTodo {
    /// An incomplete todo created and modified at the current instant
    pub fn now(name: impl Into<String>, list: i64) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            modified_at: now,
            completed_at: None,
            list,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    todo_name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    todo_list: i64,
}

/// One resolved edge: the direction flag plus the stub on the far end
type EdgeRow = (bool, i64, String, Option<DateTime<Utc>>, i64);

impl Todo {
    /// Whether the todo has been marked complete
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Fetches a todo with both dependency directions resolved
    ///
    /// # Errors
    ///
    /// Returns [`DataError::TodoNotFound`] if the todo does not exist.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> DataResult<Self> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT todo_name, created_at, modified_at, completed_at, todo_list
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DataError::TodoNotFound { id })?;

        // TRUE rows are dependents of `id`, FALSE rows are what `id` depends on.
        // UNION ALL keeps a self-edge in both directions.
        let edges = sqlx::query_as::<_, EdgeRow>(
            r#"
            SELECT TRUE, t.id, t.todo_name, t.completed_at, t.todo_list
            FROM dependencies d
            JOIN todos t ON t.id = d.dependent
            WHERE d.depends_on = $1
            UNION ALL
            SELECT FALSE, t.id, t.todo_name, t.completed_at, t.todo_list
            FROM dependencies d
            JOIN todos t ON t.id = d.depends_on
            WHERE d.dependent = $1
            ORDER BY 2
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let mut depends_on_this = Vec::new();
        let mut this_depends_on = Vec::new();
        for (is_dependent, stub_id, name, completed_at, list) in edges {
            let stub = TodoStub {
                id: stub_id,
                name,
                completed_at,
                list,
            };
            if is_dependent {
                depends_on_this.push(stub);
            } else {
                this_depends_on.push(stub);
            }
        }

        Ok(Todo {
            id,
            name: row.todo_name,
            created_at: row.created_at,
            modified_at: row.modified_at,
            completed_at: row.completed_at,
            list: row.todo_list,
            depends_on_this,
            this_depends_on,
        })
    }

    /// Inserts a todo and returns the generated id
    ///
    /// # Errors
    ///
    /// Returns a database error if the list does not exist.
    pub async fn create(pool: &PgPool, data: NewTodo) -> DataResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO todos (todo_name, created_at, modified_at, completed_at, todo_list)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(data.name)
        .bind(data.created_at)
        .bind(data.modified_at)
        .bind(data.completed_at)
        .bind(data.list)
        .fetch_one(pool)
        .await?;

        debug!(todo_id = id, list_id = data.list, "Created todo");
        Ok(id)
    }

    /// Renames a todo, bumps its modified time, and returns the fresh record
    ///
    /// # Errors
    ///
    /// Returns [`DataError::TodoNotFound`] if the todo does not exist.
    pub async fn rename(pool: &PgPool, id: i64, name: &str) -> DataResult<Self> {
        sqlx::query("UPDATE todos SET todo_name = $2, modified_at = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(Utc::now())
            .execute(pool)
            .await?;

        Self::find_by_id(pool, id).await
    }

    /// Marks a todo complete and returns the fresh record
    ///
    /// Modified and completed times are set to the same instant. Completing an
    /// already complete todo moves both timestamps forward.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::TodoNotFound`] if the todo does not exist.
    pub async fn mark_complete(pool: &PgPool, id: i64) -> DataResult<Self> {
        let now = Utc::now();

        sqlx::query("UPDATE todos SET modified_at = $2, completed_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(pool)
            .await?;

        Self::find_by_id(pool, id).await
    }

    /// Deletes a todo
    ///
    /// Dependency edges that mention the todo are left in place; removing
    /// them is up to the caller.
    ///
    /// # Returns
    ///
    /// True if a todo was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> DataResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Id of the list a todo belongs to
    pub(crate) async fn list_id(pool: &PgPool, id: i64) -> DataResult<i64> {
        sqlx::query_scalar("SELECT todo_list FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(DataError::TodoNotFound { id })
    }
}

impl TodoStub {
    /// Fetches the stub projection of a todo
    ///
    /// # Errors
    ///
    /// Returns [`DataError::TodoNotFound`] if the todo does not exist.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> DataResult<Self> {
        sqlx::query_as::<_, TodoStub>(
            "SELECT id, todo_name, completed_at, todo_list FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DataError::TodoNotFound { id })
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}
