/// Dependency edges between todos
///
/// An edge `(dependent, depends_on)` says `dependent` waits on `depends_on`.
/// Edges are stored on their own, with no foreign keys and no list
/// constraint. Whether both ends sit in the same list is only reported by
/// [`Dependency::same_list`]; adding a cross-list edge is not rejected here.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE dependencies (
///     dependent BIGINT NOT NULL,
///     depends_on BIGINT NOT NULL,
///     PRIMARY KEY (dependent, depends_on)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::models::dependency::Dependency;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, a: i64, b: i64) -> Result<(), pomodoro_data::error::DataError> {
/// if Dependency::same_list(&pool, a, b).await? {
///     let (dependent, depends_on) = Dependency::add(&pool, a, b).await?;
///     assert_eq!(dependent.this_depends_on[0].id, depends_on.id);
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::DataResult;
use crate::models::todo::Todo;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// A directed edge between two todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub dependent: i64,
    pub depends_on: i64,
}

impl Dependency {
    /// Whether the edge `dependent -> depends_on` is stored
    pub async fn exists(pool: &PgPool, dependent: i64, depends_on: i64) -> DataResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM dependencies
                WHERE dependent = $1 AND depends_on = $2
            )
            "#,
        )
        .bind(dependent)
        .bind(depends_on)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Adds an edge and returns both endpoints' refreshed records
    ///
    /// # Returns
    ///
    /// `(dependent, depends_on)` as full [`Todo`] records
    ///
    /// # Errors
    ///
    /// Returns a database error if the edge already exists, or
    /// [`crate::error::DataError::TodoNotFound`] if either endpoint is missing
    /// (the edge is still stored in that case).
    pub async fn add(pool: &PgPool, dependent: i64, depends_on: i64) -> DataResult<(Todo, Todo)> {
        sqlx::query("INSERT INTO dependencies (dependent, depends_on) VALUES ($1, $2)")
            .bind(dependent)
            .bind(depends_on)
            .execute(pool)
            .await?;

        debug!(dependent, depends_on, "Added dependency");

        tokio::try_join!(
            Todo::find_by_id(pool, dependent),
            Todo::find_by_id(pool, depends_on)
        )
    }

    /// Removes an edge
    ///
    /// # Returns
    ///
    /// True if the edge existed
    pub async fn remove(pool: &PgPool, dependent: i64, depends_on: i64) -> DataResult<bool> {
        let result = sqlx::query("DELETE FROM dependencies WHERE dependent = $1 AND depends_on = $2")
            .bind(dependent)
            .bind(depends_on)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether two todos belong to the same list
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DataError::TodoNotFound`] if either todo is missing.
    pub async fn same_list(pool: &PgPool, dependent: i64, depends_on: i64) -> DataResult<bool> {
        let (a, b) = tokio::try_join!(
            Todo::list_id(pool, dependent),
            Todo::list_id(pool, depends_on)
        )?;

        Ok(a == b)
    }

    /// Every edge touching a todo, in either direction
    pub async fn for_todo(pool: &PgPool, todo_id: i64) -> DataResult<Vec<Self>> {
        let edges = sqlx::query_as::<_, Dependency>(
            r#"
            SELECT dependent, depends_on
            FROM dependencies
            WHERE dependent = $1 OR depends_on = $1
            ORDER BY dependent, depends_on
            "#,
        )
        .bind(todo_id)
        .fetch_all(pool)
        .await?;

        Ok(edges)
    }
}
