/// Error types for the data access layer
///
/// Every operation returns [`DataResult`]. Single-row lookups that miss are
/// reported as one of the `*NotFound` variants so callers can tell "no such
/// entity" apart from a failing database. Multi-row lookups never produce a
/// not-found error; they return an empty `Vec` instead.
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::error::DataError;
/// use pomodoro_data::models::user::User;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), DataError> {
/// match User::find_by_username(&pool, "ghost").await {
///     Ok(user) => println!("found {}", user.id),
///     Err(e) if e.is_not_found() => println!("no such user"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```

use thiserror::Error;

/// Result alias used throughout the crate
pub type DataResult<T> = Result<T, DataError>;

/// Data access errors
#[derive(Error, Debug)]
pub enum DataError {
    /// No user with the given username
    #[error("user '{username}' not found")]
    UserNotFound { username: String },

    /// No task list with the given id
    #[error("task list {id} not found")]
    ListNotFound { id: i64 },

    /// No todo with the given id
    #[error("todo {id} not found")]
    TodoNotFound { id: i64 },

    /// No rate-limit entry for the (user, address) pair
    #[error("no auth rate limit entry for user {user_id} from {ip_addr}")]
    RateLimitNotFound { user_id: i64, ip_addr: String },

    /// Any other failure from the driver, passed through unchanged
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DataError {
    /// Returns true for the single-row lookup miss variants
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DataError::UserNotFound { .. }
                | DataError::ListNotFound { .. }
                | DataError::TodoNotFound { .. }
                | DataError::RateLimitNotFound { .. }
        )
    }
}
