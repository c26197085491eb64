/// Database models for the pomodoro tasks store
///
/// Each model exposes its operations as associated async functions taking a
/// `&PgPool`.
///
/// # Models
///
/// - `user`: User accounts and the credential projection
/// - `task_list`: Lists and their user links
/// - `todo`: Todos, stubs and dependency resolution
/// - `dependency`: Directed edges between todos
/// - `rate_limit`: Failed-authentication counters per user and address
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::models::task_list::TaskList;
/// use pomodoro_data::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), pomodoro_data::error::DataError> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let list_id = TaskList::create(&pool, user.id, "Groceries").await?;
/// let user = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(user.lists, vec![list_id]);
/// # Ok(())
/// # }
/// ```

pub mod dependency;
pub mod rate_limit;
pub mod task_list;
pub mod todo;
pub mod user;
