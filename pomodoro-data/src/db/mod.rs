/// Database layer for the pomodoro tasks store
///
/// [`Database`] is the owned handle an application builds at startup and
/// passes to whatever needs data access. Model operations take `&PgPool`, so
/// callers hand them [`Database::pool`].
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::config::Config;
/// use pomodoro_data::db::Database;
/// use pomodoro_data::models::user::User;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::from_env()?;
///     let db = Database::connect(config.database).await?;
///
///     let user = User::find_by_username(db.pool(), "alice").await?;
///     println!("alice owns {} lists", user.lists.len());
///
///     db.close().await;
///     Ok(())
/// }
/// ```

pub mod pool;

use pool::{close_pool, create_pool, get_pool_stats, health_check, DatabaseConfig, PoolStats};
use sqlx::PgPool;

/// Owned handle to the shared connection pool
///
/// Cloning is cheap and every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens the pool and verifies connectivity
    pub async fn connect(config: DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = create_pool(config).await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for passing to model operations
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        health_check(&self.pool).await
    }

    pub fn stats(&self) -> PoolStats {
        get_pool_stats(&self.pool)
    }

    /// Closes every connection; call once at shutdown
    pub async fn close(self) {
        close_pool(self.pool).await;
    }
}
