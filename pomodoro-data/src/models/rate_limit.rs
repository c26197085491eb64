/// Authentication rate-limit entries
///
/// One row per (user, source address) pair counts failed logins and records
/// when the last one happened. The row is created on the first failure,
/// overwritten on each later one, and removed after a successful login or an
/// explicit reset.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_auth_rate_limits (
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     ip_addr TEXT NOT NULL,
///     failed_auth_count INTEGER NOT NULL,
///     last_failed_auth TIMESTAMPTZ NOT NULL,
///     PRIMARY KEY (user_id, ip_addr)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::models::rate_limit::AuthRateLimit;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), pomodoro_data::error::DataError> {
/// let next = match AuthRateLimit::find(&pool, user_id, "203.0.113.9").await {
///     Ok(entry) => entry.failed_auth_count + 1,
///     Err(e) if e.is_not_found() => 1,
///     Err(e) => return Err(e),
/// };
/// AuthRateLimit::increment(&pool, user_id, "203.0.113.9", next).await?;
///
/// // After a successful login
/// AuthRateLimit::delete(&pool, user_id, "203.0.113.9").await?;
/// # Ok(())
/// # }
/// ```

use crate::error::{DataError, DataResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// Failed authentication counter for one user from one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthRateLimit {
    pub user_id: i64,

    pub ip_addr: String,

    /// Number of failed attempts recorded so far
    pub failed_auth_count: i32,

    /// When the most recent failure was recorded
    pub last_failed_auth: DateTime<Utc>,
}

impl AuthRateLimit {
    /// Fetches the entry for a (user, address) pair
    ///
    /// # Errors
    ///
    /// Returns [`DataError::RateLimitNotFound`] when no failure has been
    /// recorded for the pair.
    pub async fn find(pool: &PgPool, user_id: i64, ip_addr: &str) -> DataResult<Self> {
        sqlx::query_as::<_, AuthRateLimit>(
            r#"
            SELECT user_id, ip_addr, failed_auth_count, last_failed_auth
            FROM user_auth_rate_limits
            WHERE user_id = $1 AND ip_addr = $2
            "#,
        )
        .bind(user_id)
        .bind(ip_addr)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DataError::RateLimitNotFound {
            user_id,
            ip_addr: ip_addr.to_string(),
        })
    }

    /// Records a failure with the given count
    ///
    /// Inserts the entry if the pair has none, otherwise overwrites the count
    /// and refreshes the timestamp. Runs as a single upsert, so concurrent
    /// calls for the same pair never create a second row.
    ///
    /// # Returns
    ///
    /// The entry as stored
    pub async fn increment(
        pool: &PgPool,
        user_id: i64,
        ip_addr: &str,
        count: i32,
    ) -> DataResult<Self> {
        let entry = sqlx::query_as::<_, AuthRateLimit>(
            r#"
            INSERT INTO user_auth_rate_limits (user_id, ip_addr, failed_auth_count, last_failed_auth)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, ip_addr)
            DO UPDATE SET failed_auth_count = EXCLUDED.failed_auth_count,
                          last_failed_auth = EXCLUDED.last_failed_auth
            RETURNING user_id, ip_addr, failed_auth_count, last_failed_auth
            "#,
        )
        .bind(user_id)
        .bind(ip_addr)
        .bind(count)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        debug!(user_id, ip_addr, count, "Recorded failed authentication");
        Ok(entry)
    }

    /// Removes the entry for a (user, address) pair
    ///
    /// Deleting an entry that does not exist is not an error.
    ///
    /// # Returns
    ///
    /// True if an entry was removed
    pub async fn delete(pool: &PgPool, user_id: i64, ip_addr: &str) -> DataResult<bool> {
        let result =
            sqlx::query("DELETE FROM user_auth_rate_limits WHERE user_id = $1 AND ip_addr = $2")
                .bind(user_id)
                .bind(ip_addr)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
