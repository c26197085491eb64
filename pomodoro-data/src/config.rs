/// Configuration management for the data layer
///
/// The connection URL is assembled from three secrets (database user,
/// password and host) that the deployment exposes as environment variables.
/// The database name is fixed.
///
/// # Environment Variables
///
/// - `POMODORO_TASKS_DB_USER`: database user (required unless `DATABASE_URL` is set)
/// - `POMODORO_TASKS_DB_PASSWORD`: database password (required unless `DATABASE_URL` is set)
/// - `POMODORO_TASKS_DB_HOST`: host, optionally with `:port` (required unless `DATABASE_URL` is set)
/// - `DATABASE_URL`: full connection URL, overrides the three secrets
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
///
/// # Example
///
/// ```no_run
/// use pomodoro_data::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("pool size {}", config.database.max_connections);
/// # Ok(())
/// # }
/// ```

use crate::db::pool::DatabaseConfig;
use std::env;

/// Name of the database every deployment connects to
pub const DATABASE_NAME: &str = "db";

/// Environment variable holding the database user secret
pub const DB_USER_VAR: &str = "POMODORO_TASKS_DB_USER";

/// Environment variable holding the database password secret
pub const DB_PASSWORD_VAR: &str = "POMODORO_TASKS_DB_PASSWORD";

/// Environment variable holding the database host secret
pub const DB_HOST_VAR: &str = "POMODORO_TASKS_DB_HOST";

/// The three secrets the connection URL is built from
#[derive(Clone)]
pub struct DatabaseSecrets {
    pub user: String,
    pub password: String,
    pub host: String,
}

impl std::fmt::Debug for DatabaseSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSecrets")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

impl DatabaseSecrets {
    /// PostgreSQL URL pointing at [`DATABASE_NAME`]
    ///
    /// Credentials are inserted as given, so they must not contain URL
    /// delimiters such as `@`, `/` or `:`.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}/{}",
            self.user, self.password, self.host, DATABASE_NAME
        )
    }
}

/// Complete data layer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Pool configuration, including the assembled URL
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `DATABASE_URL` nor all three secrets are set
    /// - `DATABASE_MAX_CONNECTIONS` is not a number, or is 0
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source
    ///
    /// `lookup` returns the value of a variable, or None when it is unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => secrets_from_lookup(&lookup)?.connection_url(),
        };

        let max_connections =
            parse_max_connections(lookup("DATABASE_MAX_CONNECTIONS").as_deref())?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                ..Default::default()
            },
        })
    }
}

/// Parses the pool size, defaulting to 10 when unset
///
/// A pool needs at least one connection.
fn parse_max_connections(raw: Option<&str>) -> anyhow::Result<u32> {
    let max_connections = match raw {
        Some(value) => value.trim().parse::<u32>()?,
        None => 10,
    };

    if max_connections == 0 {
        anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
    }

    Ok(max_connections)
}

fn secrets_from_lookup<F>(lookup: &F) -> anyhow::Result<DatabaseSecrets>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| {
        lookup(name).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", name))
    };

    Ok(DatabaseSecrets {
        user: required(DB_USER_VAR)?,
        password: required(DB_PASSWORD_VAR)?,
        host: required(DB_HOST_VAR)?,
    })
}
