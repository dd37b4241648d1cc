use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Statement, Value,
};

/// Database the server-level connection uses while creating the target database.
pub const MAINTENANCE_DATABASE: &str = "postgres";

/// Fixed-delay retry policy for the startup connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first try).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

/// The last error seen once a retry policy ran out of attempts.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub error: E,
}

impl RetryPolicy {
    /// Run `op` until it succeeds or `max_attempts` is reached.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, RetryExhausted<E>>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt >= max_attempts => {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        error,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %error,
                        "{} not reachable yet, retrying",
                        what
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Target database; created at startup when absent.
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "blogging".to_string(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl DatabaseConfig {
    /// Connection string for the target database.
    pub fn url(&self) -> String {
        self.url_for(&self.name)
    }

    /// Connection string for the server's maintenance database.
    pub fn server_url(&self) -> String {
        self.url_for(MAINTENANCE_DATABASE)
    }

    fn url_for(&self, database: &str) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            database
        )
    }
}

/// Whether `name` is a plain identifier that can be spliced into `CREATE DATABASE`.
pub fn is_valid_database_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Fatal errors while bringing the database up.
#[cfg(feature = "postgres")]
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database unreachable after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: DbErr,
    },

    #[error("invalid database name {0:?}")]
    InvalidDatabaseName(String),

    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] DbErr),
}

/// Owner of the shared connection pool.
///
/// Opened once at startup and closed at shutdown; repositories get clones
/// of `main`.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Create the target database if needed, then open the pool.
    ///
    /// Both connections retry under `config.retry`; running out of attempts
    /// is fatal.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, StartupError> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Initializing database connection..."
        );

        let server = connect(&config.server_url(), config, 1).await?;
        ensure_database(&server, &config.name).await?;
        server.close().await?;

        let main = connect(&config.url(), config, config.min_connections).await?;
        tracing::info!(
            "Database connected (pool: {}-{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { main })
    }

    /// Create the `posts` table if absent. Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), StartupError> {
        use migration::{Migrator, MigratorTrait};

        Migrator::up(&self.main, None).await?;
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(self) -> Result<(), DbErr> {
        self.main.close().await?;
        tracing::info!("Database connections closed");
        Ok(())
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    url: &str,
    config: &DatabaseConfig,
    min_connections: u32,
) -> Result<DbConn, StartupError> {
    let opts = ConnectOptions::new(url)
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    config
        .retry
        .run("database", || Database::connect(opts.clone()))
        .await
        .map_err(|e| {
            tracing::error!(attempts = e.attempts, error = %e.error, "Giving up on database");
            StartupError::Unreachable {
                attempts: e.attempts,
                source: e.error,
            }
        })
}

#[cfg(feature = "postgres")]
async fn ensure_database(server: &DbConn, name: &str) -> Result<(), StartupError> {
    if !is_valid_database_name(name) {
        return Err(StartupError::InvalidDatabaseName(name.to_string()));
    }

    let backend = server.get_database_backend();
    let existing = server
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT 1 FROM pg_database WHERE datname = $1",
            [Value::from(name)],
        ))
        .await?;

    if existing.is_none() {
        server
            .execute(Statement::from_string(
                backend,
                format!("CREATE DATABASE \"{name}\""),
            ))
            .await?;
        tracing::info!(database = %name, "Database created");
    }

    Ok(())
}
