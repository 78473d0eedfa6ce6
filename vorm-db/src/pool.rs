//! Bounded connection pool over a SQLite file, using r2d2.

use std::path::Path;
use std::time::Duration;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::{Error, Executor, Result, Row, Value};

/// Sizing and checkout timeout of a [`Pool`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on open connections, and so on concurrent statements
    pub max_size: u32,
    /// Idle connections kept open, clamped to `max_size`
    pub min_idle: Option<u32>,
    /// How long a caller waits for a free connection before failing
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 20,
            min_idle: Some(5),
            connection_timeout: Duration::from_secs(30),
        }
    }
}

pub struct Pool {
    pool: r2d2::Pool<SqliteConnectionManager>,
}

impl Pool {
    pub fn open<T: AsRef<Path>>(path: T, config: &PoolConfig) -> Result<Pool> {
        if config.max_size == 0 {
            return Err(Error::InvalidConfig(
                "pool max_size must be at least 1".to_string(),
            ));
        }
        if config.connection_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "pool connection_timeout must be positive".to_string(),
            ));
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|c| c.busy_timeout(Duration::from_secs(5)));

        let pool = r2d2::Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle.map(|idle| idle.min(config.max_size)))
            .connection_timeout(config.connection_timeout)
            .build(manager)?;

        log::debug!(
            "Opened pool with {} connections max",
            pool.max_size()
        );

        Ok(Self { pool })
    }

    pub fn max_size(&self) -> u32 {
        self.pool.max_size()
    }

    /// Run several `;`-separated statements without parameters
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        Ok(self.connection()?.execute_batch(sql)?)
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl Executor for Pool {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        crate::execute_on(&*self.connection()?, sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        crate::query_on(&*self.connection()?, sql, params)
    }
}
