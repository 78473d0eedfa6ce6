use std::fs::create_dir_all;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use toml::{Table, Value};
use vorm::{Pool, PoolConfig, Vorm};

use crate::cli::{Cli, Commands};
use crate::user::User;

/// Schema of the demo table
pub const USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT PRIMARY KEY,
        username VARCHAR(255),
        email VARCHAR(255)
    );";

#[derive(Debug)]
pub struct Config {
    pub dir: PathBuf,
    pub data_dir: PathBuf,
    cli: Cli,
    table: Table,
}

impl Config {
    pub fn try_parse() -> Result<Self> {
        Self::try_parse_from(std::env::args_os())
    }

    pub fn try_parse_from<I, T>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::Parser;

        let cli = Cli::try_parse_from(iter)?;

        let dir = match cli.config.clone() {
            Some(dir) => dir,
            None => config_home()?,
        };
        let table = match std::fs::read_to_string(dir.join("config.toml")) {
            Ok(content) => content.parse::<Table>()?,
            Err(_) => Table::new(),
        };

        let data_dir = match cli.data.clone() {
            Some(dir) => dir,
            None => match table.get("data_dir").and_then(Value::as_str) {
                Some(dir) => PathBuf::from(dir),
                None => data_home()?,
            },
        };

        if !data_dir.is_dir() {
            return Err(anyhow!(
                "Data directory is not a dir: {}",
                data_dir.display()
            ));
        }

        Ok(Config {
            dir,
            data_dir,
            cli,
            table,
        })
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.cli.verbose.log_level_filter()
    }

    pub fn command(&self) -> Option<&Commands> {
        self.cli.command.as_ref()
    }

    pub fn database_path(&self) -> PathBuf {
        let db_filename = if let Some(db_table) = self.table.get("db").and_then(Value::as_table) {
            db_table
                .get("filename")
                .and_then(Value::as_str)
                .unwrap_or("db.vorm")
        } else {
            "db.vorm"
        };

        self.data_dir.join(db_filename)
    }

    /// Pool settings from the `[pool]` table, defaults for what is missing
    pub fn pool_config(&self) -> Result<PoolConfig> {
        let mut config = PoolConfig::default();

        let Some(pool) = self.table.get("pool").and_then(Value::as_table) else {
            return Ok(config);
        };

        if let Some(max_size) = integer(pool, "max_size")? {
            config.max_size = max_size;
        }
        if let Some(min_idle) = integer(pool, "min_idle")? {
            config.min_idle = Some(min_idle);
        }
        if let Some(timeout) = integer(pool, "connection_timeout")? {
            if timeout == 0 {
                bail!("pool.connection_timeout must be at least 1 second");
            }
            config.connection_timeout = Duration::from_secs(timeout.into());
        }

        Ok(config)
    }

    pub fn pool(&self) -> Result<Pool> {
        let pool = Pool::open(self.database_path(), &self.pool_config()?)?;
        pool.execute_batch(USERS_TABLE)?;
        Ok(pool)
    }

    pub fn vorm(&self) -> Result<Vorm<Pool>> {
        let mut vorm = Vorm::new(self.pool()?);
        vorm.register::<User>()?;
        Ok(vorm)
    }
}

fn integer(table: &Table, key: &str) -> Result<Option<u32>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => {
            let value = value
                .as_integer()
                .with_context(|| format!("pool.{key} is not an integer"))?;
            Ok(Some(u32::try_from(value).with_context(|| {
                format!("pool.{key} is out of range: {value}")
            })?))
        }
    }
}

fn config_home() -> Result<PathBuf> {
    match std::env::var("VORM_CONFIG") {
        Ok(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => {
            let path = xdg::BaseDirectories::with_prefix("vorm")?.get_config_home();
            if !path.exists() {
                create_dir_all(&path)?;
            }
            Ok(path)
        }
    }
}

fn data_home() -> Result<PathBuf> {
    match std::env::var("VORM_DATA") {
        Ok(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => {
            let path = xdg::BaseDirectories::with_prefix("vorm")?.get_data_home();
            if !path.exists() {
                create_dir_all(&path)?;
            }
            Ok(path)
        }
    }
}
