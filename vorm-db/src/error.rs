pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Sqlite error. {0}")]
    Sqlite(rusqlite::Error),
    #[error("Conflict with existing data. {0}")]
    NonUnique(String),
    #[error("Connection pool error. {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Invalid configuration. {0}")]
    InvalidConfig(String),
    #[error("Connection lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code
                        == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Error::NonUnique(msg.unwrap_or("".to_string()))
            }
            _ => Error::Sqlite(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_non_unique() {
        let error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: users.email".to_string()),
        );

        assert!(matches!(
            Error::from(error),
            Error::NonUnique(msg) if msg.contains("users.email")
        ));
    }

    #[test]
    fn other_failures_stay_sqlite() {
        assert!(matches!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::Sqlite(_)
        ));
    }
}
