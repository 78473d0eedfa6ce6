use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, Executor, Result, Row, Value};

/// Executor over a single SQLite connection
///
/// Calls from several threads are serialized on the connection.
pub struct Database {
    connection: Mutex<Connection>,
}

impl From<Connection> for Database {
    fn from(connection: Connection) -> Self {
        Database {
            connection: Mutex::new(connection),
        }
    }
}

impl Database {
    pub fn open<T: AsRef<Path>>(path: T) -> Result<Database> {
        match Connection::open(path) {
            Ok(connection) => Ok(connection.into()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn memory() -> Result<Database> {
        match Connection::open_in_memory() {
            Ok(connection) => Ok(connection.into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Run several `;`-separated statements without parameters
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        Ok(self.connection()?.execute_batch(sql)?)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| Error::Poisoned)
    }
}

impl Executor for Database {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        crate::execute_on(&*self.connection()?, sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        crate::query_on(&*self.connection()?, sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    fn db() -> Result<Database> {
        let db = Database::memory()?;
        db.execute_batch(
            "CREATE TABLE users (
                id INTEGER NOT NULL PRIMARY KEY,
                username TEXT,
                email TEXT UNIQUE
            );",
        )?;
        Ok(db)
    }

    #[test]
    fn execute_then_query() -> Result<()> {
        let db = db()?;

        assert_eq!(
            1,
            db.execute(
                "INSERT INTO users (id, username, email) VALUES (?, ?, ?)",
                &[Value::Integer(1), text("john"), text("john@example.com")],
            )?
        );

        let rows = db.query("SELECT * FROM users WHERE id = ?", &[Value::Integer(1)])?;
        assert_eq!(1, rows.len());
        assert_eq!("john", rows[0].get::<String>("username")?);
        assert_eq!(vec!["id", "username", "email"], rows[0].columns());

        assert!(db.query("SELECT * FROM users WHERE id = ?", &[Value::Integer(2)])?.is_empty());

        Ok(())
    }

    #[test]
    fn affected_rows() -> Result<()> {
        let db = db()?;

        assert_eq!(0, db.execute("DELETE FROM users WHERE id = ?", &[Value::Integer(1)])?);

        Ok(())
    }

    #[test]
    fn unique_violation() -> Result<()> {
        let db = db()?;
        let insert = "INSERT INTO users (id, username, email) VALUES (?, ?, ?)";

        db.execute(insert, &[Value::Integer(1), text("john"), text("j@x.com")])?;
        assert!(matches!(
            db.execute(insert, &[Value::Integer(2), text("jane"), text("j@x.com")]),
            Err(Error::NonUnique(_))
        ));
        assert!(matches!(
            db.execute(insert, &[Value::Integer(1), text("jane"), text("jane@x.com")]),
            Err(Error::NonUnique(_))
        ));

        Ok(())
    }

    #[test]
    fn syntax_error() -> Result<()> {
        let db = db()?;

        assert!(matches!(
            db.query("SELECT * FROM nowhere", &[]),
            Err(Error::Sqlite(_))
        ));

        Ok(())
    }
}
