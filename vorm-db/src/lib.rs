use std::sync::Arc;

pub use rusqlite::{self, Connection};

mod error;
pub use error::{Error, Result};

mod id;
pub use id::Id;

mod row;
pub use row::Row;

pub mod value;
pub use value::{to_value, Value, ValueRef};

mod database;
pub use database::Database;

mod pool;
pub use pool::{Pool, PoolConfig};

/// Runs positional-parameter statements on behalf of the mapping layer
///
/// Implementations are expected to be callable from several threads at once;
/// bounding concurrency and timing out is their responsibility.
pub trait Executor: Send + Sync {
    /// Run a statement and return the number of affected rows
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize>;

    /// Run a query and collect every result row
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;
}

impl<T: Executor + ?Sized> Executor for &T {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}

impl<T: Executor + ?Sized> Executor for Box<T> {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}

pub(crate) fn execute_on(
    connection: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<usize> {
    log::trace!("execute: {sql} {params:?}");

    let mut statement = connection.prepare_cached(sql)?;
    Ok(statement.execute(rusqlite::params_from_iter(params.iter()))?)
}

pub(crate) fn query_on(
    connection: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<Vec<Row>> {
    log::trace!("query: {sql} {params:?}");

    let mut statement = connection.prepare_cached(sql)?;
    let columns: Arc<[String]> = statement
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = statement.query(rusqlite::params_from_iter(params.iter()))?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        result.push(Row::read(&columns, row)?);
    }

    Ok(result)
}
