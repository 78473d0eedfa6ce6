use std::sync::Arc;

use rusqlite::{
    types::{FromSql, FromSqlError, Value, ValueRef},
    Error, Result,
};

/// A result row detached from its statement
///
/// Columns are looked up by name, ignoring ASCII case like SQLite does, so
/// callers never depend on the order in which a `SELECT *` returns them.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Pair column names with values, by position
    ///
    /// A column without a value is treated as absent.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub(crate) fn read(
        columns: &Arc<[String]>,
        row: &rusqlite::Row<'_>,
    ) -> Result<Self> {
        let values = (0..columns.len())
            .map(|idx| row.get::<usize, Value>(idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(columns.clone(), values))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .take(self.values.len())
            .position(|name| name.eq_ignore_ascii_case(column))
    }

    /// Raw value of the named column, `None` if the row has no such column
    pub fn get_ref(&self, column: &str) -> Option<ValueRef<'_>> {
        self.index(column).map(|idx| ValueRef::from(&self.values[idx]))
    }

    pub fn get<T: FromSql>(&self, column: &str) -> Result<T> {
        let Some(idx) = self.index(column) else {
            return Err(Error::InvalidColumnName(column.to_string()));
        };
        let value = ValueRef::from(&self.values[idx]);

        T::column_result(value).map_err(|e| match e {
            FromSqlError::InvalidType => Error::InvalidColumnType(
                idx,
                column.to_string(),
                value.data_type(),
            ),
            FromSqlError::OutOfRange(i) => Error::IntegralValueOutOfRange(idx, i),
            e => Error::FromSqlConversionFailure(
                idx,
                value.data_type(),
                Box::new(e),
            ),
        })
    }
}
