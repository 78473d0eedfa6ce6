pub use rusqlite::types::{
    FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, Value,
    ValueRef,
};

/// Convert anything bindable into an owned parameter value
pub fn to_value<T: ToSql + ?Sized>(value: &T) -> rusqlite::Result<Value> {
    match value.to_sql()? {
        ToSqlOutput::Borrowed(value) => Ok(value.into()),
        ToSqlOutput::Owned(value) => Ok(value),
        _ => Err(rusqlite::Error::ToSqlConversionFailure(
            "parameter cannot be bound by value".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars() -> rusqlite::Result<()> {
        assert_eq!(Value::Integer(42), to_value(&42_i64)?);
        assert_eq!(Value::Text("john".into()), to_value("john")?);
        assert_eq!(Value::Null, to_value(&Option::<i64>::None)?);
        assert_eq!(Value::Real(1.5), to_value(&1.5_f64)?);

        Ok(())
    }
}
