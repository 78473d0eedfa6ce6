use vorm_db::Row;

use crate::{EntityMetadata, MappingError};

/// Build a new entity from `row`, reading every persistable field by column
/// name
pub fn map_row<T>(row: &Row, metadata: &EntityMetadata<T>) -> Result<T, MappingError> {
    let mut entity = metadata.instantiate();

    for field in metadata.persistable_fields() {
        let Some(value) = row.get_ref(field.column()) else {
            return Err(MappingError::MissingColumn {
                entity: metadata.name(),
                column: field.column().to_string(),
            });
        };

        field
            .assign(&mut entity, value)
            .map_err(|source| MappingError::InvalidType {
                entity: metadata.name(),
                column: field.column().to_string(),
                source,
            })?;
    }

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::{assert_eq, *};
    use std::sync::Arc;
    use vorm_db::{Id, Value};

    fn metadata() -> Result<EntityMetadata<User>> {
        EntityMetadata::from_config(test::user_config())
    }

    fn row(columns: &[&str], values: Vec<Value>) -> Row {
        let columns: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
        Row::new(columns, values)
    }

    #[test]
    fn map_in_any_column_order() -> Result<()> {
        let row = row(
            &["email", "id", "username"],
            vec![
                Value::Text("j@x.com".into()),
                Value::Integer(1),
                Value::Text("john".into()),
            ],
        );

        assert_eq!(User::new(1, "john", "j@x.com"), map_row(&row, &metadata()?)?);

        Ok(())
    }

    #[test]
    fn extra_columns_are_ignored() -> Result<()> {
        let row = row(
            &["id", "username", "email", "created_at"],
            vec![
                Value::Integer(2),
                Value::Text("jane".into()),
                Value::Text("jane@x.com".into()),
                Value::Text("2024-01-01".into()),
            ],
        );

        let user = map_row(&row, &metadata()?)?;
        assert_eq!(Some(Id::from(2)), user.id);

        Ok(())
    }

    #[test]
    fn missing_column() -> Result<()> {
        let row = row(
            &["id", "username"],
            vec![Value::Integer(1), Value::Text("john".into())],
        );

        assert!(matches!(
            map_row(&row, &metadata()?),
            Err(MappingError::MissingColumn { column, .. }) if column == "email"
        ));

        Ok(())
    }

    #[test]
    fn incompatible_value() -> Result<()> {
        let row = row(
            &["id", "username", "email"],
            vec![
                Value::Text("one".into()),
                Value::Text("john".into()),
                Value::Text("j@x.com".into()),
            ],
        );

        assert!(matches!(
            map_row(&row, &metadata()?),
            Err(MappingError::InvalidType { column, .. }) if column == "id"
        ));

        Ok(())
    }

    #[test]
    fn null_into_non_optional_field() -> Result<()> {
        let row = row(
            &["id", "username", "email"],
            vec![Value::Integer(1), Value::Null, Value::Text("j@x.com".into())],
        );

        assert!(matches!(
            map_row(&row, &metadata()?),
            Err(MappingError::InvalidType { column, .. }) if column == "username"
        ));

        Ok(())
    }
}
