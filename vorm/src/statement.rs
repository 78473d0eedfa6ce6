use vorm_db::Value;

use crate::{EntityMetadata, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum StatementKind {
    #[display("INSERT")]
    Insert,
    #[display("UPDATE")]
    Update,
    #[display("SELECT BY ID")]
    SelectById,
    #[display("SELECT ALL")]
    SelectAll,
    #[display("DELETE BY ID")]
    DeleteById,
}

/// SQL text with its positional parameters, in placeholder order
#[derive(Clone, Debug, PartialEq)]
pub struct BoundStatement {
    pub kind: StatementKind,
    pub sql: String,
    pub params: Vec<Value>,
}

/// What a statement is built from
pub enum Target<'a, T> {
    Entity(&'a T),
    Id(Value),
    Table,
}

/// Build the statement of `kind` for `target`
///
/// `Insert` and `Update` need an entity, the by-id kinds an id or an entity
/// (whose identity is then used), `SelectAll` nothing.
pub fn build<T>(
    kind: StatementKind,
    metadata: &EntityMetadata<T>,
    target: Target<'_, T>,
) -> Result<BoundStatement> {
    match (kind, target) {
        (StatementKind::Insert, Target::Entity(entity)) => insert(metadata, entity),
        (StatementKind::Update, Target::Entity(entity)) => update(metadata, entity),
        (StatementKind::SelectById, target) => {
            Ok(select_by_id(metadata, identity_of(kind, metadata, target)?))
        }
        (StatementKind::DeleteById, target) => {
            Ok(delete_by_id(metadata, identity_of(kind, metadata, target)?))
        }
        (StatementKind::SelectAll, _) => Ok(select_all(metadata)),
        (kind, _) => Err(Error::Invalid(format!(
            "{kind} of {} needs an entity",
            metadata.name()
        ))),
    }
}

fn identity_of<T>(
    kind: StatementKind,
    metadata: &EntityMetadata<T>,
    target: Target<'_, T>,
) -> Result<Value> {
    match target {
        Target::Entity(entity) => Ok(metadata.identity(entity)?),
        Target::Id(id) => Ok(id),
        Target::Table => Err(Error::Invalid(format!(
            "{kind} of {} needs an id",
            metadata.name()
        ))),
    }
}

pub fn insert<T>(metadata: &EntityMetadata<T>, entity: &T) -> Result<BoundStatement> {
    let fields = metadata.persistable_fields();

    let columns = fields
        .iter()
        .map(|field| field.column())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; fields.len()].join(", ");
    let params = fields
        .iter()
        .map(|field| field.value(entity))
        .collect::<vorm_db::rusqlite::Result<Vec<_>>>()?;

    Ok(BoundStatement {
        kind: StatementKind::Insert,
        sql: format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            metadata.table_name()
        ),
        params,
    })
}

/// UPDATE of every non-identifying field, the identity bound last
///
/// Fails with [`Error::Invalid`] for entities that only have an identity.
pub fn update<T>(metadata: &EntityMetadata<T>, entity: &T) -> Result<BoundStatement> {
    let set_clause = metadata
        .updatable_fields()
        .map(|field| format!("{} = ?", field.column()))
        .collect::<Vec<_>>()
        .join(", ");
    if set_clause.is_empty() {
        return Err(Error::Invalid(format!(
            "{} has no updatable fields",
            metadata.name()
        )));
    }

    let mut params = metadata
        .updatable_fields()
        .map(|field| field.value(entity))
        .collect::<vorm_db::rusqlite::Result<Vec<_>>>()?;
    params.push(metadata.identity(entity)?);

    Ok(BoundStatement {
        kind: StatementKind::Update,
        sql: format!(
            "UPDATE {} SET {set_clause} WHERE {} = ?",
            metadata.table_name(),
            metadata.identifying_field().column()
        ),
        params,
    })
}

pub fn select_by_id<T>(metadata: &EntityMetadata<T>, id: Value) -> BoundStatement {
    BoundStatement {
        kind: StatementKind::SelectById,
        sql: format!(
            "SELECT * FROM {} WHERE {} = ?",
            metadata.table_name(),
            metadata.identifying_field().column()
        ),
        params: vec![id],
    }
}

pub fn select_all<T>(metadata: &EntityMetadata<T>) -> BoundStatement {
    BoundStatement {
        kind: StatementKind::SelectAll,
        sql: format!("SELECT * FROM {}", metadata.table_name()),
        params: Vec::new(),
    }
}

pub fn delete_by_id<T>(metadata: &EntityMetadata<T>, id: Value) -> BoundStatement {
    BoundStatement {
        kind: StatementKind::DeleteById,
        sql: format!(
            "DELETE FROM {} WHERE {} = ?",
            metadata.table_name(),
            metadata.identifying_field().column()
        ),
        params: vec![id],
    }
}
