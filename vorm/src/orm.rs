use std::sync::Arc;

use vorm_db::{to_value, value::ToSql, Executor, Row, Value};

use crate::{
    mapper::map_row,
    statement::{build, BoundStatement, StatementKind, Target},
    Entity, EntityConfig, EntityMetadata, Error, Registry, Result,
};

/// Outcome of [`Vorm::save`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Saved {
    #[display("inserted")]
    Inserted,
    #[display("updated")]
    Updated,
}

/// Entry point of the mapper: registered entity types plus the executor
/// their statements run on
pub struct Vorm<E> {
    executor: E,
    registry: Registry,
}

impl<E: Executor> Vorm<E> {
    pub fn new(executor: E) -> Self {
        Self::with_registry(executor, Registry::new())
    }

    pub fn with_registry(executor: E, registry: Registry) -> Self {
        Self { executor, registry }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn register<T: Entity>(&mut self) -> Result<&mut Self> {
        self.registry.register::<T>()?;
        Ok(self)
    }

    pub fn register_config<T: 'static>(&mut self, config: EntityConfig<T>) -> Result<&mut Self> {
        self.registry.register_config(config)?;
        Ok(self)
    }

    /// Insert `entity`, or update its row if one already has its identity
    ///
    /// Existence is probed with a select by id before writing. The probe and
    /// the write are separate statements outside any transaction: a row
    /// deleted in between turns the update into a no-op, and a row created in
    /// between makes the insert fail on its key.
    pub fn save<T: 'static>(&self, entity: &T) -> Result<Saved> {
        let metadata = self.registry.resolve::<T>()?;
        let id = metadata.identity(entity)?;

        if id != Value::Null && self.exists(&metadata, id.clone())? {
            if metadata.updatable_fields().next().is_some() {
                let update = build(StatementKind::Update, &metadata, Target::Entity(entity))?;
                self.execute(update)?;
            }
            log::info!("Updated {} with id {}", metadata.name(), display(&id));
            Ok(Saved::Updated)
        } else {
            let insert = build(StatementKind::Insert, &metadata, Target::Entity(entity))?;
            self.execute(insert)?;
            log::info!("Inserted {} with id {}", metadata.name(), display(&id));
            Ok(Saved::Inserted)
        }
    }

    /// Entity whose identity is `id`, `None` when there is no such row
    pub fn find_by_id<T: 'static>(&self, id: impl ToSql) -> Result<Option<T>> {
        let metadata = self.registry.resolve::<T>()?;
        let id = to_value(&id)?;

        let select = build(StatementKind::SelectById, &metadata, Target::Id(id))?;

        // the primary key makes the first row the only one
        match self.query(select)?.first() {
            Some(row) => Ok(Some(map_row(row, &metadata)?)),
            None => Ok(None),
        }
    }

    /// Every row of the entity's table, in the order the database returns
    /// them
    pub fn find_all<T: 'static>(&self) -> Result<Vec<T>> {
        let metadata = self.registry.resolve::<T>()?;

        let select = build(StatementKind::SelectAll, &metadata, Target::Table)?;

        self.query(select)?
            .iter()
            .map(|row| map_row(row, &metadata).map_err(Error::from))
            .collect()
    }

    /// Delete the row of `entity`, returning whether there was one
    pub fn delete<T: 'static>(&self, entity: &T) -> Result<bool> {
        let metadata = self.registry.resolve::<T>()?;
        let id = metadata.identity(entity)?;

        self.delete_by_value(&metadata, id)
    }

    /// Delete the row identified by `id`, returning whether there was one
    ///
    /// Deleting a missing row is not an error.
    pub fn delete_by_id<T: 'static>(&self, id: impl ToSql) -> Result<bool> {
        let metadata = self.registry.resolve::<T>()?;
        let id = to_value(&id)?;

        self.delete_by_value(&metadata, id)
    }

    fn delete_by_value<T>(&self, metadata: &Arc<EntityMetadata<T>>, id: Value) -> Result<bool> {
        let shown = display(&id);
        let delete = build(StatementKind::DeleteById, metadata, Target::Id(id))?;
        let deleted = self.execute(delete)? > 0;

        if deleted {
            log::info!("Deleted {} with id {}", metadata.name(), shown);
        } else {
            log::debug!("No {} with id {} to delete", metadata.name(), shown);
        }

        Ok(deleted)
    }

    fn exists<T>(&self, metadata: &EntityMetadata<T>, id: Value) -> Result<bool> {
        let select = build(StatementKind::SelectById, metadata, Target::Id(id))?;

        Ok(!self.query(select)?.is_empty())
    }

    fn execute(&self, statement: BoundStatement) -> Result<usize> {
        log::debug!("{}: {} {:?}", statement.kind, statement.sql, statement.params);
        Ok(self.executor.execute(&statement.sql, &statement.params)?)
    }

    fn query(&self, statement: BoundStatement) -> Result<Vec<Row>> {
        log::debug!("{}: {} {:?}", statement.kind, statement.sql, statement.params);
        Ok(self.executor.query(&statement.sql, &statement.params)?)
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
