use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{Entity, EntityConfig, EntityMetadata, Error, Result};

/// Registration table of every persistable type
///
/// Metadata is built and validated once, when a type is registered; lookups
/// afterwards hand out the same shared instance.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Entity>(&mut self) -> Result<Arc<EntityMetadata<T>>> {
        self.register_config(T::config())
    }

    /// Register `T` with a hand-built configuration, replacing any earlier
    /// registration of the same type
    pub fn register_config<T: 'static>(
        &mut self,
        config: EntityConfig<T>,
    ) -> Result<Arc<EntityMetadata<T>>> {
        let metadata = Arc::new(EntityMetadata::from_config(config)?);

        log::debug!(
            "Registered {} as table {}",
            metadata.name(),
            metadata.table_name()
        );

        if self
            .entries
            .insert(TypeId::of::<T>(), metadata.clone())
            .is_some()
        {
            log::warn!("{} was already registered", metadata.name());
        }

        Ok(metadata)
    }

    pub fn resolve<T: 'static>(&self) -> Result<Arc<EntityMetadata<T>>> {
        let not_an_entity = || Error::NotAnEntity(std::any::type_name::<T>());

        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(not_an_entity)?
            .downcast::<EntityMetadata<T>>()
            .map_err(|_| not_an_entity())
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
