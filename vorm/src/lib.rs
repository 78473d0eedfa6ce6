extern crate self as vorm;

mod error;
pub use error::{Error, MappingError, Result};

mod entity;
pub use entity::Entity;
pub use vorm_derive::Entity;

mod metadata;
pub use metadata::{default_table_name, EntityConfig, EntityMetadata, FieldDescriptor};

mod registry;
pub use registry::Registry;

pub mod mapper;
pub mod statement;
pub use statement::{BoundStatement, StatementKind};

mod orm;
pub use orm::{Saved, Vorm};

pub use vorm_db::{Database, Executor, Id, Pool, PoolConfig, Row, Value};

pub mod prelude {
    pub use crate::{Database, Entity, Executor, Id, Pool, Saved, Vorm};
}
