use vorm_db::value::FromSqlError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} is not a registered entity")]
    NotAnEntity(&'static str),
    #[error("Entity {0} has no identifying field")]
    MissingIdentityField(&'static str),
    #[error("Invalid. {0}")]
    Invalid(String),
    #[error("Execution error. {0}")]
    Execution(#[from] vorm_db::Error),
    #[error("Mapping error. {0}")]
    Mapping(#[from] MappingError),
}

impl From<vorm_db::rusqlite::Error> for Error {
    fn from(e: vorm_db::rusqlite::Error) -> Self {
        Error::Execution(e.into())
    }
}

/// A result row does not fit the entity it is mapped to
#[derive(thiserror::Error, Debug)]
pub enum MappingError {
    #[error("column {column} of {entity} is missing from the result row")]
    MissingColumn {
        entity: &'static str,
        column: String,
    },
    #[error("column {column} of {entity} has an incompatible value")]
    InvalidType {
        entity: &'static str,
        column: String,
        #[source]
        source: FromSqlError,
    },
}
