use std::collections::HashSet;
use std::fmt;

use vorm_db::{
    rusqlite,
    value::{to_value, FromSql, FromSqlResult, ToSql, Value, ValueRef},
};

use crate::{Error, Result};

type Getter<T> = Box<dyn Fn(&T) -> rusqlite::Result<Value> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, ValueRef<'_>) -> FromSqlResult<()> + Send + Sync>;

/// One persistable field of an entity: its column and how to read and write it
pub struct FieldDescriptor<T> {
    name: &'static str,
    column: String,
    identifying: bool,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Describe a field through a pair of accessors
    ///
    /// The column defaults to the field name.
    pub fn new<V>(
        name: &'static str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self
    where
        V: ToSql + FromSql + 'static,
    {
        Self {
            name,
            column: name.to_string(),
            identifying: false,
            get: Box::new(move |entity| to_value(get(entity))),
            set: Box::new(move |entity, value| {
                set(entity, V::column_result(value)?);
                Ok(())
            }),
        }
    }

    pub fn with_column<S: Into<String>>(mut self, column: S) -> Self {
        self.column = column.into();
        self
    }

    /// Mark this field as the one identifying a row
    pub fn identifying(mut self) -> Self {
        self.identifying = true;
        self
    }
}

impl<T> FieldDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_identifying(&self) -> bool {
        self.identifying
    }

    /// Read the field of `entity` as a bindable value
    pub fn value(&self, entity: &T) -> rusqlite::Result<Value> {
        (self.get)(entity)
    }

    /// Coerce `value` to the field type and write it into `entity`
    pub fn assign(&self, entity: &mut T, value: ValueRef<'_>) -> FromSqlResult<()> {
        (self.set)(entity, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("identifying", &self.identifying)
            .finish_non_exhaustive()
    }
}

/// Registration-time configuration of an entity type
///
/// ```
/// use vorm::{EntityConfig, FieldDescriptor};
///
/// #[derive(Default)]
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// let config = EntityConfig::<Tag>::new("Tag")
///     .id("id", |t: &Tag| &t.id, |t: &mut Tag, v| t.id = v)
///     .descriptor(
///         FieldDescriptor::new("label", |t: &Tag| &t.label, |t: &mut Tag, v| t.label = v)
///             .with_column("tag_label"),
///     );
/// ```
pub struct EntityConfig<T> {
    name: &'static str,
    table: Option<String>,
    fields: Vec<FieldDescriptor<T>>,
    new: fn() -> T,
}

impl<T: Default + 'static> EntityConfig<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_constructor(name, T::default)
    }
}

impl<T: 'static> EntityConfig<T> {
    /// Configure an entity whose zero value is built by `new`
    pub fn with_constructor(name: &'static str, new: fn() -> T) -> Self {
        Self {
            name,
            table: None,
            fields: Vec::new(),
            new,
        }
    }

    /// Override the default table name
    pub fn table<S: Into<String>>(mut self, table: S) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn id<V>(self, name: &'static str, get: fn(&T) -> &V, set: fn(&mut T, V)) -> Self
    where
        V: ToSql + FromSql + 'static,
    {
        self.descriptor(FieldDescriptor::new(name, get, set).identifying())
    }

    pub fn field<V>(self, name: &'static str, get: fn(&T) -> &V, set: fn(&mut T, V)) -> Self
    where
        V: ToSql + FromSql + 'static,
    {
        self.descriptor(FieldDescriptor::new(name, get, set))
    }

    pub fn descriptor(mut self, field: FieldDescriptor<T>) -> Self {
        self.fields.push(field);
        self
    }
}

/// Resolved description of an entity type
///
/// Fields keep their declaration order; statements bind parameters in that
/// order.
pub struct EntityMetadata<T> {
    name: &'static str,
    table: String,
    fields: Vec<FieldDescriptor<T>>,
    identifying: usize,
    new: fn() -> T,
}

impl<T> EntityMetadata<T> {
    pub(crate) fn from_config(config: EntityConfig<T>) -> Result<Self> {
        let EntityConfig {
            name,
            table,
            fields,
            new,
        } = config;

        let table = table.unwrap_or_else(|| default_table_name(name));
        check_identifier(name, &table)?;

        let mut columns = HashSet::new();
        for field in &fields {
            check_identifier(name, field.column())?;

            if !columns.insert(field.column().to_ascii_lowercase()) {
                return Err(Error::Invalid(format!(
                    "{name} maps column {} more than once",
                    field.column()
                )));
            }
        }

        let mut identifying = fields.iter().enumerate().filter(|(_, f)| f.is_identifying());
        let Some((index, _)) = identifying.next() else {
            return Err(Error::MissingIdentityField(name));
        };
        if identifying.next().is_some() {
            return Err(Error::Invalid(format!(
                "{name} has more than one identifying field"
            )));
        }

        Ok(Self {
            name,
            table,
            fields,
            identifying: index,
            new,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn identifying_field(&self) -> &FieldDescriptor<T> {
        &self.fields[self.identifying]
    }

    pub fn persistable_fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Persistable fields minus the identifying one
    pub fn updatable_fields(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter().filter(|field| !field.is_identifying())
    }

    /// Identity value of `entity`, `Value::Null` when unset
    pub fn identity(&self, entity: &T) -> rusqlite::Result<Value> {
        self.identifying_field().value(entity)
    }

    pub(crate) fn instantiate(&self) -> T {
        (self.new)()
    }
}

impl<T> fmt::Debug for EntityMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMetadata")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .field("identifying", &self.identifying)
            .finish_non_exhaustive()
    }
}

/// Lower-cased type name followed by `s`
pub fn default_table_name(type_name: &str) -> String {
    format!("{}s", type_name.to_lowercase())
}

/// Table and column names end up in SQL text, so only plain identifiers are
/// accepted.
fn check_identifier(entity: &'static str, identifier: &str) -> Result<()> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Invalid(format!(
            "{entity} uses {identifier:?}, which is not a plain SQL identifier"
        )))
    }
}
