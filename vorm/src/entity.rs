use crate::EntityConfig;

/// A type that can be registered as persistable
///
/// Usually derived:
///
/// ```
/// use vorm::Entity;
///
/// #[derive(Default, Entity)]
/// #[entity(table = "users")]
/// pub struct User {
///     #[field(id)]
///     id: i64,
///     username: String,
///     #[field(column = "mail")]
///     email: String,
/// }
/// ```
pub trait Entity: Sized + 'static {
    fn config() -> EntityConfig<Self>;
}
