use syn::{parse_macro_input, DeriveInput};

mod entity;

/// Implement `vorm::Entity` for a struct with named fields
///
/// - `#[entity(table = "name")]` overrides the default table name
/// - `#[field(id)]` marks the identifying field, exactly one is required
/// - `#[field(column = "name")]` overrides the column of a field
/// - `#[field(skip)]` leaves a field out of persistence
#[proc_macro_derive(Entity, attributes(entity, field))]
pub fn derive_entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    entity::impl_entity(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
