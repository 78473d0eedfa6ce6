use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

mod entity;
use entity::Entity;

mod field;
use field::Field;

pub fn impl_entity(input: DeriveInput) -> Result<TokenStream> {
    let entity = Entity::read(&input)?;
    let Entity {
        ident: struct_ident,
        table,
        ..
    } = &entity;
    let name = entity.name();

    let mut config = quote! {
        ::vorm::EntityConfig::<Self>::new(#name)
    };

    if let Some(table) = table {
        config.extend(quote!(.table(#table)));
    }

    let mut id_field = Option::<Field>::None;

    for result in entity.fields() {
        let field = result?;

        if field.skip() {
            continue;
        }

        if field.id() && id_field.is_some() {
            return Err(field.error("Only one id field allowed per entity"));
        }

        let descriptor = field.as_descriptor();
        config.extend(quote!(.descriptor(#descriptor)));

        if field.id() {
            id_field = Some(field);
        }
    }

    if id_field.is_none() {
        return Err(entity.error(
            "Missing id field, mark one with #[field(id)]",
        ));
    }

    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::vorm::Entity for #struct_ident #ty_generics #where_clause {
            fn config() -> ::vorm::EntityConfig<Self> {
                #config
            }
        }
    })
}
