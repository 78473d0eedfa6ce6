use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Error, Ident, LitStr, Result, Type};

pub struct Field {
    syn_field: syn::Field,
    ident: Ident,
    ty: Type,
    column: Option<LitStr>,
    id: bool,
    skip: bool,
}

impl Field {
    pub fn read(input: &syn::Field) -> Result<Field> {
        let Some(ident) = input.ident.clone() else {
            return Err(Error::new(input.span(), "field must be named"));
        };

        let mut field = Field {
            syn_field: input.clone(),
            ident,
            ty: input.ty.clone(),
            column: None,
            id: false,
            skip: false,
        };

        if let Some(attr) = input
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("field"))
        {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    return field.set_id().map_err(|e| meta.error(e));
                }

                if meta.path.is_ident("skip") {
                    return field.set_skip().map_err(|e| meta.error(e));
                }

                if meta.path.is_ident("column") {
                    field.column = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                Err(meta.error("unrecognized field attribute"))
            })?;
        }

        if field.skip && field.column.is_some() {
            return Err(field.error("cannot be both skip and column"));
        }

        Ok(field)
    }

    fn set_id(&mut self) -> std::result::Result<(), &str> {
        if self.skip {
            return Err("cannot be both id and skip");
        }
        self.id = true;
        Ok(())
    }

    fn set_skip(&mut self) -> std::result::Result<(), &str> {
        if self.id {
            return Err("cannot be both skip and id");
        }
        self.skip = true;
        Ok(())
    }

    pub fn error(&self, message: &str) -> Error {
        Error::new(self.syn_field.span(), message)
    }

    pub fn id(&self) -> bool {
        self.id
    }

    pub fn skip(&self) -> bool {
        self.skip
    }

    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// `FieldDescriptor` expression for this field
    pub fn as_descriptor(&self) -> TokenStream {
        let ident = &self.ident;
        let ty = &self.ty;
        let name = self.name();

        let mut descriptor = quote! {
            ::vorm::FieldDescriptor::<Self>::new::<#ty>(
                #name,
                |entity: &Self| &entity.#ident,
                |entity: &mut Self, value| entity.#ident = value,
            )
        };

        if let Some(column) = &self.column {
            descriptor.extend(quote!(.with_column(#column)));
        }

        if self.id {
            descriptor.extend(quote!(.identifying()));
        }

        descriptor
    }
}
