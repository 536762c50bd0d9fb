use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Member, parse_macro_input, spanned::Spanned};

/// Find the field holding the system's `Members`. A field tagged `#[members]` wins, otherwise a
/// field named `members` is used.
fn members_field(ast: &DeriveInput) -> syn::Result<Member> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "System can only be derived for structs",
        ));
    };

    let tagged = data
        .fields
        .iter()
        .enumerate()
        .find(|(_, field)| field.attrs.iter().any(|a| a.path().is_ident("members")));

    if let Some((index, field)) = tagged {
        return Ok(match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(syn::Index {
                index: index as u32,
                span: field.span(),
            }),
        });
    }

    if let Fields::Named(fields) = &data.fields {
        if let Some(ident) = fields
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .find(|ident| *ident == "members")
        {
            return Ok(Member::Named(ident.clone()));
        }
    }

    Err(syn::Error::new(
        ast.ident.span(),
        "System requires a `members` field or a field marked with #[members]",
    ))
}

pub fn derive_system(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let member = match members_field(&ast) {
        Ok(member) => member,
        Err(err) => return err.to_compile_error().into(),
    };

    let struct_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    TokenStream::from(quote! {
        impl #impl_generics ::ember_engine::ecs::System for #struct_name #type_generics #where_clause {
            fn members(&self) -> &::ember_engine::ecs::system::Members {
                &self.#member
            }

            fn members_mut(&mut self) -> &mut ::ember_engine::ecs::system::Members {
                &mut self.#member
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    })
}
