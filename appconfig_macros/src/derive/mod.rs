//! Expansion of the `AppConfig` derive.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub(crate) mod build;
pub(crate) mod parse;

use build::{group_tokens, leaf_tokens};
use parse::field_attrs;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic configuration structs are not supported",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "AppConfig can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "AppConfig requires named fields",
        ));
    };

    let mut specs = Vec::new();
    for field in &named.named {
        let attrs = field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        if attrs.nested || attrs.flatten {
            specs.push(group_tokens(field, &attrs));
        } else {
            specs.push(leaf_tokens(field, &attrs)?);
        }
    }

    let ident = &input.ident;
    Ok(quote! {
        #[automatically_derived]
        impl ::appconfig::AppConfig for #ident {
            fn schema() -> ::std::vec::Vec<::appconfig::schema::FieldSpec<Self>> {
                ::std::vec![
                    #( #specs ),*
                ]
            }
        }
    })
}
