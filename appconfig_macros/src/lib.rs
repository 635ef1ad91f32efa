//! Procedural macros for `appconfig`.
//!
//! `#[derive(AppConfig)]` turns an annotated struct into a parameter
//! descriptor table: one typed accessor/setter pair per leaf field, with
//! nested schemas re-addressed through their parent field. Field metadata
//! is declared with `#[conf(...)]` attributes; the full attribute table is
//! documented in the `appconfig` crate.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod derive;

/// Derive macro for the `appconfig::AppConfig` trait.
#[proc_macro_derive(AppConfig, attributes(conf))]
pub fn derive_app_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
