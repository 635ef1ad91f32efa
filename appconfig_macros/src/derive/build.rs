//! Token generation for the descriptor table.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Field, Ident, Type};

use super::parse::FieldAttrs;

/// Maps a supported leaf type to its `ValueKind` and `FieldRef`/`FieldMut`
/// variant names. Anything else is not a leaf.
pub(crate) fn leaf_variant(ty: &Type) -> Option<(&'static str, &'static str)> {
    let Type::Path(path) = ty else { return None };
    if path.qself.is_some() {
        return None;
    }
    let ident = path.path.segments.last()?.ident.to_string();
    let pair = match ident.as_str() {
        "String" => ("Str", "Str"),
        "bool" => ("Bool", "Bool"),
        "i8" => ("Int", "I8"),
        "i16" => ("Int", "I16"),
        "i32" => ("Int", "I32"),
        "i64" => ("Int", "I64"),
        "isize" => ("Int", "Isize"),
        "u8" => ("Uint", "U8"),
        "u16" => ("Uint", "U16"),
        "u32" => ("Uint", "U32"),
        "u64" => ("Uint", "U64"),
        "usize" => ("Uint", "Usize"),
        "f32" => ("Float", "F32"),
        "f64" => ("Float", "F64"),
        _ => return None,
    };
    Some(pair)
}

pub(crate) fn leaf_tokens(field: &Field, attrs: &FieldAttrs) -> syn::Result<TokenStream> {
    let Some((kind, variant)) = leaf_variant(&field.ty) else {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "unsupported field type for AppConfig; mark nested configuration \
             structs with #[conf(nested)] or #[conf(flatten)]",
        ));
    };
    let name = field.ident.as_ref().expect("named field");
    let name_lit = name.to_string();
    let meta = meta_tokens(attrs);
    let kind = Ident::new(kind, Span::call_site());
    let variant = Ident::new(variant, Span::call_site());
    Ok(quote! {
        ::appconfig::schema::FieldSpec::leaf(
            #name_lit,
            #meta,
            ::appconfig::schema::ValueKind::#kind,
            |cfg: &Self| ::appconfig::schema::FieldRef::#variant(&cfg.#name),
            |cfg: &mut Self| ::appconfig::schema::FieldMut::#variant(&mut cfg.#name),
        )
    })
}

pub(crate) fn group_tokens(field: &Field, attrs: &FieldAttrs) -> TokenStream {
    let name = field.ident.as_ref().expect("named field");
    let name_lit = name.to_string();
    let meta = meta_tokens(attrs);
    let flatten = attrs.flatten;
    let ty = &field.ty;
    quote! {
        ::appconfig::schema::FieldSpec::group(
            #name_lit,
            #meta,
            #flatten,
            <#ty as ::appconfig::AppConfig>::schema()
                .into_iter()
                .map(|field| field.lift(
                    |cfg: &Self| &cfg.#name,
                    |cfg: &mut Self| &mut cfg.#name,
                ))
                .collect(),
        )
    }
}

fn meta_tokens(attrs: &FieldAttrs) -> TokenStream {
    let env = opt_str(attrs.env.as_deref());
    let flag = opt_str(attrs.flag.as_deref());
    let help = opt_str(attrs.help.as_deref());
    let default = opt_str(attrs.default.as_deref());
    let show_help = attrs.show_help;
    let print_example = attrs.print_example;
    let config_file = attrs.config_file;
    let skip_file = attrs.skip_file;
    quote! {
        ::appconfig::schema::FieldMeta {
            env: #env,
            flag: #flag,
            help: #help,
            default: #default,
            show_help: #show_help,
            print_example: #print_example,
            config_file: #config_file,
            skip_file: #skip_file,
        }
    }
}

fn opt_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}
