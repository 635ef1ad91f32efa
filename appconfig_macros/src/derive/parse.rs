//! Parsing of `#[conf(...)]` field attributes.

use syn::{Attribute, LitStr};

/// Field-level attributes recognised by `#[derive(AppConfig)]`.
///
/// - `env`/`flag` override the derived name segments; `"-"` disables the
///   source for the field.
/// - `help`/`default` carry literal strings.
/// - `show_help`/`print_example`/`config_file` designate the control
///   parameters.
/// - `skip_file` keeps the field out of file overlay and example output.
/// - `nested` marks a field whose type is itself a schema; `flatten` does
///   the same without adding a naming level.
/// - `skip` omits the field from the schema entirely.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub env: Option<String>,
    pub flag: Option<String>,
    pub help: Option<String>,
    pub default: Option<String>,
    pub show_help: bool,
    pub print_example: bool,
    pub config_file: bool,
    pub skip_file: bool,
    pub nested: bool,
    pub flatten: bool,
    pub skip: bool,
}

pub(crate) fn field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("conf")) {
        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            if path.is_ident("env") {
                parsed.env = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if path.is_ident("flag") {
                parsed.flag = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if path.is_ident("help") {
                parsed.help = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if path.is_ident("default") {
                parsed.default = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if path.is_ident("show_help") {
                parsed.show_help = true;
            } else if path.is_ident("print_example") {
                parsed.print_example = true;
            } else if path.is_ident("config_file") {
                parsed.config_file = true;
            } else if path.is_ident("skip_file") {
                parsed.skip_file = true;
            } else if path.is_ident("nested") {
                parsed.nested = true;
            } else if path.is_ident("flatten") {
                parsed.flatten = true;
            } else if path.is_ident("skip") {
                parsed.skip = true;
            } else {
                return Err(meta.error("unknown `conf` attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}
