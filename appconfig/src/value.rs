//! Conversion of raw source strings into typed field values, and parsing
//! of the argument vector into a flag map.

use std::collections::HashMap;

use thiserror::Error;

use crate::schema::FieldMut;

/// Why a raw source string could not become a field value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// Not one of the recognised boolean literals.
    #[error("invalid boolean literal")]
    Bool,
    /// Integer parse, sign, or range failure.
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),
    /// Floating-point parse failure.
    #[error(transparent)]
    Float(#[from] std::num::ParseFloatError),
    /// The config file held a sequence or mapping where a scalar was needed.
    #[error("expected a scalar value")]
    NotScalar,
}

/// Case-insensitive boolean literals: `true`/`1`/`yes`/`on` and their
/// negative counterparts.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ValueError::Bool),
    }
}

/// Parses `raw` into the field behind `field`, for the exact declared
/// width. An empty string on a boolean field means a bare presence flag
/// and resolves to `true`.
pub(crate) fn parse_into(field: FieldMut<'_>, raw: &str) -> Result<(), ValueError> {
    match field {
        FieldMut::Str(slot) => *slot = raw.to_owned(),
        FieldMut::Bool(slot) => {
            *slot = if raw.is_empty() { true } else { parse_bool(raw)? };
        }
        FieldMut::I8(slot) => *slot = raw.parse()?,
        FieldMut::I16(slot) => *slot = raw.parse()?,
        FieldMut::I32(slot) => *slot = raw.parse()?,
        FieldMut::I64(slot) => *slot = raw.parse()?,
        FieldMut::Isize(slot) => *slot = raw.parse()?,
        FieldMut::U8(slot) => *slot = raw.parse()?,
        FieldMut::U16(slot) => *slot = raw.parse()?,
        FieldMut::U32(slot) => *slot = raw.parse()?,
        FieldMut::U64(slot) => *slot = raw.parse()?,
        FieldMut::Usize(slot) => *slot = raw.parse()?,
        FieldMut::F32(slot) => *slot = raw.parse()?,
        FieldMut::F64(slot) => *slot = raw.parse()?,
    }
    Ok(())
}

/// Splits each raw token on the first `=`: the left side is the key (kept
/// verbatim, leading `--` included), the right side is the value, empty
/// when no `=` is present. The last occurrence of a duplicate key wins.
pub(crate) fn parse_flags(args: &[String]) -> HashMap<String, String> {
    let mut flags = HashMap::new();
    for arg in args {
        let (key, value) = match arg.split_once('=') {
            Some((key, value)) => (key, value),
            None => (arg.as_str(), ""),
        };
        flags.insert(key.to_owned(), value.to_owned());
    }
    flags
}
