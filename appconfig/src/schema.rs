//! The parameter-descriptor model behind `#[derive(AppConfig)]`.
//!
//! Rust has no runtime struct reflection, so a schema type registers itself
//! once as a table of field descriptors. A leaf descriptor carries the
//! field's metadata together with a typed accessor/setter pair addressing
//! that field from the schema root; a group descriptor carries the already
//! re-addressed descriptors of a nested schema. The walk in
//! [`crate::ConfigInfo`] consumes this tree and never inspects types again.

/// Coarse kind of a leaf configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `String`.
    Str,
    /// `bool`.
    Bool,
    /// Signed integers of any width.
    Int,
    /// Unsigned integers of any width.
    Uint,
    /// `f32` or `f64`.
    Float,
}

/// Shared reference to one leaf field of a live configuration instance.
#[derive(Debug)]
pub enum FieldRef<'a> {
    /// A `String` field.
    Str(&'a String),
    /// A `bool` field.
    Bool(&'a bool),
    /// An `i8` field.
    I8(&'a i8),
    /// An `i16` field.
    I16(&'a i16),
    /// An `i32` field.
    I32(&'a i32),
    /// An `i64` field.
    I64(&'a i64),
    /// An `isize` field.
    Isize(&'a isize),
    /// A `u8` field.
    U8(&'a u8),
    /// A `u16` field.
    U16(&'a u16),
    /// A `u32` field.
    U32(&'a u32),
    /// A `u64` field.
    U64(&'a u64),
    /// A `usize` field.
    Usize(&'a usize),
    /// An `f32` field.
    F32(&'a f32),
    /// An `f64` field.
    F64(&'a f64),
}

/// Mutable reference to one leaf field of a live configuration instance.
#[derive(Debug)]
pub enum FieldMut<'a> {
    /// A `String` field.
    Str(&'a mut String),
    /// A `bool` field.
    Bool(&'a mut bool),
    /// An `i8` field.
    I8(&'a mut i8),
    /// An `i16` field.
    I16(&'a mut i16),
    /// An `i32` field.
    I32(&'a mut i32),
    /// An `i64` field.
    I64(&'a mut i64),
    /// An `isize` field.
    Isize(&'a mut isize),
    /// A `u8` field.
    U8(&'a mut u8),
    /// A `u16` field.
    U16(&'a mut u16),
    /// A `u32` field.
    U32(&'a mut u32),
    /// A `u64` field.
    U64(&'a mut u64),
    /// A `usize` field.
    Usize(&'a mut usize),
    /// An `f32` field.
    F32(&'a mut f32),
    /// An `f64` field.
    F64(&'a mut f64),
}

/// Borrowing accessor from the schema root to one leaf field.
pub type GetFn<T> = for<'a> fn(&'a T) -> FieldRef<'a>;

/// Mutating accessor from the schema root to one leaf field.
pub type GetMutFn<T> = for<'a> fn(&'a mut T) -> FieldMut<'a>;

pub(crate) type DynGet<T> = Box<dyn for<'a> Fn(&'a T) -> FieldRef<'a> + Send + Sync>;
pub(crate) type DynGetMut<T> = Box<dyn for<'a> Fn(&'a mut T) -> FieldMut<'a> + Send + Sync>;

/// Raw field metadata as declared via `#[conf(...)]` attributes.
///
/// The string values are kept exactly as written; name derivation and the
/// `"-"` opt-out convention are interpreted later by the schema walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMeta {
    /// Environment-name segment override; `Some("-")` disables env sourcing.
    pub env: Option<&'static str>,
    /// Flag-name segment override; `Some("-")` disables flag sourcing.
    pub flag: Option<&'static str>,
    /// Literal help text.
    pub help: Option<&'static str>,
    /// Literal default value string.
    pub default: Option<&'static str>,
    /// Designates the help control (effective on `bool` leaves only).
    pub show_help: bool,
    /// Designates the example control (effective on `bool` leaves only).
    pub print_example: bool,
    /// Designates the config-file path (effective on `String` leaves only).
    pub config_file: bool,
    /// Excludes the field from file overlay and example rendering.
    pub skip_file: bool,
}

/// One field of a configuration schema: a leaf parameter, or a nested group
/// of fields already re-addressed to the root type `T`.
pub struct FieldSpec<T> {
    pub(crate) name: &'static str,
    pub(crate) meta: FieldMeta,
    pub(crate) node: FieldNode<T>,
}

pub(crate) enum FieldNode<T> {
    Leaf {
        kind: ValueKind,
        get: DynGet<T>,
        get_mut: DynGetMut<T>,
    },
    Group {
        flatten: bool,
        fields: Vec<FieldSpec<T>>,
    },
}

impl<T: 'static> FieldSpec<T> {
    /// Describes a leaf field holding one configuration value.
    #[must_use]
    pub fn leaf(
        name: &'static str,
        meta: FieldMeta,
        kind: ValueKind,
        get: GetFn<T>,
        get_mut: GetMutFn<T>,
    ) -> Self {
        Self {
            name,
            meta,
            node: FieldNode::Leaf {
                kind,
                get: Box::new(get),
                get_mut: Box::new(get_mut),
            },
        }
    }

    /// Describes a nested schema field. `flatten` groups add a path level
    /// but no naming level during the walk.
    #[must_use]
    pub fn group(name: &'static str, meta: FieldMeta, flatten: bool, fields: Vec<Self>) -> Self {
        Self {
            name,
            meta,
            node: FieldNode::Group { flatten, fields },
        }
    }

    /// Re-addresses this descriptor through a parent field, so one schema
    /// can embed another. The projections compose with the existing
    /// accessors; nothing is re-derived at resolution time.
    #[must_use]
    pub fn lift<P: 'static>(
        self,
        get: for<'a> fn(&'a P) -> &'a T,
        get_mut: for<'a> fn(&'a mut P) -> &'a mut T,
    ) -> FieldSpec<P> {
        let node = match self.node {
            FieldNode::Leaf {
                kind,
                get: leaf_get,
                get_mut: leaf_get_mut,
            } => {
                let lifted_get: DynGet<P> = Box::new(move |parent: &P| leaf_get(get(parent)));
                let lifted_get_mut: DynGetMut<P> =
                    Box::new(move |parent: &mut P| leaf_get_mut(get_mut(parent)));
                FieldNode::Leaf {
                    kind,
                    get: lifted_get,
                    get_mut: lifted_get_mut,
                }
            }
            FieldNode::Group { flatten, fields } => FieldNode::Group {
                flatten,
                fields: fields
                    .into_iter()
                    .map(|field| field.lift(get, get_mut))
                    .collect(),
            },
        };
        FieldSpec {
            name: self.name,
            meta: self.meta,
            node,
        }
    }
}
