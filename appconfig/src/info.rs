//! Schema discovery: flattening a descriptor tree into an ordered list of
//! addressable parameters with derived names.

use crate::name::{
    add_prefix, tag_or_name, to_kebab_case, to_snake_case, ENV_SEPARATOR, FLAG_PREFIX,
    FLAG_SEPARATOR, PATH_SEPARATOR,
};
use crate::schema::{DynGet, DynGetMut, FieldNode, FieldSpec, ValueKind};
use crate::AppConfig;

pub(crate) struct Param<T> {
    pub(crate) path: String,
    pub(crate) env_name: String,
    pub(crate) flag_name: String,
    pub(crate) help_text: String,
    pub(crate) default: String,
    pub(crate) skip_file: bool,
    pub(crate) get: DynGet<T>,
    pub(crate) get_mut: DynGetMut<T>,
}

/// Borrowed view of one discovered parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamView<'a> {
    /// Dotted sequence of declared field names from the schema root.
    pub path: &'a str,
    /// Derived environment-variable name; empty when env sourcing is off.
    pub env_name: &'a str,
    /// Derived `--flag` name; empty when flag sourcing is off.
    pub flag_name: &'a str,
    /// Literal default value string; empty means no default.
    pub default: &'a str,
    /// Literal help text.
    pub help_text: &'a str,
}

/// Flattened description of one configuration schema: every addressable
/// parameter in walk order, plus the positions of the special control
/// parameters. Built once per schema type and reusable, read-only, across
/// any number of live instances.
pub struct ConfigInfo<T> {
    pub(crate) params: Vec<Param<T>>,
    pub(crate) help_param: Option<usize>,
    pub(crate) example_param: Option<usize>,
    pub(crate) config_param: Option<usize>,
}

impl<T: AppConfig> ConfigInfo<T> {
    /// Walks `T`'s schema and derives every parameter's names. `env_prefix`
    /// is prepended to all environment-variable names.
    #[must_use]
    pub fn new(env_prefix: &str) -> Self {
        let mut info = Self {
            params: Vec::new(),
            help_param: None,
            example_param: None,
            config_param: None,
        };
        info.walk(T::schema(), "", env_prefix, "");
        for param in &mut info.params {
            if !param.env_name.is_empty() {
                param.env_name = param.env_name.to_uppercase();
            }
            if !param.flag_name.is_empty() {
                param.flag_name = format!("{FLAG_PREFIX}{}", param.flag_name.to_lowercase());
            }
        }
        tracing::debug!(parameters = info.params.len(), "configuration schema walked");
        info
    }

    fn walk(
        &mut self,
        fields: Vec<FieldSpec<T>>,
        path_prefix: &str,
        env_prefix: &str,
        flag_prefix: &str,
    ) {
        for field in fields {
            let sub_path = add_prefix(field.name, path_prefix, PATH_SEPARATOR);
            match field.node {
                FieldNode::Group { flatten, fields } => {
                    // Flattened (embedded) groups add a path level but never
                    // a naming level.
                    let (sub_env, sub_flag) = if flatten {
                        (env_prefix.to_owned(), flag_prefix.to_owned())
                    } else {
                        (
                            add_prefix(
                                &tag_or_name(field.meta.env, &to_snake_case(field.name)),
                                env_prefix,
                                ENV_SEPARATOR,
                            ),
                            add_prefix(
                                &tag_or_name(field.meta.flag, &to_kebab_case(field.name)),
                                flag_prefix,
                                FLAG_SEPARATOR,
                            ),
                        )
                    };
                    self.walk(fields, &sub_path, &sub_env, &sub_flag);
                }
                FieldNode::Leaf { kind, get, get_mut } => {
                    self.params.push(Param {
                        path: sub_path,
                        env_name: add_prefix(
                            &tag_or_name(field.meta.env, &to_snake_case(field.name)),
                            env_prefix,
                            ENV_SEPARATOR,
                        ),
                        flag_name: add_prefix(
                            &tag_or_name(field.meta.flag, &to_kebab_case(field.name)),
                            flag_prefix,
                            FLAG_SEPARATOR,
                        ),
                        help_text: field.meta.help.unwrap_or_default().to_owned(),
                        default: field.meta.default.unwrap_or_default().to_owned(),
                        skip_file: field.meta.skip_file,
                        get,
                        get_mut,
                    });
                    // Control markers only take effect on the matching value
                    // kind; the last eligible field in walk order wins.
                    let position = Some(self.params.len() - 1);
                    if field.meta.show_help && kind == ValueKind::Bool {
                        self.help_param = position;
                    }
                    if field.meta.print_example && kind == ValueKind::Bool {
                        self.example_param = position;
                    }
                    if field.meta.config_file && kind == ValueKind::Str {
                        self.config_param = position;
                    }
                }
            }
        }
    }

    /// Iterates the discovered parameters in walk order.
    pub fn params(&self) -> impl Iterator<Item = ParamView<'_>> {
        self.params.iter().map(|param| ParamView {
            path: &param.path,
            env_name: &param.env_name,
            flag_name: &param.flag_name,
            default: &param.default,
            help_text: &param.help_text,
        })
    }

    /// Number of discovered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `true` when the schema has no eligible leaf fields. An empty schema
    /// is valid; resolution over it is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the tabular parameter listing: environment name, flag name,
    /// default value, and help text.
    #[must_use]
    pub fn render_help(&self) -> String {
        let mut out = String::from("List of program parameters\n");
        out.push_str(&format!(
            "{:<30} {:<30} {:<15} {}\n",
            "Environment param", "command-line flag", "default value", "description"
        ));
        for param in &self.params {
            out.push_str(&format!(
                "{:<30} {:<30} {:<15} {}\n",
                param.env_name, param.flag_name, param.default, param.help_text
            ));
        }
        out
    }
}
