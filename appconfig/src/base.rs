//! Reserved control bundle for embedding into application schemas.

use crate::schema::{FieldMeta, FieldMut, FieldRef, FieldSpec, ValueKind};
use crate::AppConfig;

/// Ready-made `--help`, `--example`, and `--config=<file>` controls.
///
/// Embed it with `#[conf(flatten)]` to get the standard behaviour for
/// free. All three fields are excluded from environment sourcing and from
/// the config file itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigBase {
    /// Print the parameter table and stop.
    pub show_help: bool,
    /// Print an example config document and stop.
    pub print_example: bool,
    /// Path of a YAML file to overlay once the other sources resolved.
    pub config_file: String,
}

// Implemented by hand rather than derived; it doubles as the in-crate
// exemplar of the descriptor API the macro generates.
impl AppConfig for ConfigBase {
    fn schema() -> Vec<FieldSpec<Self>> {
        vec![
            FieldSpec::leaf(
                "show_help",
                FieldMeta {
                    env: Some("-"),
                    flag: Some("help"),
                    help: Some("show this help"),
                    default: Some("false"),
                    show_help: true,
                    skip_file: true,
                    ..FieldMeta::default()
                },
                ValueKind::Bool,
                |cfg: &Self| FieldRef::Bool(&cfg.show_help),
                |cfg: &mut Self| FieldMut::Bool(&mut cfg.show_help),
            ),
            FieldSpec::leaf(
                "print_example",
                FieldMeta {
                    env: Some("-"),
                    flag: Some("example"),
                    help: Some("show config example"),
                    default: Some("false"),
                    print_example: true,
                    skip_file: true,
                    ..FieldMeta::default()
                },
                ValueKind::Bool,
                |cfg: &Self| FieldRef::Bool(&cfg.print_example),
                |cfg: &mut Self| FieldMut::Bool(&mut cfg.print_example),
            ),
            FieldSpec::leaf(
                "config_file",
                FieldMeta {
                    env: Some("-"),
                    flag: Some("config"),
                    help: Some("config file to load"),
                    config_file: true,
                    skip_file: true,
                    ..FieldMeta::default()
                },
                ValueKind::Str,
                |cfg: &Self| FieldRef::Str(&cfg.config_file),
                |cfg: &mut Self| FieldMut::Str(&mut cfg.config_file),
            ),
        ]
    }
}
