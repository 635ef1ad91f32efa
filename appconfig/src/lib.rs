//! Schema-driven application configuration.
//!
//! A configuration struct annotated with `#[conf(...)]` attributes and
//! deriving [`AppConfig`] registers itself as a flat list of addressable
//! parameters. Each parameter's environment-variable and `--flag` names are
//! derived from the field names (or overridden per field), and values are
//! resolved from built-in defaults, the argument vector, environment
//! variables, and an optional YAML file, in that order of precedence — the
//! last source that yields a value wins, and file content wins over
//! everything.
//!
//! Embed [`ConfigBase`] to get `--help`, `--example`, and
//! `--config=<file>` handling for free.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use appconfig::{AppConfig, Sources};
//!
//! #[derive(Debug, Default, AppConfig)]
//! struct HttpConfig {
//!     #[conf(flag = "addr", default = ":8080", help = "listen address")]
//!     address: String,
//!     #[conf(help = "enable TLS")]
//!     use_tls: bool,
//! }
//!
//! #[derive(Debug, Default, AppConfig)]
//! struct AppCfg {
//!     #[conf(default = "My App", env = "name", flag = "name")]
//!     title: String,
//!     #[conf(nested)]
//!     http: HttpConfig,
//! }
//!
//! let mut cfg = AppCfg::default();
//! let sources = Sources::new(
//!     vec!["--http-addr=:9090".into()],
//!     HashMap::from([("APP_NAME".to_owned(), "demo".to_owned())]),
//! );
//! appconfig::load_from(&mut cfg, "APP", &sources)?;
//! assert_eq!(cfg.title, "demo", "environment beats the default");
//! assert_eq!(cfg.http.address, ":9090");
//! assert!(!cfg.http.use_tls);
//! # Ok::<(), appconfig::ConfigError>(())
//! ```

pub use appconfig_macros::AppConfig;

mod base;
mod error;
mod file;
mod info;
mod load;
mod name;
pub mod schema;
mod value;

pub use base::ConfigBase;
pub use error::{ConfigError, StopCause};
pub use info::{ConfigInfo, ParamView};
pub use load::{load, load_from, must_load, Controls, Source, Sources, DEFAULT_ORDER};
pub use value::ValueError;

/// A configuration schema type, normally implemented via
/// `#[derive(AppConfig)]`.
///
/// The descriptor table is built once per call to [`ConfigInfo::new`] and
/// reused read-only for any number of resolutions; see the [`schema`]
/// module for the descriptor model and for implementing the trait by hand.
pub trait AppConfig: Sized + 'static {
    /// The field descriptors of this schema, addressed from `Self`.
    fn schema() -> Vec<schema::FieldSpec<Self>>;
}
