//! Ordered-source resolution and the top-level loading façade.

use std::collections::HashMap;
use std::env;
use std::fmt;

use crate::error::{ConfigError, StopCause};
use crate::info::ConfigInfo;
use crate::schema::FieldRef;
use crate::value::{parse_flags, parse_into};
use crate::AppConfig;

/// One kind of value source for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The parameter's literal `default` metadata.
    Defaults,
    /// The process argument vector.
    Flags,
    /// Environment variables.
    Env,
    /// The config-file overlay. Never consulted by [`ConfigInfo::load_in_order`];
    /// the file stage runs strictly afterwards.
    File,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defaults => "default",
            Self::Flags => "flag",
            Self::Env => "environment",
            Self::File => "file",
        })
    }
}

/// Default source order: a present flag value overrides the default, and a
/// present environment value overrides both.
pub const DEFAULT_ORDER: &[Source] = &[Source::Defaults, Source::Flags, Source::Env];

/// Explicit process inputs for resolution. Passing these in (rather than
/// reading them ambiently) keeps the resolver testable without mutating
/// process state.
pub struct Sources {
    args: Vec<String>,
    env: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl Sources {
    /// Snapshots the real process arguments (program name excluded) and
    /// wraps the real environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            args: env::args().skip(1).collect(),
            env: Box::new(|key| env::var(key).ok()),
        }
    }

    /// Builds fixed inputs from an argument vector and a variable map,
    /// mainly for tests.
    #[must_use]
    pub fn new(args: Vec<String>, vars: HashMap<String, String>) -> Self {
        Self {
            args,
            env: Box::new(move |key| vars.get(key).cloned()),
        }
    }
}

/// Runtime values of the special control parameters after one resolution.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Controls {
    /// The designated help control resolved to `true`.
    pub help_requested: bool,
    /// The designated example control resolved to `true`.
    pub example_requested: bool,
    /// Resolved config-file path; empty means no file to overlay.
    pub config_file: String,
}

impl<T: AppConfig> ConfigInfo<T> {
    /// Fills `cfg` parameter-by-parameter from the given source order.
    /// Every source that yields a value writes immediately, so for each
    /// parameter the last source in `order` wins. Repeats and omissions in
    /// `order` are permitted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] as soon as any source string fails to
    /// convert; fields already written stay written.
    pub fn load_in_order(
        &self,
        cfg: &mut T,
        order: &[Source],
        sources: &Sources,
    ) -> Result<Controls, ConfigError> {
        let flags = if order.contains(&Source::Flags) {
            parse_flags(&sources.args)
        } else {
            HashMap::new()
        };

        let mut controls = Controls::default();
        for (position, param) in self.params.iter().enumerate() {
            for source in order {
                let raw = match source {
                    Source::Defaults if !param.default.is_empty() => Some(param.default.clone()),
                    Source::Flags if !param.flag_name.is_empty() => {
                        flags.get(&param.flag_name).cloned()
                    }
                    // Absent or empty environment values fall through to
                    // whatever an earlier source resolved.
                    Source::Env if !param.env_name.is_empty() => {
                        (sources.env)(&param.env_name).filter(|value| !value.is_empty())
                    }
                    _ => None,
                };
                let Some(raw) = raw else { continue };
                parse_into((param.get_mut)(cfg), &raw).map_err(|reason| ConfigError::Parse {
                    path: param.path.clone(),
                    raw,
                    origin: *source,
                    reason,
                })?;
            }

            if self.help_param == Some(position) {
                if let FieldRef::Bool(value) = (param.get)(cfg) {
                    controls.help_requested = *value;
                }
            }
            if self.example_param == Some(position) {
                if let FieldRef::Bool(value) = (param.get)(cfg) {
                    controls.example_requested = *value;
                }
            }
            if self.config_param == Some(position) {
                if let FieldRef::Str(value) = (param.get)(cfg) {
                    controls.config_file.clone_from(value);
                }
            }
        }
        tracing::debug!(?order, parameters = self.params.len(), "sources resolved");
        Ok(controls)
    }

    /// Resolves with [`DEFAULT_ORDER`] and then overlays the config file,
    /// if one was named. File content therefore has the highest precedence.
    ///
    /// # Errors
    ///
    /// Propagates parse failures from resolution and read/format failures
    /// from the file overlay.
    pub fn load(&self, cfg: &mut T, sources: &Sources) -> Result<Controls, ConfigError> {
        let controls = self.load_in_order(cfg, DEFAULT_ORDER, sources)?;
        self.try_load_config_file(cfg, &controls.config_file)?;
        Ok(controls)
    }
}

/// Loads `cfg` from defaults, flags, environment, and the optional config
/// file, reading the real process arguments and environment. When the help
/// or example control fires, the corresponding text is printed to stdout
/// and [`ConfigError::Stop`] is returned; callers should exit cleanly.
///
/// # Errors
///
/// [`ConfigError::Stop`] after printing help or an example (not a failure),
/// or any genuine resolution error.
pub fn load<T: AppConfig>(cfg: &mut T, env_prefix: &str) -> Result<(), ConfigError> {
    load_from(cfg, env_prefix, &Sources::from_process())
}

/// Like [`load`], with explicit process inputs.
///
/// # Errors
///
/// Same conditions as [`load`].
pub fn load_from<T: AppConfig>(
    cfg: &mut T,
    env_prefix: &str,
    sources: &Sources,
) -> Result<(), ConfigError> {
    let info = ConfigInfo::<T>::new(env_prefix);
    let controls = info.load(cfg, sources)?;

    let mut stop = None;
    if controls.help_requested {
        print!("{}", info.render_help());
        stop = Some(StopCause::HelpShown);
    }
    if controls.example_requested {
        let example = info.render_example(cfg)?;
        print!(
            "Config file example:\n\
             ## >>>>> config file starts here >>>>>\n\
             {example}\
             ## >>>>> config file ends here <<<<<<\n"
        );
        stop.get_or_insert(StopCause::ExampleShown);
    }
    match stop {
        Some(cause) => Err(ConfigError::Stop(cause)),
        None => Ok(()),
    }
}

/// Convenience wrapper around [`load`]: exits the process with status 0
/// once help or an example was printed.
///
/// # Panics
///
/// Panics on any genuine resolution failure.
pub fn must_load<T: AppConfig>(cfg: &mut T, env_prefix: &str) {
    match load(cfg, env_prefix) {
        Ok(()) => {}
        Err(ConfigError::Stop(_)) => std::process::exit(0),
        Err(err) => panic!("configuration loading failed: {err}"),
    }
}
