//! Config-file overlay and example rendering. Both sides use the same
//! document shape: a YAML mapping keyed by declared (not derived) field
//! names, nested the way the schema is nested.

use std::fs;

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;
use crate::info::ConfigInfo;
use crate::load::Source;
use crate::schema::FieldRef;
use crate::value::{parse_into, ValueError};
use crate::AppConfig;

impl<T: AppConfig> ConfigInfo<T> {
    /// Overlays the YAML document at `path` onto `cfg`. An empty `path`
    /// means no file was configured and is a no-op. Keys absent from the
    /// file leave the already-resolved values untouched; parameters marked
    /// `skip_file` are never overlaid.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] when the file cannot be read,
    /// [`ConfigError::FileFormat`] on malformed YAML, and
    /// [`ConfigError::Parse`] when a present value does not fit its field.
    pub fn try_load_config_file(&self, cfg: &mut T, path: &str) -> Result<(), ConfigError> {
        if path.is_empty() {
            return Ok(());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.into(),
            source,
        })?;
        let doc: Value = serde_yaml::from_str(&text).map_err(|source| ConfigError::FileFormat {
            path: path.into(),
            source,
        })?;
        tracing::debug!(path, "overlaying config file");

        for param in self.params.iter().filter(|param| !param.skip_file) {
            let Some(node) = lookup(&doc, &param.path) else {
                continue;
            };
            let raw = match node {
                // An explicit null carries no value to overlay.
                Value::Null => continue,
                Value::Bool(value) => value.to_string(),
                Value::Number(value) => value.to_string(),
                Value::String(value) => value.clone(),
                other => {
                    return Err(ConfigError::Parse {
                        path: param.path.clone(),
                        raw: format!("{other:?}"),
                        origin: Source::File,
                        reason: ValueError::NotScalar,
                    })
                }
            };
            parse_into((param.get_mut)(cfg), &raw).map_err(|reason| ConfigError::Parse {
                path: param.path.clone(),
                raw,
                origin: Source::File,
                reason,
            })?;
        }
        Ok(())
    }

    /// Renders `cfg` as a YAML document in exactly the shape
    /// [`Self::try_load_config_file`] reads back.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Render`] when YAML serialisation fails.
    pub fn render_example(&self, cfg: &T) -> Result<String, ConfigError> {
        let mut root = Value::Mapping(Mapping::new());
        for param in self.params.iter().filter(|param| !param.skip_file) {
            insert(&mut root, &param.path, to_yaml((param.get)(cfg)));
        }
        serde_yaml::to_string(&root).map_err(ConfigError::Render)
    }
}

fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = doc;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    Some(node)
}

fn insert(root: &mut Value, path: &str, value: Value) {
    let mut node = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let Value::Mapping(map) = node else { return };
        let key = Value::String(segment.to_owned());
        if segments.peek().is_none() {
            map.insert(key, value);
            return;
        }
        node = map
            .entry(key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }
}

fn to_yaml(field: FieldRef<'_>) -> Value {
    match field {
        FieldRef::Str(value) => Value::String(value.clone()),
        FieldRef::Bool(value) => Value::Bool(*value),
        FieldRef::I8(value) => Value::Number(i64::from(*value).into()),
        FieldRef::I16(value) => Value::Number(i64::from(*value).into()),
        FieldRef::I32(value) => Value::Number(i64::from(*value).into()),
        FieldRef::I64(value) => Value::Number((*value).into()),
        FieldRef::Isize(value) => Value::Number((*value as i64).into()),
        FieldRef::U8(value) => Value::Number(u64::from(*value).into()),
        FieldRef::U16(value) => Value::Number(u64::from(*value).into()),
        FieldRef::U32(value) => Value::Number(u64::from(*value).into()),
        FieldRef::U64(value) => Value::Number((*value).into()),
        FieldRef::Usize(value) => Value::Number((*value as u64).into()),
        FieldRef::F32(value) => Value::Number(f64::from(*value).into()),
        FieldRef::F64(value) => Value::Number((*value).into()),
    }
}
