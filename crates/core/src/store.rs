//! Schema-locked configuration store
//!
//! A [`ConfigStore`] is built once from a JSON object. Nested objects become
//! nested stores, everything else (arrays included) is kept as an opaque
//! value. The key set of every store is fixed at construction: writes may
//! replace existing values but never add or remove keys.
//!
//! Values are addressed by dotted paths such as `"mongo.host"`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigResult};

/// A single key's value inside a [`ConfigStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Any non-object value, stored as-is
    Scalar(Value),

    /// A nested object, itself schema-locked
    Nested(ConfigStore),
}

impl Entry {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Nested(ConfigStore::from_map(map)),
            other => Self::Scalar(other),
        }
    }

    /// Plain data for this entry; nested stores are exported
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Nested(store) => store.export(),
        }
    }
}

/// Tree of configuration values with a fixed key set
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    entries: BTreeMap<String, Entry>,
}

impl ConfigStore {
    /// Build a store from a JSON object
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfigData`] when `data` is not an object.
    pub fn new(data: Value) -> ConfigResult<Self> {
        match data {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(invalid_data(&other)),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, value)| (key, Entry::from_value(value)))
            .collect();

        Self { entries }
    }

    /// Resolve a dotted path to its entry
    ///
    /// Every segment, intermediate or terminal, must name an existing key.
    ///
    /// # Errors
    /// Returns [`ConfigError::UndefinedConfigPath`] for the first missing segment.
    pub fn entry(&self, path: &str) -> ConfigResult<&Entry> {
        self.resolve(path, path)
    }

    fn resolve<'a>(&'a self, path: &str, full_path: &str) -> ConfigResult<&'a Entry> {
        let (key, rest) = split_path(path);
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| undefined(path, full_path))?;

        match (entry, rest) {
            (_, None) => Ok(entry),
            (Entry::Nested(store), Some(rest)) => store.resolve(rest, full_path),
            (Entry::Scalar(_), Some(rest)) => Err(undefined(rest, full_path)),
        }
    }

    fn resolve_mut<'a>(&'a mut self, path: &str, full_path: &str) -> ConfigResult<&'a mut Entry> {
        let (key, rest) = split_path(path);
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| undefined(path, full_path))?;

        match rest {
            None => Ok(entry),
            Some(rest) => match entry {
                Entry::Nested(store) => store.resolve_mut(rest, full_path),
                Entry::Scalar(_) => Err(undefined(rest, full_path)),
            },
        }
    }

    /// Value at `path`; nested stores are returned as exported objects
    ///
    /// # Errors
    /// Returns [`ConfigError::UndefinedConfigPath`] if the path does not exist.
    pub fn get(&self, path: &str) -> ConfigResult<Value> {
        self.entry(path).map(Entry::to_value)
    }

    /// Value at `path` deserialized into `T`
    ///
    /// # Errors
    /// Returns [`ConfigError::UndefinedConfigPath`] if the path does not exist,
    /// or [`ConfigError::InvalidValue`] if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<T> {
        let value = self.get(path)?;

        serde_json::from_value(value).map_err(|source| ConfigError::InvalidValue {
            path: path.to_string(),
            source,
        })
    }

    /// Value at `path`, or `fallback` when the path does not exist
    #[must_use]
    pub fn get_or(&self, path: &str, fallback: Value) -> Value {
        self.get(path).unwrap_or(fallback)
    }

    /// Typed value at `path`, or `fallback` when the path does not exist
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the path exists but the value
    /// does not fit `T`.
    pub fn get_as_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> ConfigResult<T> {
        if self.isset(path) {
            self.get_as(path)
        } else {
            Ok(fallback)
        }
    }

    /// Live nested store at `path`
    ///
    /// # Errors
    /// Returns [`ConfigError::UndefinedConfigPath`] if the path does not exist,
    /// or [`ConfigError::NotASubStore`] if it holds a plain value.
    pub fn get_sub(&self, path: &str) -> ConfigResult<&Self> {
        match self.entry(path)? {
            Entry::Nested(store) => Ok(store),
            Entry::Scalar(_) => Err(ConfigError::NotASubStore {
                path: path.to_string(),
            }),
        }
    }

    /// Mutable nested store at `path`
    ///
    /// # Errors
    /// Same as [`ConfigStore::get_sub`].
    pub fn get_sub_mut(&mut self, path: &str) -> ConfigResult<&mut Self> {
        match self.resolve_mut(path, path)? {
            Entry::Nested(store) => Ok(store),
            Entry::Scalar(_) => Err(ConfigError::NotASubStore {
                path: path.to_string(),
            }),
        }
    }

    /// Overwrite the value at an existing `path`
    ///
    /// Plain values are replaced without any type check. A nested store is
    /// bulk-updated from `value`, which must be an object whose keys all
    /// exist in that store.
    ///
    /// # Errors
    /// Returns [`ConfigError::UndefinedConfigPath`] if the path does not exist,
    /// plus any error of [`ConfigStore::import`] for nested targets. On error
    /// the store is left unchanged.
    pub fn set(&mut self, path: &str, value: Value) -> ConfigResult<()> {
        match self.resolve_mut(path, path)? {
            Entry::Nested(store) => store.import_under(value, path)?,
            Entry::Scalar(current) => *current = value,
        }

        tracing::debug!(path, "config value updated");
        Ok(())
    }

    /// Plain object mirroring the current contents of the store
    #[must_use]
    pub fn export(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.to_value()))
                .collect(),
        )
    }

    /// Bulk-overwrite existing keys from a JSON object
    ///
    /// The whole input is checked against the schema before anything is
    /// written, so a rejected import leaves the store untouched.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfigData`] when `data` (or a value
    /// targeting a nested store) is not an object, and
    /// [`ConfigError::SchemaOverrideNotAllowed`] for any undeclared key.
    pub fn import(&mut self, data: Value) -> ConfigResult<()> {
        self.import_under(data, "")
    }

    fn import_under(&mut self, data: Value, prefix: &str) -> ConfigResult<()> {
        let Value::Object(map) = data else {
            return Err(invalid_data(&data));
        };

        self.check_import(&map, prefix)?;
        self.apply_import(map);
        Ok(())
    }

    fn check_import(&self, data: &Map<String, Value>, prefix: &str) -> ConfigResult<()> {
        for (key, value) in data {
            let key_path = join_path(prefix, key);

            match self.entries.get(key) {
                None => return Err(ConfigError::SchemaOverrideNotAllowed { key: key_path }),
                Some(Entry::Nested(store)) => match value {
                    Value::Object(sub) => store.check_import(sub, &key_path)?,
                    other => return Err(invalid_data(other)),
                },
                Some(Entry::Scalar(_)) => {}
            }
        }

        Ok(())
    }

    fn apply_import(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            match (self.entries.get_mut(&key), value) {
                (Some(Entry::Nested(store)), Value::Object(sub)) => store.apply_import(sub),
                (Some(Entry::Scalar(current)), value) => *current = value,
                // Rejected by check_import
                _ => {}
            }
        }
    }

    /// Whether `path` resolves to a value
    #[must_use]
    pub fn isset(&self, path: &str) -> bool {
        self.entry(path).is_ok()
    }

    /// Keys declared at this level
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Value> for ConfigStore {
    type Error = ConfigError;

    fn try_from(data: Value) -> ConfigResult<Self> {
        Self::new(data)
    }
}

impl From<Map<String, Value>> for ConfigStore {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl From<&ConfigStore> for Value {
    fn from(store: &ConfigStore) -> Self {
        store.export()
    }
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((key, rest)) => (key, Some(rest)),
        None => (path, None),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn undefined(path: &str, full_path: &str) -> ConfigError {
    ConfigError::UndefinedConfigPath {
        path: path.to_string(),
        full_path: full_path.to_string(),
    }
}

fn invalid_data(value: &Value) -> ConfigError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };

    ConfigError::InvalidConfigData { found }
}
