use std::collections::BTreeMap;
use std::path::Path;

use inject::StdError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// JSON configuration split into named sections.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub(crate) configs: BTreeMap<String, Value>,
}

/// Configuration section with a fixed name.
///
/// Sections can be provided to a container under their name with
/// [`ProvideConfigExt::provide_section`](crate::ProvideConfigExt::provide_section).
pub trait ConfigSection: DeserializeOwned {
    fn key() -> &'static str;
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes section `name`. A missing section is read as `null`.
    pub fn get<T>(&self, name: impl AsRef<str>) -> Result<T, StdError>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(
            self.configs
                .get(name.as_ref())
                .cloned()
                .unwrap_or(Value::Null),
        )?)
    }

    pub fn set<T>(&mut self, name: impl Into<String>, value: T) -> Result<(), StdError>
    where
        T: Serialize,
    {
        self.configs
            .insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `value` cannot be represented as JSON.
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Serialize,
    {
        self.configs
            .insert(name.into(), serde_json::to_value(value).unwrap());
        self
    }

    /// Merges `other` into this config.
    ///
    /// Objects are merged key by key, arrays are concatenated and any other
    /// value replaces the current one.
    pub fn merge_from(&mut self, other: Self) {
        for (key, value) in other.configs {
            merge_value(self.configs.entry(key).or_insert(Value::Null), value);
        }
    }

    pub fn parse<T>(text: T) -> Result<Self, StdError>
    where
        T: AsRef<str>,
    {
        Ok(serde_json::from_str(text.as_ref())?)
    }

    pub async fn parse_file(path: impl AsRef<Path>) -> Result<Self, StdError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(text)
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.configs.contains_key(name.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }
}

fn merge_value(lhs: &mut Value, rhs: Value) {
    match (lhs, rhs) {
        (Value::Object(lhs), Value::Object(rhs)) => {
            for (key, value) in rhs {
                merge_value(lhs.entry(key).or_insert(Value::Null), value);
            }
        }
        (Value::Array(lhs), Value::Array(rhs)) => lhs.extend(rhs),
        (lhs, rhs) => *lhs = rhs,
    }
}
