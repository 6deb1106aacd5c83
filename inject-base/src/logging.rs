use std::str::FromStr as _;

use inject::StdError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::{Config, ConfigSection};

/// Installed logging setup.
pub struct Tracing {
    level: tracing::Level,
    directives: Vec<Directive>,
}

impl Tracing {
    /// Installs the global subscriber described by the `tracing` section.
    ///
    /// Returns `Ok(None)` when the section is absent. Installing a second
    /// global subscriber fails with an error.
    pub fn init(config: &Config) -> Result<Option<Self>, StdError> {
        let config = match config.get::<Option<TracingConfig>>(TracingConfig::key())? {
            Some(v) => v,
            None => return Ok(None),
        };
        let setup = Self::from_config(config)?;
        tracing_subscriber::registry()
            .with(setup.env_filter())
            .with(tracing_subscriber::fmt::Layer::default())
            .try_init()?;
        tracing::debug!("Tracing initialized with level {}", setup.level);
        Ok(Some(setup))
    }

    /// Validates the config without installing anything.
    pub fn from_config(config: TracingConfig) -> Result<Self, StdError> {
        let mut directives = Vec::new();
        for directive in config.directives {
            directives.push(directive.parse::<Directive>()?);
        }
        Ok(Self {
            level: config.level,
            directives,
        })
    }

    pub fn level(&self) -> tracing::Level {
        self.level
    }

    pub fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::default();
        for directive in &self.directives {
            filter = filter.add_directive(directive.clone());
        }
        filter.add_directive(self.level.into())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(
        serialize_with = "serialize_level",
        deserialize_with = "deserialize_level",
        default = "default_level"
    )]
    pub level: tracing::Level,
    #[serde(default)]
    pub directives: Vec<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directives: Default::default(),
        }
    }
}

impl ConfigSection for TracingConfig {
    fn key() -> &'static str {
        "tracing"
    }
}

fn serialize_level<S>(v: &tracing::Level, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(v.as_str())
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<tracing::Level, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)
        .and_then(|v| tracing::Level::from_str(&v).map_err(|v| Error::custom(format!("{v}"))))
}

fn default_level() -> tracing::Level {
    tracing::Level::DEBUG
}
