use std::sync::Arc;

use inject::{Container, StdError};

use crate::{Config, ConfigSection};

/// Key under which [`ProvideConfigExt::provide_config`] stores the config.
pub const CONFIG_KEY: &str = "config";

/// Extension trait for providing configuration to a [`Container`].
///
/// # Examples
///
/// ```rust
/// use inject::{Container, Injectable};
/// use inject_base::{Config, ProvideConfigExt, config_section};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[config_section("postgres")]
/// #[derive(Serialize, Deserialize)]
/// struct PostgresConfig {
///     host: String,
///     port: u16,
/// }
///
/// #[derive(Injectable, Default)]
/// struct Repository {
///     #[inject("postgres")]
///     postgres: Option<Arc<PostgresConfig>>,
///     #[inject("config")]
///     config: Option<Arc<Config>>,
/// }
///
/// # fn main() -> Result<(), inject::StdError> {
/// let config = Config::parse(r#"{"postgres": {"host": "localhost", "port": 5432}}"#)?;
///
/// let mut container = Container::new();
/// container
///     .provide_section::<PostgresConfig>(&config)?
///     .provide_config(config)?;
///
/// let mut repository = Repository::default();
/// container.register(&mut repository)?;
/// assert_eq!(repository.postgres.unwrap().port, 5432);
/// assert!(repository.config.unwrap().contains("postgres"));
/// # Ok(())
/// # }
/// ```
pub trait ProvideConfigExt {
    /// Provides the whole config under [`CONFIG_KEY`].
    fn provide_config(&mut self, config: Config) -> Result<&mut Self, StdError>;

    /// Deserializes section `T` and provides it under `T::key()`.
    fn provide_section<T>(&mut self, config: &Config) -> Result<&mut Self, StdError>
    where
        T: ConfigSection + Send + Sync + 'static;
}

impl ProvideConfigExt for Container {
    fn provide_config(&mut self, config: Config) -> Result<&mut Self, StdError> {
        Ok(self.provide(CONFIG_KEY, Arc::new(config))?)
    }

    fn provide_section<T>(&mut self, config: &Config) -> Result<&mut Self, StdError>
    where
        T: ConfigSection + Send + Sync + 'static,
    {
        let section = config.get::<T>(T::key())?;
        Ok(self.provide(T::key(), Arc::new(section))?)
    }
}
