//! # inject-base
//!
//! Basic utilities for applications wired with the `inject` container.
//!
//! ## Components
//!
//! - **Configuration**: JSON configuration split into named sections
//! - **Config provisioning**: Configuration and its sections as injectable instances
//! - **Tracing**: Subscriber setup driven by the `tracing` config section
//! - **Bundles**: Reusable groups of `provide` calls
//!
//! ## Example
//!
//! ```rust
//! use inject::Container;
//! use inject_base::{BundleExt, Config, ProvideConfigExt, Tracing};
//! use std::sync::Arc;
//!
//! struct Pool {
//!     size: usize,
//! }
//!
//! # fn main() -> Result<(), inject::StdError> {
//! let config = Config::parse(r#"{"tracing": {"level": "info"}}"#)?;
//! Tracing::init(&config)?;
//!
//! let mut container = Container::new();
//! container
//!     .add_bundle(|c| {
//!         c.provide("pool", Arc::new(Pool { size: 8 }))?;
//!         Ok(())
//!     })?
//!     .provide_config(config)?;
//!
//! assert_eq!(container.get::<Pool>("pool").unwrap().size, 8);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables `#[config_section]`

mod bundle;
mod config;
mod logging;
mod provide;

pub use bundle::*;
pub use config::*;
pub use logging::*;
pub use provide::*;

#[cfg(feature = "macros")]
pub use inject_base_macros::*;
