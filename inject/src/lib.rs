//! # inject
//!
//! A minimal keyed dependency injection container. Shared instances are
//! registered under string keys, and struct fields annotated with one of
//! those keys are populated in place.
//!
//! ## Core Concepts
//!
//! - **Container**: Registry mapping keys to shared instances
//! - **Instance**: Opaque handle to heap-allocated data, built from an `Arc`
//! - **Injectable**: Trait for structs that declare a wiring table
//! - **Wiring**: Ordered field-to-key bindings of a struct
//!
//! ## Basic Usage
//!
//! ```rust
//! use inject::{Container, Injectable};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! struct StdoutLogger;
//!
//! impl Logger for StdoutLogger {
//!     fn log(&self, message: &str) -> String {
//!         format!("[stdout] {message}")
//!     }
//! }
//!
//! struct Database {
//!     url: String,
//! }
//!
//! #[derive(Injectable, Default)]
//! struct UserService {
//!     #[inject("logger")]
//!     logger: Option<Arc<dyn Logger>>,
//!     #[inject("db")]
//!     db: Option<Arc<Database>>,
//!     cache_size: usize,
//! }
//!
//! fn main() -> Result<(), inject::InjectError> {
//!     let logger: Arc<dyn Logger> = Arc::new(StdoutLogger);
//!
//!     let mut container = Container::new();
//!     container
//!         .provide("logger", logger)?
//!         .provide("db", Arc::new(Database { url: "postgres://localhost".into() }))?;
//!
//!     let mut service = UserService::default();
//!     container.register(&mut service)?;
//!
//!     assert_eq!(service.logger.unwrap().log("ready"), "[stdout] ready");
//!     assert_eq!(service.db.unwrap().url, "postgres://localhost");
//!     assert_eq!(service.cache_size, 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Policy
//!
//! Injection stops at the first field that cannot be populated and returns an
//! [`InjectError`]. Fields processed earlier stay assigned:
//!
//! ```rust
//! use inject::{Container, InjectError, Injectable};
//! use std::sync::Arc;
//!
//! #[derive(Injectable, Default)]
//! struct Target {
//!     #[inject("logger")]
//!     a: Option<Arc<String>>,
//!     #[inject("cache")]
//!     b: Option<Arc<String>>,
//!     c: Option<Arc<String>>,
//! }
//!
//! let mut container = Container::new();
//! container.provide("logger", Arc::new("L".to_string())).unwrap();
//! container.provide("db", Arc::new("D".to_string())).unwrap();
//!
//! let mut target = Target::default();
//! let err = container.register(&mut target).unwrap_err();
//!
//! assert!(matches!(err, InjectError::UnresolvedDependency { ref key } if key == "cache"));
//! assert!(target.a.is_some());
//! assert!(target.b.is_none());
//! assert!(target.c.is_none());
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables `#[derive(Injectable)]`

mod container;
mod error;
mod instance;
mod wiring;

pub use container::*;
pub use error::*;
pub use instance::*;
pub use wiring::*;

#[cfg(feature = "macros")]
pub use inject_macros::*;
