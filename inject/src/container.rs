use std::any::{Any, TypeId, type_name};
use std::collections::{HashMap, hash_map};
use std::fmt;
use std::sync::Arc;

use crate::{InjectError, Injectable, Instance};

type RegisterFn = fn(&Container, &mut dyn Any) -> Result<(), InjectError>;

/// Registry of named shared instances and the injector that hands them out.
///
/// The container is filled with [`Container::provide`] and then used to
/// populate annotated fields of target structs with [`Container::register`].
/// Providing requires `&mut self` and registering only `&self`, so once the
/// container is configured it can be shared between threads behind an `Arc`.
///
/// # Examples
///
/// ```rust
/// use inject::{Container, Injectable};
/// use std::sync::Arc;
///
/// struct Logger {
///     prefix: String,
/// }
///
/// #[derive(Injectable, Default)]
/// struct Handler {
///     #[inject("logger")]
///     logger: Option<Arc<Logger>>,
///     requests: u64,
/// }
///
/// # fn main() -> Result<(), inject::InjectError> {
/// let logger = Arc::new(Logger { prefix: "[api]".into() });
///
/// let mut container = Container::new();
/// container.provide("logger", logger.clone())?;
///
/// let mut handler = Handler::default();
/// container.register(&mut handler)?;
///
/// assert!(Arc::ptr_eq(handler.logger.as_ref().unwrap(), &logger));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Container {
    instances: HashMap<String, Instance>,
    wirings: HashMap<TypeId, RegisterFn>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `instance` under `key`.
    ///
    /// A later call with the same key replaces the earlier instance. Keys are
    /// compared by exact, case-sensitive equality.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::TypeConstraintViolation`] when the instance is
    /// a plain value rather than a shared handle. The registry is left
    /// unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inject::{Container, Instance};
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container
    ///     .provide("db", Arc::new("postgres://localhost".to_string()))
    ///     .unwrap()
    ///     .provide("cache", Arc::new(vec![1u8, 2, 3]))
    ///     .unwrap();
    /// assert_eq!(container.len(), 2);
    ///
    /// let err = container.provide("port", Instance::value(5432u16)).unwrap_err();
    /// assert!(err.is_type_constraint_violation());
    /// assert!(!container.contains("port"));
    /// ```
    pub fn provide<I>(
        &mut self,
        key: impl Into<String>,
        instance: I,
    ) -> Result<&mut Self, InjectError>
    where
        I: Into<Instance>,
    {
        let key = key.into();
        let instance = instance.into();
        if !instance.is_shared() {
            tracing::warn!(
                "Rejected instance {key}: {} is not a reference type",
                instance.type_name()
            );
            return Err(InjectError::type_constraint(
                "instance must be a reference/pointer type",
            ));
        }
        let kind = instance.type_name();
        match self.instances.entry(key) {
            hash_map::Entry::Occupied(mut v) => {
                tracing::debug!("Replacing instance {}: {kind}", v.key());
                v.insert(instance);
            }
            hash_map::Entry::Vacant(v) => {
                tracing::debug!("Providing instance {}: {kind}", v.key());
                v.insert(instance);
            }
        };
        Ok(self)
    }

    /// Checks if an instance is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    /// Returns a new reference to the instance stored under `key` if it is
    /// an `Arc<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inject::Container;
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.provide("name", Arc::new("inject".to_string())).unwrap();
    ///
    /// assert_eq!(container.get::<String>("name").unwrap().as_str(), "inject");
    /// assert!(container.get::<u32>("name").is_none());
    /// assert!(container.get::<String>("missing").is_none());
    /// ```
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        self.instances.get(key).and_then(|v| v.handle::<T>())
    }

    /// Returns the raw instance stored under `key`.
    pub fn instance(&self, key: &str) -> Option<&Instance> {
        self.instances.get(key)
    }

    /// Iterates over all provided keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Returns the number of provided keys.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Checks if nothing was provided yet.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Populates the annotated fields of `target`.
    ///
    /// Fields are processed in declaration order. Each annotated field gets a
    /// reference to the instance stored under its key; fields without an
    /// annotation are left as they are.
    ///
    /// # Errors
    ///
    /// Stops at the first field that cannot be populated:
    ///
    /// * [`InjectError::UnresolvedDependency`] if the key was never provided;
    /// * [`InjectError::TypeMismatch`] if the stored handle does not match the
    ///   field type.
    ///
    /// Fields processed before the failure stay assigned; nothing is rolled
    /// back.
    pub fn register<T>(&self, target: &mut T) -> Result<(), InjectError>
    where
        T: Injectable,
    {
        let bindings = T::wiring().into_bindings();
        tracing::debug!(
            "Injecting {} ({} fields)",
            type_name::<T>(),
            bindings.len()
        );
        for binding in bindings {
            let (Some(key), Some(assign)) = (binding.key, binding.assign) else {
                continue;
            };
            let instance = match self.instances.get(&key) {
                Some(v) => v,
                None => {
                    tracing::warn!(
                        "Cannot inject field {}::{}: no instance found for {key}",
                        type_name::<T>(),
                        binding.name
                    );
                    return Err(InjectError::UnresolvedDependency { key });
                }
            };
            if !assign(&mut *target, instance) {
                tracing::warn!(
                    "Cannot inject field {}::{}: {} is not {}",
                    type_name::<T>(),
                    binding.name,
                    instance.type_name(),
                    binding.expected
                );
                return Err(InjectError::TypeMismatch {
                    key,
                    field: binding.name,
                    expected: binding.expected,
                    found: instance.type_name(),
                });
            }
            tracing::trace!("Injected {key} into {}::{}", type_name::<T>(), binding.name);
        }
        Ok(())
    }

    /// Makes targets of type `T` injectable through [`Container::register_any`].
    pub fn wire<T>(&mut self) -> &mut Self
    where
        T: Injectable,
    {
        self.wirings.insert(TypeId::of::<T>(), register_erased::<T>);
        self
    }

    /// Checks if targets of type `T` were wired.
    pub fn is_wired<T>(&self) -> bool
    where
        T: Injectable,
    {
        self.wirings.contains_key(&TypeId::of::<T>())
    }

    /// Populates a target whose concrete type is only known at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::TypeConstraintViolation`] without touching the
    /// target when its type was not [wired](Container::wire). Otherwise fails
    /// exactly like [`Container::register`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inject::{Container, Injectable};
    /// use std::any::Any;
    /// use std::sync::Arc;
    ///
    /// #[derive(Injectable, Default)]
    /// struct Worker {
    ///     #[inject("queue")]
    ///     queue: Option<Arc<String>>,
    /// }
    ///
    /// let mut container = Container::new();
    /// container.provide("queue", Arc::new("jobs".to_string())).unwrap();
    /// container.wire::<Worker>();
    ///
    /// let mut targets: Vec<Box<dyn Any>> = vec![Box::new(Worker::default())];
    /// for target in &mut targets {
    ///     container.register_any(&mut **target).unwrap();
    /// }
    ///
    /// let mut number = 7u32;
    /// assert!(container.register_any(&mut number).unwrap_err().is_type_constraint_violation());
    /// ```
    pub fn register_any(&self, target: &mut dyn Any) -> Result<(), InjectError> {
        let type_id = (*target).type_id();
        match self.wirings.get(&type_id) {
            Some(register) => register(self, target),
            None => {
                tracing::warn!("Rejected target: type is not wired");
                Err(InjectError::type_constraint(
                    "target must be a pointer to a struct",
                ))
            }
        }
    }
}

fn register_erased<T>(container: &Container, target: &mut dyn Any) -> Result<(), InjectError>
where
    T: Injectable,
{
    match target.downcast_mut::<T>() {
        Some(target) => container.register(target),
        None => Err(InjectError::type_constraint(
            "target must be a pointer to a struct",
        )),
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("instances", &self.instances)
            .field("wirings", &self.wirings.len())
            .finish()
    }
}
