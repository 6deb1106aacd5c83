use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// Opaque handle stored in a [`Container`](crate::Container).
///
/// An instance is either a shared handle to heap-allocated data, built from an
/// [`Arc`], or a plain value. Only shared handles are accepted by the
/// container: injecting one into several targets aliases the same allocation
/// instead of copying it.
///
/// # Examples
///
/// ```rust
/// use inject::Instance;
/// use std::sync::Arc;
///
/// let shared = Instance::shared(Arc::new(String::from("postgres://localhost")));
/// assert!(shared.is_shared());
///
/// let value = Instance::value(42u16);
/// assert!(!value.is_shared());
/// ```
pub struct Instance {
    handle: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
    shared: bool,
}

impl Instance {
    /// Wraps a shared handle. `T` may be unsized, e.g. `Arc<dyn Logger>`.
    pub fn shared<T>(handle: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            handle: Box::new(handle),
            type_name: type_name::<Arc<T>>(),
            shared: true,
        }
    }

    /// Wraps a plain value.
    ///
    /// Such an instance is rejected by
    /// [`Container::provide`](crate::Container::provide).
    pub fn value<T>(value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            handle: Box::new(value),
            type_name: type_name::<T>(),
            shared: false,
        }
    }

    /// Checks if the instance is a shared handle rather than a plain value.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Returns the type name of the wrapped handle or value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns a new reference to the shared data if it is an `Arc<T>`.
    pub fn handle<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        if !self.shared {
            return None;
        }
        self.handle.downcast_ref::<Arc<T>>().cloned()
    }
}

impl<T> From<Arc<T>> for Instance
where
    T: ?Sized + Send + Sync + 'static,
{
    fn from(value: Arc<T>) -> Self {
        Self::shared(value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("shared", &self.shared)
            .finish()
    }
}

/// Field storage that can receive an [`Instance`].
///
/// Filling a slot stores a clone of the registry's `Arc`, so the field and
/// the registry entry point to the same allocation.
pub trait Slot {
    /// Type name of the handle this slot accepts.
    fn expected() -> &'static str;

    /// Assigns the instance to the slot. Returns `false` without touching the
    /// slot when the instance is not an `Arc` of the expected type.
    fn fill(&mut self, instance: &Instance) -> bool;
}

impl<T> Slot for Option<Arc<T>>
where
    T: ?Sized + 'static,
{
    fn expected() -> &'static str {
        type_name::<Arc<T>>()
    }

    fn fill(&mut self, instance: &Instance) -> bool {
        match instance.handle::<T>() {
            Some(handle) => {
                *self = Some(handle);
                true
            }
            None => false,
        }
    }
}

impl<T> Slot for Arc<T>
where
    T: ?Sized + 'static,
{
    fn expected() -> &'static str {
        type_name::<Arc<T>>()
    }

    fn fill(&mut self, instance: &Instance) -> bool {
        match instance.handle::<T>() {
            Some(handle) => {
                *self = handle;
                true
            }
            None => false,
        }
    }
}
