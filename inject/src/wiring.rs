//! Wiring tables describing how a struct receives its dependencies.
//!
//! A wiring table lists the fields of a struct in declaration order together
//! with the registry key each annotated field is bound to. Tables are usually
//! generated with `#[derive(Injectable)]`, but can be written by hand:
//!
//! ```rust
//! use inject::{Injectable, Wiring};
//! use std::sync::Arc;
//!
//! struct Repository {
//!     pool: Option<Arc<String>>,
//!     retries: u32,
//! }
//!
//! impl Injectable for Repository {
//!     fn wiring() -> Wiring<Self> {
//!         Wiring::<Self>::new()
//!             .field("pool", "db", |target| &mut target.pool)
//!             .skip("retries")
//!     }
//! }
//!
//! let wiring = Repository::wiring();
//! assert_eq!(wiring.keys().collect::<Vec<_>>(), vec!["db"]);
//! ```

use crate::{Instance, Slot};

/// Trait for structs whose fields are populated by
/// [`Container::register`](crate::Container::register).
pub trait Injectable: Sized + 'static {
    /// Returns the wiring table of this struct.
    fn wiring() -> Wiring<Self>;
}

type Assign<S> = Box<dyn Fn(&mut S, &Instance) -> bool>;

pub(crate) struct Binding<S> {
    pub(crate) name: &'static str,
    pub(crate) key: Option<String>,
    pub(crate) expected: &'static str,
    pub(crate) assign: Option<Assign<S>>,
}

/// Ordered list of field bindings for struct `S`.
pub struct Wiring<S> {
    bindings: Vec<Binding<S>>,
}

impl<S> Wiring<S>
where
    S: 'static,
{
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds field `name` to registry `key`.
    ///
    /// An empty key leaves the field unannotated, as if [`Wiring::skip`] was
    /// called.
    pub fn field<F>(
        mut self,
        name: &'static str,
        key: impl Into<String>,
        accessor: fn(&mut S) -> &mut F,
    ) -> Self
    where
        F: Slot + 'static,
    {
        let key = key.into();
        if key.is_empty() {
            return self.skip(name);
        }
        self.bindings.push(Binding {
            name,
            key: Some(key),
            expected: F::expected(),
            assign: Some(Box::new(move |target: &mut S, instance: &Instance| {
                accessor(target).fill(instance)
            })),
        });
        self
    }

    /// Records field `name` without annotation. Such fields are never touched.
    pub fn skip(mut self, name: &'static str) -> Self {
        self.bindings.push(Binding {
            name,
            key: None,
            expected: "",
            assign: None,
        });
        self
    }

    /// Iterates over `(field, key)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        self.bindings
            .iter()
            .map(|binding| (binding.name, binding.key.as_deref()))
    }

    /// Iterates over the keys of annotated fields in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().filter_map(|v| v.key.as_deref())
    }

    /// Returns the number of recorded fields, annotated or not.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Checks if no field was recorded.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn into_bindings(self) -> Vec<Binding<S>> {
        self.bindings
    }
}

impl<S> Default for Wiring<S>
where
    S: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
