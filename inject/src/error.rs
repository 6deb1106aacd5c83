use thiserror::Error;

/// Type alias for boxed errors that can be sent across threads.
///
/// Used by fallible utilities built on top of the container (configuration
/// loading, tracing setup) whose failures come from foreign error types.
pub type StdError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`Container::provide`](crate::Container::provide) and
/// [`Container::register`](crate::Container::register).
///
/// Both operations stop at the first failure. A failed `provide` leaves the
/// registry untouched; a failed `register` leaves the fields processed before
/// the failing one assigned and the rest untouched.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The call itself was malformed: a by-value instance was provided, or the
    /// target is not an injectable struct.
    #[error("type constraint violation: {0}")]
    TypeConstraintViolation(String),
    /// An annotated field names a key that was never provided.
    #[error("no instance found for {key}")]
    UnresolvedDependency { key: String },
    /// The stored handle cannot be assigned to the annotated field.
    #[error("cannot assign {found} from `{key}` to field `{field}` of type {expected}")]
    TypeMismatch {
        key: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl InjectError {
    pub(crate) fn type_constraint(message: impl Into<String>) -> Self {
        Self::TypeConstraintViolation(message.into())
    }

    /// Checks if the call was rejected as malformed.
    pub fn is_type_constraint_violation(&self) -> bool {
        matches!(self, Self::TypeConstraintViolation(_))
    }

    /// Checks if a field named a key that was never provided.
    pub fn is_unresolved_dependency(&self) -> bool {
        matches!(self, Self::UnresolvedDependency { .. })
    }

    /// Returns the key of an unresolved dependency.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::UnresolvedDependency { key } => Some(key),
            _ => None,
        }
    }
}
