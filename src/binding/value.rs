//! Type-erased values produced by resolution.

use std::any::{Any, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Type-erased Arc for storage
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Boxed future returned by provider functions.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Asynchronous provider function produced by a `Provider` binding.
pub type ProviderFn = Arc<dyn Fn() -> BoxFuture<DiResult<AnyArc>> + Send + Sync>;

/// Downcasts a type-erased value, reporting the requested type on failure.
pub fn downcast_any<T: Any + Send + Sync>(value: AnyArc) -> DiResult<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(type_name::<T>().to_string()))
}

/// Outcome of resolving one request.
///
/// Regular injection points produce a single value; multi-inject points
/// produce one value per matched binding, in registration order.
#[derive(Clone)]
pub enum Resolved {
    Single(AnyArc),
    Multiple(Vec<AnyArc>),
}

impl Resolved {
    /// Downcasts a single value.
    pub fn downcast<T: Any + Send + Sync>(self) -> DiResult<Arc<T>> {
        match self {
            Resolved::Single(value) => downcast_any(value),
            Resolved::Multiple(_) => Err(DiError::TypeMismatch(format!("single {}", type_name::<T>()))),
        }
    }

    /// Downcasts every value. A single value yields a one-element vector.
    pub fn downcast_all<T: Any + Send + Sync>(self) -> DiResult<Vec<Arc<T>>> {
        self.into_values().into_iter().map(downcast_any).collect()
    }

    /// Flattens into the underlying type-erased values.
    pub fn into_values(self) -> Vec<AnyArc> {
        match self {
            Resolved::Single(value) => vec![value],
            Resolved::Multiple(values) => values,
        }
    }

    pub fn into_single(self) -> DiResult<AnyArc> {
        match self {
            Resolved::Single(value) => Ok(value),
            Resolved::Multiple(_) => Err(DiError::TypeMismatch("single value".to_string())),
        }
    }

    pub fn as_single(&self) -> Option<&AnyArc> {
        match self {
            Resolved::Single(value) => Some(value),
            Resolved::Multiple(_) => None,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Resolved::Multiple(_))
    }
}

impl From<AnyArc> for Resolved {
    fn from(value: AnyArc) -> Self {
        Resolved::Single(value)
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Single(_) => f.write_str("Resolved::Single(..)"),
            Resolved::Multiple(values) => write!(f, "Resolved::Multiple({} values)", values.len()),
        }
    }
}
