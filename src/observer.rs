//! Diagnostic observers for resolution events.
//!
//! Observers are called synchronously from the resolver, once per request on
//! the resolution path. Keep implementations lightweight.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::identifier::ServiceIdentifier;

/// Observer trait for dependency injection resolution events.
///
/// # Examples
///
/// ```
/// use di_kernel::{Container, DiObserver, ServiceIdentifier};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Counting {
///     constructed: AtomicUsize,
/// }
///
/// impl DiObserver for Counting {
///     fn resolving(&self, _id: &ServiceIdentifier) {}
///     fn resolved(&self, _id: &ServiceIdentifier, _duration: Duration) {}
///     fn instance_created(&self, _id: &ServiceIdentifier, _type_name: &'static str) {
///         self.constructed.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let counting = Arc::new(Counting::default());
/// let container = Container::builder().add_observer(counting.clone()).build();
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a request is resolved.
    fn resolving(&self, identifier: &ServiceIdentifier);

    /// Called after a request resolved successfully.
    fn resolved(&self, identifier: &ServiceIdentifier, duration: Duration);

    /// Called for every request on the path of a failed resolution.
    fn resolution_failed(&self, _identifier: &ServiceIdentifier, _error: &DiError) {}

    /// Called after an `Instance` binding's constructor returned.
    fn instance_created(&self, _identifier: &ServiceIdentifier, _type_name: &'static str) {}
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, identifier: &ServiceIdentifier) {
        for observer in &self.observers {
            observer.resolving(identifier);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, identifier: &ServiceIdentifier, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(identifier, duration);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, identifier: &ServiceIdentifier, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(identifier, error);
        }
    }

    #[inline]
    pub(crate) fn instance_created(&self, identifier: &ServiceIdentifier, type_name: &'static str) {
        for observer in &self.observers {
            observer.instance_created(identifier, type_name);
        }
    }
}

/// Built-in observer forwarding events to `tracing`.
///
/// Resolution steps go to `TRACE`, constructions to `DEBUG` and failures to
/// `WARN`, all under the `di_kernel::observer` target.
///
/// ```
/// use di_kernel::{Container, TracingObserver};
/// use std::sync::Arc;
///
/// let container = Container::builder()
///     .add_observer(Arc::new(TracingObserver::new()))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    label: Option<String>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `container` field to every event.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("default")
    }
}

impl DiObserver for TracingObserver {
    fn resolving(&self, identifier: &ServiceIdentifier) {
        tracing::trace!(container = self.label(), service = %identifier, "resolving");
    }

    fn resolved(&self, identifier: &ServiceIdentifier, duration: Duration) {
        tracing::trace!(container = self.label(), service = %identifier, ?duration, "resolved");
    }

    fn resolution_failed(&self, identifier: &ServiceIdentifier, error: &DiError) {
        tracing::warn!(container = self.label(), service = %identifier, %error, "resolution failed");
    }

    fn instance_created(&self, identifier: &ServiceIdentifier, type_name: &'static str) {
        tracing::debug!(container = self.label(), service = %identifier, implementation = type_name, "instance created");
    }
}
