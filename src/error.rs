//! Error types for the dependency injection kernel.

use thiserror::Error;

/// Fixed message templates used by [`DiError`].
///
/// Each template is followed by the offending service identifier (or, for
/// cycles, the identifier chain joined with `" -> "`).
pub mod messages {
    pub const INVALID_BINDING_TYPE: &str = "Invalid binding type:";
    pub const CIRCULAR_DEPENDENCY: &str = "Circular dependency found:";
    pub const NOT_REGISTERED: &str = "No matching bindings found for serviceIdentifier:";
    pub const AMBIGUOUS_MATCH: &str = "Ambiguous match found for serviceIdentifier:";
    pub const CANNOT_UNBIND: &str = "Could not unbind serviceIdentifier:";
}

/// Dependency injection errors
///
/// All variants describe configuration or programming mistakes. None of them
/// are transient, so a failed plan or resolution is never retried and no
/// partially constructed object graph is handed back to the caller.
///
/// # Examples
///
/// ```rust
/// use di_kernel::DiError;
///
/// let circular = DiError::CircularDependency(vec!["A".into(), "B".into(), "A".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency found: A -> B -> A");
///
/// let invalid = DiError::InvalidBindingType("Ninja".into());
/// assert_eq!(invalid.to_string(), "Invalid binding type: Ninja");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// A matched binding was registered but never given a strategy
    #[error("{} {}", messages::INVALID_BINDING_TYPE, .0)]
    InvalidBindingType(String),
    /// A service identifier appears as its own ancestor (includes the chain)
    #[error("{} {}", messages::CIRCULAR_DEPENDENCY, .0.join(" -> "))]
    CircularDependency(Vec<String>),
    /// No binding matches the requested identifier
    #[error("{} {}", messages::NOT_REGISTERED, .0)]
    NotRegistered(String),
    /// More than one binding matches where exactly one is required
    #[error("{} {}", messages::AMBIGUOUS_MATCH, .0)]
    AmbiguousMatch(String),
    /// Unbind was requested for an identifier with no bindings
    #[error("{} {}", messages::CANNOT_UNBIND, .0)]
    CannotUnbind(String),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(String),
    /// A constructor asked for an argument its dependencies did not declare
    #[error("Missing argument '{argument}' for implementation {implementation}")]
    MissingArgument {
        implementation: &'static str,
        argument: String,
    },
    /// Maximum request tree depth exceeded
    #[error("Max plan depth {0} exceeded")]
    DepthExceeded(usize),
    /// `Resolver::resolve` was called on a context holding no plan
    #[error("No active plan in resolution context")]
    NoActivePlan,
    /// Container options could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
