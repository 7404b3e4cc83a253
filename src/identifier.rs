//! Service identifiers used as registry keys.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

/// Opaque key naming a requested capability.
///
/// Identifiers are either free-form names (`"INinja"`) or Rust types. Type
/// identifiers carry the type name for diagnostics only; equality and hashing
/// use the `TypeId` alone.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{ServiceIdentifier, id_of};
///
/// struct Katana;
///
/// let by_name = ServiceIdentifier::from("IKatana");
/// let by_type = id_of::<Katana>();
///
/// assert_eq!(by_name.display_name(), "IKatana");
/// assert!(by_type.display_name().ends_with("Katana"));
/// assert_ne!(by_name, by_type);
/// assert_eq!(by_type, id_of::<Katana>());
/// ```
#[derive(Debug, Clone)]
pub enum ServiceIdentifier {
    /// Free-form name
    Name(Cow<'static, str>),
    /// Rust type with its name kept for error messages
    Type(TypeId, &'static str),
}

impl ServiceIdentifier {
    /// Creates a name identifier.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        ServiceIdentifier::Name(name.into())
    }

    /// Human-readable form used in errors, logs and plan renderings.
    pub fn display_name(&self) -> &str {
        match self {
            ServiceIdentifier::Name(name) => name,
            ServiceIdentifier::Type(_, name) => name,
        }
    }
}

impl PartialEq for ServiceIdentifier {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // TypeId only; the name is diagnostic
            (ServiceIdentifier::Type(a, _), ServiceIdentifier::Type(b, _)) => a == b,
            (ServiceIdentifier::Name(a), ServiceIdentifier::Name(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ServiceIdentifier {}

impl std::hash::Hash for ServiceIdentifier {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            ServiceIdentifier::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            ServiceIdentifier::Name(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<&'static str> for ServiceIdentifier {
    fn from(name: &'static str) -> Self {
        ServiceIdentifier::Name(Cow::Borrowed(name))
    }
}

impl From<String> for ServiceIdentifier {
    fn from(name: String) -> Self {
        ServiceIdentifier::Name(Cow::Owned(name))
    }
}

impl From<&ServiceIdentifier> for ServiceIdentifier {
    fn from(id: &ServiceIdentifier) -> Self {
        id.clone()
    }
}

/// Identifier for the Rust type `T`.
#[inline]
pub fn id_of<T: ?Sized + 'static>() -> ServiceIdentifier {
    ServiceIdentifier::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}
