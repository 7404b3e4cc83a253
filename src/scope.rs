//! Binding scope definitions.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::DiError;

/// Binding scopes controlling instance caching behavior
///
/// Scope only affects `Instance` bindings. Every other binding type either
/// returns a fixed value or calls its producer on each resolution.
///
/// # Examples
///
/// ```rust
/// use di_kernel::Scope;
///
/// assert_eq!(Scope::default(), Scope::Transient);
/// assert_eq!("singleton".parse::<Scope>().unwrap(), Scope::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Scope {
    /// New instance per resolution, never cached
    #[default]
    Transient,
    /// Constructed once per binding and kept until the binding is removed
    Singleton,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Transient => f.write_str("transient"),
            Scope::Singleton => f.write_str("singleton"),
        }
    }
}

impl FromStr for Scope {
    type Err = DiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transient" => Ok(Scope::Transient),
            "singleton" => Ok(Scope::Singleton),
            other => Err(DiError::InvalidConfiguration(format!("unknown scope '{}'", other))),
        }
    }
}
