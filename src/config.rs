//! Container configuration.
//!
//! Options can be built in code, read from environment variables, or (with the
//! `config` feature) deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::scope::Scope;

/// Environment variable prefix used by [`ContainerOptions::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "DI_KERNEL";

/// Default limit on request tree depth.
///
/// Planning and resolution recurse once per level, so the limit has to stay
/// well inside a default 2 MiB thread stack.
pub const DEFAULT_MAX_PLAN_DEPTH: usize = 100;

/// Tunables for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use di_kernel::{ContainerOptions, Scope};
///
/// let options = ContainerOptions::default().with_default_scope(Scope::Singleton);
/// assert_eq!(options.default_scope, Scope::Singleton);
/// assert_eq!(options.max_plan_depth, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Scope given to bindings registered without an explicit one
    pub default_scope: Scope,
    /// Deepest request tree the planner will build
    pub max_plan_depth: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            default_scope: Scope::Transient,
            max_plan_depth: DEFAULT_MAX_PLAN_DEPTH,
        }
    }
}

impl ContainerOptions {
    pub fn with_default_scope(mut self, scope: Scope) -> Self {
        self.default_scope = scope;
        self
    }

    pub fn with_max_plan_depth(mut self, depth: usize) -> Self {
        self.max_plan_depth = depth;
        self
    }

    /// Reads `DI_KERNEL_DEFAULT_SCOPE` and `DI_KERNEL_MAX_PLAN_DEPTH`; unset
    /// variables keep their defaults.
    pub fn from_env() -> DiResult<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn from_env_with_prefix(prefix: &str) -> DiResult<Self> {
        let mut options = Self::default();
        let prefix = prefix.to_uppercase();

        if let Some(scope) = read_var(&prefix, "DEFAULT_SCOPE") {
            options.default_scope = scope.parse()?;
        }
        if let Some(depth) = read_var(&prefix, "MAX_PLAN_DEPTH") {
            options.max_plan_depth = depth.trim().parse().map_err(|_| {
                DiError::InvalidConfiguration(format!("{}_MAX_PLAN_DEPTH must be a positive integer, got '{}'", prefix, depth))
            })?;
        }
        options.validate()?;
        Ok(options)
    }

    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let options: Self = serde_json::from_str(json).map_err(|err| DiError::InvalidConfiguration(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> DiResult<()> {
        if self.max_plan_depth == 0 {
            return Err(DiError::InvalidConfiguration("max_plan_depth must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn read_var(prefix: &str, key: &str) -> Option<String> {
    env::var(format!("{}_{}", prefix, key)).ok().filter(|value| !value.trim().is_empty())
}
