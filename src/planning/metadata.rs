//! Dependency descriptors and the metadata source consumed by the planner.

use crate::binding::Implementation;
use crate::error::DiResult;
use crate::identifier::ServiceIdentifier;
use crate::planning::target::{Constraint, Target};

/// One constructor dependency: `(parameter name, identifier, constraint?)`.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Constraint, Dependency};
///
/// let weapon = Dependency::new("weapon", "IWeapon").named("katana");
/// assert_eq!(weapon.constraint, Some(Constraint::Named("katana".into())));
///
/// let all = Dependency::new("weapons", "IWeapon").multi();
/// assert!(all.multi_inject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub identifier: ServiceIdentifier,
    pub constraint: Option<Constraint>,
    pub multi_inject: bool,
}

impl Dependency {
    pub fn new(name: impl Into<String>, identifier: impl Into<ServiceIdentifier>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            constraint: None,
            multi_inject: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.constraint = Some(Constraint::named(name));
        self
    }

    pub fn tagged(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraint = Some(Constraint::tagged(key, value));
        self
    }

    pub fn multi(mut self) -> Self {
        self.multi_inject = true;
        self
    }

    /// Injection point for this dependency.
    pub fn to_target(&self) -> Target {
        let mut target = Target::new(self.name.clone(), self.identifier.clone());
        if let Some(constraint) = &self.constraint {
            target = target.with_constraint(constraint.clone());
        }
        if self.multi_inject {
            target = target.multi();
        }
        target
    }
}

/// Source of constructor dependency descriptors for implementation types.
pub trait MetadataProvider: Send + Sync {
    /// Ordered dependencies of `implementation`'s constructor.
    fn dependencies(&self, implementation: &Implementation) -> DiResult<Vec<Dependency>>;
}

/// Reads the dependencies declared on the implementation at registration time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredMetadata;

impl MetadataProvider for DeclaredMetadata {
    fn dependencies(&self, implementation: &Implementation) -> DiResult<Vec<Dependency>> {
        Ok(implementation.dependencies().to_vec())
    }
}
