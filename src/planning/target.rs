//! Injection point descriptors and binding constraints.

use crate::binding::Binding;
use crate::identifier::ServiceIdentifier;

/// Disambiguates between several bindings of one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(serde::Serialize))]
pub enum Constraint {
    /// Binding registered with `.named(name)`
    Named(String),
    /// Binding registered with `.tagged(key, value)`
    Tagged(String, String),
}

impl Constraint {
    pub fn named(name: impl Into<String>) -> Self {
        Constraint::Named(name.into())
    }

    pub fn tagged(key: impl Into<String>, value: impl Into<String>) -> Self {
        Constraint::Tagged(key.into(), value.into())
    }

    pub fn matches(&self, binding: &Binding) -> bool {
        let metadata = binding.metadata();
        match self {
            Constraint::Named(name) => metadata.name.as_deref() == Some(name.as_str()),
            Constraint::Tagged(key, value) => metadata.tags.get(key) == Some(value),
        }
    }
}

/// Where a value is injected: the argument name, the requested identifier
/// and any constraint narrowing the candidate bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    service_identifier: ServiceIdentifier,
    constraint: Option<Constraint>,
    multi_inject: bool,
}

impl Target {
    pub fn new(name: impl Into<String>, service_identifier: impl Into<ServiceIdentifier>) -> Self {
        Self {
            name: name.into(),
            service_identifier: service_identifier.into(),
            constraint: None,
            multi_inject: false,
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Marks the target as accepting every matching binding.
    pub fn multi(mut self) -> Self {
        self.multi_inject = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_identifier(&self) -> &ServiceIdentifier {
        &self.service_identifier
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    pub fn is_multi_inject(&self) -> bool {
        self.multi_inject
    }

    /// True when `binding` satisfies this target's constraint (or there is none).
    pub fn matches(&self, binding: &Binding) -> bool {
        self.constraint.as_ref().map_or(true, |constraint| constraint.matches(binding))
    }
}
