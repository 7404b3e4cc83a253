//! Serializable plan snapshots.

use serde::Serialize;

use crate::binding::BindingType;
use crate::error::{DiError, DiResult};
use crate::planning::plan::Plan;
use crate::planning::target::Constraint;
use crate::scope::Scope;

/// Flat, serializable view of a [`Plan`].
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub root: String,
    pub requests: Vec<RequestSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestSnapshot {
    pub index: usize,
    pub service_identifier: String,
    pub parent: Option<usize>,
    pub binding_slot: usize,
    pub target: Option<String>,
    pub constraint: Option<Constraint>,
    pub multi_inject: bool,
    pub bindings: Vec<BindingSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BindingSnapshot {
    #[serde(rename = "type")]
    pub binding_type: BindingType,
    pub scope: String,
    pub name: Option<String>,
    pub cached: bool,
}

impl Plan {
    /// Snapshot of the tree in pre-order.
    pub fn snapshot(&self) -> PlanSnapshot {
        let requests = self
            .pre_order()
            .into_iter()
            .map(|id| {
                let request = self.request(id);
                RequestSnapshot {
                    index: id.index(),
                    service_identifier: request.service_identifier().to_string(),
                    parent: request.parent().map(|parent| parent.index()),
                    binding_slot: request.binding_slot(),
                    target: request.target().map(|target| target.name().to_string()),
                    constraint: request.target().and_then(|target| target.constraint().cloned()),
                    multi_inject: request.is_multi_inject(),
                    bindings: request
                        .bindings()
                        .iter()
                        .map(|binding| BindingSnapshot {
                            binding_type: binding.binding_type(),
                            scope: match binding.scope() {
                                Scope::Transient => "transient".to_string(),
                                Scope::Singleton => "singleton".to_string(),
                            },
                            name: binding.metadata().name.clone(),
                            cached: binding.is_cached(),
                        })
                        .collect(),
                }
            })
            .collect();

        PlanSnapshot {
            root: self.root_request().service_identifier().to_string(),
            requests,
        }
    }

    /// Pretty-printed JSON of [`Plan::snapshot`].
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| DiError::InvalidConfiguration(format!("plan export failed: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::binding::{Binding, Implementation};
    use crate::planning::{Dependency, Planner};
    use crate::registry::BindingRegistry;

    struct Unit;

    #[test]
    fn exports_requests_in_pre_order() {
        let registry = Arc::new(BindingRegistry::new());
        registry.add(
            Binding::new("INinja").to(
                Implementation::new::<Unit, _>(|_| Ok(Unit)).depends_on(Dependency::new("katana", "IKatana")),
            ),
        );
        registry.add(Binding::new("IKatana").to_constant_value(1u8).named("sharp"));

        let planner = Planner::default();
        let context = planner.create_context(registry);
        let plan = planner.create_plan(&context, "INinja", None).unwrap();

        let snapshot = plan.snapshot();
        assert_eq!(snapshot.root, "INinja");
        assert_eq!(snapshot.requests.len(), 2);
        assert_eq!(snapshot.requests[1].parent, Some(0));
        assert_eq!(snapshot.requests[1].target.as_deref(), Some("katana"));

        let json = plan.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["requests"][1]["bindings"][0]["type"], "ConstantValue");
        assert_eq!(value["requests"][1]["bindings"][0]["name"], "sharp");
    }
}
