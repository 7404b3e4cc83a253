//! Expands a root identifier into a full request tree.

use std::sync::Arc;

use tracing::debug;

use crate::binding::{Binding, BindingKind};
use crate::config::DEFAULT_MAX_PLAN_DEPTH;
use crate::error::{DiError, DiResult};
use crate::identifier::ServiceIdentifier;
use crate::planning::context::{Context, ResolutionHandle};
use crate::planning::metadata::{DeclaredMetadata, MetadataProvider};
use crate::planning::plan::{Plan, RequestId};
use crate::planning::target::Target;
use crate::registry::BindingRegistry;
use crate::resolution::Resolver;

/// Builds [`Plan`]s.
///
/// Expansion is synchronous and depth-first: every `Instance` binding is asked
/// for its dependencies through the [`MetadataProvider`], and each dependency
/// becomes a child request in declared order. Every other binding type is a
/// leaf. Before a child is created its identifier is checked against the
/// ancestor chain, so a cycle fails planning before any construction and
/// before the cyclic identifier is expanded again.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Binding, BindingRegistry, Dependency, DiError, Implementation, Planner};
/// use std::sync::Arc;
///
/// struct A;
/// struct B;
///
/// let registry = Arc::new(BindingRegistry::new());
/// registry.add(Binding::new("A").to(
///     Implementation::new::<A, _>(|_| Ok(A)).depends_on(Dependency::new("b", "B")),
/// ));
/// registry.add(Binding::new("B").to(
///     Implementation::new::<B, _>(|_| Ok(B)).depends_on(Dependency::new("a", "A")),
/// ));
///
/// let planner = Planner::default();
/// let context = planner.create_context(registry);
/// let err = planner.create_plan(&context, "A", None).unwrap_err();
/// assert_eq!(err, DiError::CircularDependency(vec!["A".into(), "B".into(), "A".into()]));
/// ```
#[derive(Clone)]
pub struct Planner {
    metadata: Arc<dyn MetadataProvider>,
    max_depth: usize,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Arc::new(DeclaredMetadata))
    }
}

impl Planner {
    pub fn new(metadata: Arc<dyn MetadataProvider>) -> Self {
        Self {
            metadata,
            max_depth: DEFAULT_MAX_PLAN_DEPTH,
        }
    }

    /// Limits the depth of request trees; deeper plans fail with `DepthExceeded`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Allocates a fresh, empty context over `registry`.
    ///
    /// Nested resolutions started by producers through this context use a
    /// default [`Resolver`] without observers. Use
    /// [`create_context_with_resolver`](Self::create_context_with_resolver)
    /// when resolving with a configured resolver.
    pub fn create_context(&self, registry: Arc<BindingRegistry>) -> Context {
        self.create_context_with_resolver(registry, Resolver::default())
    }

    /// Allocates a fresh, empty context whose nested resolutions run through `resolver`.
    pub fn create_context_with_resolver(&self, registry: Arc<BindingRegistry>, resolver: Resolver) -> Context {
        Context::new(ResolutionHandle::new(registry, self.clone(), resolver))
    }

    /// Builds the request tree rooted at `root`.
    ///
    /// The returned plan is not registered with the context; call
    /// [`Context::add_plan`] before resolving.
    pub fn create_plan(
        &self,
        context: &Context,
        root: impl Into<ServiceIdentifier>,
        root_target: Option<Target>,
    ) -> DiResult<Plan> {
        let root = root.into();
        // Non-empty only when a producer resolves from inside another resolution
        let outer = context.in_flight();
        if outer.contains(&root) {
            return Err(circular(&outer, &[], &root));
        }

        let bindings = matching_bindings(context.registry(), &root, root_target.as_ref())?;
        let mut plan = Plan::new(root.clone(), bindings, root_target);
        let root_id = plan.root_id();
        self.expand(context, &outer, &mut plan, root_id, 0)?;

        debug!(service = %root, requests = plan.len(), nested = !outer.is_empty(), "plan created");
        Ok(plan)
    }

    fn expand(
        &self,
        context: &Context,
        outer: &[ServiceIdentifier],
        plan: &mut Plan,
        id: RequestId,
        depth: usize,
    ) -> DiResult<()> {
        let bindings = plan.request(id).bindings().to_vec();
        for (slot, binding) in bindings.iter().enumerate() {
            let implementation = match binding.kind() {
                BindingKind::Instance(implementation) => implementation,
                BindingKind::Invalid
                | BindingKind::ConstantValue(_)
                | BindingKind::DynamicValue(_)
                | BindingKind::Constructor(_)
                | BindingKind::Factory(_)
                | BindingKind::Provider(_) => continue,
            };

            for dependency in self.metadata.dependencies(implementation)? {
                if plan.ancestry(id).any(|request| *request.service_identifier() == dependency.identifier)
                    || outer.contains(&dependency.identifier)
                {
                    let chain = plan.identifier_chain(id);
                    return Err(circular(outer, &chain, &dependency.identifier));
                }
                if depth + 1 > self.max_depth {
                    return Err(DiError::DepthExceeded(self.max_depth));
                }

                let target = dependency.to_target();
                let candidates = matching_bindings(context.registry(), &dependency.identifier, Some(&target))?;
                let child = plan.add_child_request_for_slot(id, slot, dependency.identifier, candidates, target);
                self.expand(context, outer, plan, child, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Candidate bindings for `identifier` after applying the target's constraint.
fn matching_bindings(
    registry: &BindingRegistry,
    identifier: &ServiceIdentifier,
    target: Option<&Target>,
) -> DiResult<Vec<Arc<Binding>>> {
    let candidates: Vec<Arc<Binding>> = registry
        .get(identifier)
        .into_iter()
        .filter(|binding| target.map_or(true, |target| target.matches(binding)))
        .collect();
    let multi_inject = target.map_or(false, Target::is_multi_inject);

    match candidates.len() {
        0 => Err(DiError::NotRegistered(identifier.to_string())),
        1 => Ok(candidates),
        _ if multi_inject => Ok(candidates),
        _ => Err(DiError::AmbiguousMatch(identifier.to_string())),
    }
}

fn circular(outer: &[ServiceIdentifier], chain: &[ServiceIdentifier], repeated: &ServiceIdentifier) -> DiError {
    let path = outer
        .iter()
        .chain(chain)
        .chain(std::iter::once(repeated))
        .map(ToString::to_string)
        .collect();
    DiError::CircularDependency(path)
}
