//! Bottom-up walk of a plan producing the requested value.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::binding::{AnyArc, Args, Binding, BindingKind, Implementation, Resolved};
use crate::error::{DiError, DiResult};
use crate::observer::{DiObserver, Observers};
use crate::planning::{Context, Plan, RequestId, Target};
use crate::scope::Scope;

/// Resolves the active plan of a [`Context`].
///
/// Children are resolved before their parent is constructed, in declared
/// order. The only state surviving a call is the per-binding singleton cache,
/// which is filled at most once even under concurrent resolves.
///
/// | binding type | result |
/// |---|---|
/// | `Invalid` | `InvalidBindingType` error |
/// | `ConstantValue` | the stored value |
/// | `DynamicValue` | producer output, evaluated every time |
/// | `Constructor` | the `Arc<Implementation>` itself |
/// | `Factory` | the produced factory callable |
/// | `Provider` | the produced [`ProviderFn`](crate::ProviderFn) |
/// | `Instance` | a constructed instance (cached when singleton) |
#[derive(Clone, Default)]
pub struct Resolver {
    observers: Observers,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub(crate) fn with_observers(observers: Observers) -> Self {
        Self { observers }
    }

    /// Resolves the context's active plan.
    pub fn resolve(&self, context: &Context) -> DiResult<Resolved> {
        let plan = context.current_plan().ok_or(DiError::NoActivePlan)?;
        ensure_valid_bindings(&plan)?;
        self.resolve_request(context, &plan, plan.root_id())
    }

    fn resolve_request(&self, context: &Context, plan: &Plan, id: RequestId) -> DiResult<Resolved> {
        let request = plan.request(id);
        let identifier = request.service_identifier();
        let _in_flight = context.enter(identifier.clone());

        let started = self.observers.has_observers().then(|| {
            self.observers.resolving(identifier);
            Instant::now()
        });

        let result = if request.is_multi_inject() {
            request
                .bindings()
                .iter()
                .enumerate()
                .map(|(slot, binding)| self.resolve_binding(context, plan, id, slot, binding))
                .collect::<DiResult<Vec<_>>>()
                .map(Resolved::Multiple)
        } else {
            match request.bindings() {
                [binding] => self.resolve_binding(context, plan, id, 0, binding).map(Resolved::Single),
                [] => Err(DiError::NotRegistered(identifier.to_string())),
                _ => Err(DiError::AmbiguousMatch(identifier.to_string())),
            }
        };

        match &result {
            Ok(_) => {
                trace!(service = %identifier, "request resolved");
                if let Some(started) = started {
                    self.observers.resolved(identifier, started.elapsed());
                }
            }
            Err(error) => {
                debug!(service = %identifier, %error, "request failed");
                self.observers.resolution_failed(identifier, error);
            }
        }
        result
    }

    fn resolve_binding(
        &self,
        context: &Context,
        plan: &Plan,
        id: RequestId,
        slot: usize,
        binding: &Binding,
    ) -> DiResult<AnyArc> {
        match binding.kind() {
            BindingKind::Invalid => Err(DiError::InvalidBindingType(binding.service_identifier().to_string())),
            BindingKind::ConstantValue(value) => Ok(value.clone()),
            BindingKind::DynamicValue(producer) => producer(context),
            BindingKind::Constructor(implementation) => Ok(implementation.clone() as AnyArc),
            BindingKind::Factory(creator) => creator(context),
            BindingKind::Provider(creator) => creator(context).map(|provider| Arc::new(provider) as AnyArc),
            BindingKind::Instance(implementation) => match binding.scope() {
                Scope::Singleton => {
                    if let Some(cached) = binding.cached() {
                        return Ok(cached.clone());
                    }
                    binding
                        .cache()
                        .get_or_try_init(|| {
                            let instance = self.construct(context, plan, id, slot, implementation)?;
                            debug!(service = %binding.service_identifier(), "singleton cached");
                            Ok::<_, DiError>(instance)
                        })
                        .cloned()
                }
                Scope::Transient => self.construct(context, plan, id, slot, implementation),
            },
        }
    }

    /// Resolves the arguments feeding `slot` of request `id` and runs the constructor.
    fn construct(
        &self,
        context: &Context,
        plan: &Plan,
        id: RequestId,
        slot: usize,
        implementation: &Implementation,
    ) -> DiResult<AnyArc> {
        let request = plan.request(id);
        let mut args = Args::for_implementation(implementation.type_name(), request.children().len());
        for &child_id in request.children() {
            let child = plan.request(child_id);
            if child.binding_slot() != slot {
                continue;
            }
            let value = self.resolve_request(context, plan, child_id)?;
            let name = child.target().map(Target::name).unwrap_or_default();
            args.push(name, child.service_identifier().clone(), value);
        }

        let instance = implementation.construct(&args)?;
        self.observers.instance_created(request.service_identifier(), implementation.type_name());
        Ok(instance)
    }
}

/// Fails on the first Invalid binding (pre-order) before anything is built.
///
/// Subtrees feeding an already cached singleton are skipped, since the
/// resolver returns the cached instance without visiting them.
fn ensure_valid_bindings(plan: &Plan) -> DiResult<()> {
    let mut pending = vec![plan.root_id()];
    while let Some(id) = pending.pop() {
        let request = plan.request(id);
        if let Some(binding) = request.bindings().iter().find(|binding| matches!(binding.kind(), BindingKind::Invalid)) {
            return Err(DiError::InvalidBindingType(binding.service_identifier().to_string()));
        }
        for &child in request.children().iter().rev() {
            let feeds_cached = request
                .bindings()
                .get(plan.request(child).binding_slot())
                .map_or(false, |binding| is_cached_singleton(binding));
            if !feeds_cached {
                pending.push(child);
            }
        }
    }
    Ok(())
}

fn is_cached_singleton(binding: &Binding) -> bool {
    matches!(binding.kind(), BindingKind::Instance(_)) && binding.scope() == Scope::Singleton && binding.is_cached()
}
