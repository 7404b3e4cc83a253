//! Request tree for one resolution attempt, stored as an arena.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::binding::{Binding, BindingType};
use crate::identifier::ServiceIdentifier;
use crate::planning::target::Target;

/// Handle of a [`Request`] inside its [`Plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(usize);

impl RequestId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the dependency tree: a single point needing resolution.
#[derive(Debug, Clone)]
pub struct Request {
    service_identifier: ServiceIdentifier,
    parent: Option<RequestId>,
    // Index into the parent's bindings this request is an argument for
    binding_slot: usize,
    children: Vec<RequestId>,
    bindings: Vec<Arc<Binding>>,
    target: Option<Target>,
}

impl Request {
    pub fn service_identifier(&self) -> &ServiceIdentifier {
        &self.service_identifier
    }

    /// `None` for the root request.
    pub fn parent(&self) -> Option<RequestId> {
        self.parent
    }

    pub fn binding_slot(&self) -> usize {
        self.binding_slot
    }

    /// Children in insertion order, which is constructor-argument order.
    pub fn children(&self) -> &[RequestId] {
        &self.children
    }

    /// Candidate bindings in registration order.
    pub fn bindings(&self) -> &[Arc<Binding>] {
        &self.bindings
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn is_multi_inject(&self) -> bool {
        self.target.as_ref().map_or(false, Target::is_multi_inject)
    }
}

/// The fully expanded request tree for one resolution attempt.
///
/// Requests live in a flat arena owned by the plan; parent links are
/// [`RequestId`] handles, so the tree holds no reference cycles.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Binding, Plan, Target};
/// use std::sync::Arc;
///
/// let ninja = Arc::new(Binding::new("INinja"));
/// let katana = Arc::new(Binding::new("IKatana"));
///
/// let mut plan = Plan::new("INinja", vec![ninja], None);
/// let root = plan.root_id();
/// let child = plan.add_child_request(root, "IKatana", vec![katana], Target::new("katana", "IKatana"));
///
/// assert_eq!(plan.request(child).parent(), Some(root));
/// assert_eq!(plan.root_request().children(), &[child]);
/// assert_eq!(plan.identifier_chain(child).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Plan {
    requests: Vec<Request>,
}

impl Plan {
    /// Creates a plan holding only its root request.
    pub fn new(
        service_identifier: impl Into<ServiceIdentifier>,
        bindings: Vec<Arc<Binding>>,
        target: Option<Target>,
    ) -> Self {
        Self {
            requests: vec![Request {
                service_identifier: service_identifier.into(),
                parent: None,
                binding_slot: 0,
                children: Vec::new(),
                bindings,
                target,
            }],
        }
    }

    pub fn root_id(&self) -> RequestId {
        RequestId(0)
    }

    pub fn root_request(&self) -> &Request {
        &self.requests[0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this plan.
    pub fn request(&self, id: RequestId) -> &Request {
        &self.requests[id.0]
    }

    /// Number of requests in the tree.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Appends a child to `parent`, feeding the parent's first binding.
    pub fn add_child_request(
        &mut self,
        parent: RequestId,
        service_identifier: impl Into<ServiceIdentifier>,
        bindings: Vec<Arc<Binding>>,
        target: Target,
    ) -> RequestId {
        self.add_child_request_for_slot(parent, 0, service_identifier, bindings, target)
    }

    /// Appends a child to `parent` as an argument of the parent's binding at `slot`.
    pub fn add_child_request_for_slot(
        &mut self,
        parent: RequestId,
        slot: usize,
        service_identifier: impl Into<ServiceIdentifier>,
        bindings: Vec<Arc<Binding>>,
        target: Target,
    ) -> RequestId {
        let id = RequestId(self.requests.len());
        self.requests.push(Request {
            service_identifier: service_identifier.into(),
            parent: Some(parent),
            binding_slot: slot,
            children: Vec::new(),
            bindings,
            target: Some(target),
        });
        self.requests[parent.0].children.push(id);
        id
    }

    /// `id` followed by its parent, grandparent, ... up to the root.
    pub fn ancestry(&self, id: RequestId) -> impl Iterator<Item = &Request> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            let request = &self.requests[current.0];
            next = request.parent;
            Some(request)
        })
    }

    /// Identifiers from the root down to `id`.
    pub fn identifier_chain(&self, id: RequestId) -> Vec<ServiceIdentifier> {
        let mut chain: Vec<ServiceIdentifier> = self
            .ancestry(id)
            .map(|request| request.service_identifier.clone())
            .collect();
        chain.reverse();
        chain
    }

    /// Depth of `id` (the root has depth 0).
    pub fn depth(&self, id: RequestId) -> usize {
        self.ancestry(id).count() - 1
    }

    /// Request handles in pre-order (parents before children, children in order).
    pub fn pre_order(&self) -> Vec<RequestId> {
        let mut order = Vec::with_capacity(self.requests.len());
        let mut stack = vec![self.root_id()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.requests[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Indented textual rendering of the tree.
    ///
    /// ```text
    /// INinja [Instance]
    ///   katana: IKatana [Instance, singleton]
    ///     handler: IKatanaHandler [Instance]
    /// ```
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        for id in self.pre_order() {
            let request = self.request(id);
            let indent = "  ".repeat(self.depth(id));
            let _ = write!(out, "{}", indent);
            if let Some(target) = request.target() {
                let _ = write!(out, "{}: ", target.name());
            }
            let _ = write!(out, "{}", request.service_identifier());
            let types: Vec<String> = request
                .bindings()
                .iter()
                .map(|binding| describe_binding(binding))
                .collect();
            let _ = writeln!(out, " [{}]", types.join(" | "));
        }
        out
    }
}

fn describe_binding(binding: &Binding) -> String {
    let kind = match binding.binding_type() {
        BindingType::Invalid => "Invalid",
        BindingType::ConstantValue => "ConstantValue",
        BindingType::DynamicValue => "DynamicValue",
        BindingType::Constructor => "Constructor",
        BindingType::Factory => "Factory",
        BindingType::Provider => "Provider",
        BindingType::Instance => "Instance",
    };
    match (binding.binding_type(), binding.scope()) {
        (BindingType::Instance, crate::scope::Scope::Singleton) => format!("{}, singleton", kind),
        _ => kind.to_string(),
    }
}
