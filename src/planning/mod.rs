//! Planning: turning a root identifier into a request tree.

pub mod context;
#[cfg(feature = "graph-export")]
pub mod export;
pub mod metadata;
pub mod plan;
pub mod planner;
pub mod target;

pub use context::{Context, ResolutionHandle};
pub use metadata::{DeclaredMetadata, Dependency, MetadataProvider};
pub use plan::{Plan, Request, RequestId};
pub use planner::Planner;
pub use target::{Constraint, Target};
