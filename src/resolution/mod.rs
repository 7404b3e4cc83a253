//! Resolution: turning a plan into a constructed object graph.

mod resolver;

pub use resolver::Resolver;
