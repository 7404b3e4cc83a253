/// Property-based tests for planning and resolution
///
/// Random acyclic graphs must resolve and construct every transient node
/// once per path; closing any back edge must be reported as a cycle before
/// anything is built.

use di_kernel::{Binding, Container, Dependency, DiError, Implementation};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Node;

fn name(i: usize) -> String {
    format!("S{}", i)
}

/// Binds `S0..Sn` where node `i` depends on the listed nodes.
fn bind_graph(container: &Container, edges: &[Vec<usize>], built: &Arc<AtomicUsize>, singleton: bool) {
    for (i, deps) in edges.iter().enumerate() {
        let built = built.clone();
        let implementation = Implementation::new::<Node, _>(move |_| {
            built.fetch_add(1, Ordering::SeqCst);
            Ok(Node)
        })
        .with_dependencies(
            deps.iter()
                .enumerate()
                .map(|(arg, dep)| Dependency::new(format!("arg{}", arg), name(*dep))),
        );
        let binding = Binding::new(name(i)).to(implementation);
        container.bind(if singleton { binding.in_singleton_scope() } else { binding });
    }
}

/// Edges only point to higher indices, so the graph is acyclic.
fn acyclic_edges() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (2usize..8).prop_flat_map(|n| {
        (0..n)
            .map(move |i| {
                let later: Vec<usize> = ((i + 1)..n).collect();
                proptest::sample::subsequence(later.clone(), 0..=later.len().min(3))
            })
            .collect::<Vec<_>>()
    })
}

/// Number of paths from `i` to every reachable node, counting `i` itself.
fn path_count(edges: &[Vec<usize>], i: usize) -> usize {
    1 + edges[i].iter().map(|dep| path_count(edges, *dep)).sum::<usize>()
}

proptest! {
    #[test]
    fn acyclic_graphs_resolve(edges in acyclic_edges()) {
        let container = Container::new();
        let built = Arc::new(AtomicUsize::new(0));
        bind_graph(&container, &edges, &built, false);

        prop_assert!(container.resolve(name(0)).is_ok());
        prop_assert_eq!(built.load(Ordering::SeqCst), path_count(&edges, 0));
        prop_assert_eq!(container.plan(name(0)).unwrap().len(), path_count(&edges, 0));
    }
}

proptest! {
    #[test]
    fn singletons_build_each_reachable_node_once(edges in acyclic_edges()) {
        let container = Container::new();
        let built = Arc::new(AtomicUsize::new(0));
        bind_graph(&container, &edges, &built, true);

        container.resolve(name(0)).unwrap();
        let after_first = built.load(Ordering::SeqCst);
        container.resolve(name(0)).unwrap();

        prop_assert!(after_first <= edges.len());
        prop_assert_eq!(built.load(Ordering::SeqCst), after_first);
    }
}

proptest! {
    #[test]
    fn back_edge_is_reported_as_cycle(n in 2usize..8) {
        // Chain S0 -> S1 -> ... -> Sn-1 -> S0
        let mut edges: Vec<Vec<usize>> = (0..n).map(|i| vec![i + 1]).collect();
        edges[n - 1] = vec![0];

        let container = Container::new();
        let built = Arc::new(AtomicUsize::new(0));
        bind_graph(&container, &edges, &built, false);

        let mut expected: Vec<String> = (0..n).map(name).collect();
        expected.push(name(0));

        prop_assert_eq!(container.resolve(name(0)).unwrap_err(), DiError::CircularDependency(expected));
        prop_assert_eq!(built.load(Ordering::SeqCst), 0);
    }
}
