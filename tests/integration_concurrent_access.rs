/// Concurrent access integration tests
///
/// These tests verify that singleton construction happens at most once when
/// many threads resolve the same graph, and that transient resolutions stay
/// independent.

use di_kernel::{Binding, Container, Dependency, Implementation};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
pub struct CounterService {
    instance: u32,
}

#[derive(Debug)]
pub struct Worker {
    counter: Arc<CounterService>,
}

fn counter_binding(created: Arc<AtomicU32>, delay: Duration) -> Binding {
    Binding::new("Counter")
        .to(Implementation::new::<CounterService, _>(move |_| {
            let instance = created.fetch_add(1, Ordering::SeqCst);
            // Widen the window in which a second thread could start constructing
            thread::sleep(delay);
            Ok(CounterService { instance })
        }))
        .in_singleton_scope()
}

fn container_with_counter(created: Arc<AtomicU32>, delay: Duration) -> Container {
    let container = Container::new();
    container.bind(counter_binding(created, delay));
    container.bind(
        Binding::new("Worker").to(
            Implementation::new::<Worker, _>(|args| Ok(Worker { counter: args.get("counter")? }))
                .depends_on(Dependency::new("counter", "Counter")),
        ),
    );
    container
}

#[test]
fn singleton_is_constructed_once_under_contention() {
    const THREADS: usize = 16;

    let created = Arc::new(AtomicU32::new(0));
    let container = container_with_counter(created.clone(), Duration::from_millis(20));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.get::<Worker>("Worker").unwrap()
            })
        })
        .collect();

    let workers: Vec<Arc<Worker>> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    assert_eq!(created.load(Ordering::SeqCst), 1);
    for worker in &workers {
        assert!(Arc::ptr_eq(&worker.counter, &workers[0].counter));
        assert_eq!(worker.counter.instance, 0);
    }
    for (i, a) in workers.iter().enumerate() {
        for b in &workers[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn concurrent_bind_and_resolve() {
    let container = Container::new();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let identifier = format!("Value{}", i);
                container.bind(Binding::new(identifier.clone()).to_constant_value(i));
                barrier.wait();
                *container.get::<u32>(identifier).unwrap()
            })
        })
        .collect();

    let mut values: Vec<u32> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
    values.sort_unstable();
    assert_eq!(values, (0..8).collect::<Vec<_>>());
    assert_eq!(container.registry().len(), 8);
}

#[test]
fn unbind_drops_the_cached_singleton() {
    let created = Arc::new(AtomicU32::new(0));
    let container = container_with_counter(created.clone(), Duration::ZERO);

    let before = container.get::<CounterService>("Counter").unwrap();
    container.unbind("Counter").unwrap();
    assert!(!container.is_bound("Counter"));

    container.bind(counter_binding(created.clone(), Duration::ZERO));
    let after = container.get::<CounterService>("Counter").unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}
