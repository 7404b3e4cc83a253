use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use di_kernel::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_constant_value(c: &mut Criterion) {
    let container = Container::new();
    container.bind(Binding::new("Answer").to_constant_value(42u64));

    c.bench_function("constant_value_u64", |b| {
        b.iter(|| {
            let v = container.get::<u64>("Answer").unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_hit(c: &mut Criterion) {
    struct Service;

    let container = Container::new();
    container.bind(
        Binding::new("Service")
            .to(Implementation::new::<Service, _>(|_| Ok(Service)))
            .in_singleton_scope(),
    );
    // Prime the cache
    let _ = container.get::<Service>("Service").unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = container.get::<Service>("Service").unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = Container::new();
                container.bind(
                    Binding::new("Expensive")
                        .to(Implementation::new::<ExpensiveToCreate, _>(|_| {
                            Ok(ExpensiveToCreate {
                                data: (0..1000).collect(),
                            })
                        }))
                        .in_singleton_scope(),
                );
                container
            },
            |container| {
                let v = container.get::<ExpensiveToCreate>("Expensive").unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_ninja_graph(c: &mut Criterion) {
    struct Part;
    struct Katana;
    struct Ninja;

    let container = Container::new();
    container.bind(Binding::new("Handler").to(Implementation::new::<Part, _>(|_| Ok(Part))));
    container.bind(Binding::new("Blade").to(Implementation::new::<Part, _>(|_| Ok(Part))));
    container.bind(Binding::new("Shuriken").to(Implementation::new::<Part, _>(|_| Ok(Part))));
    container.bind(
        Binding::new("Katana").to(
            Implementation::new::<Katana, _>(|_| Ok(Katana))
                .depends_on(Dependency::new("handler", "Handler"))
                .depends_on(Dependency::new("blade", "Blade")),
        ),
    );
    container.bind(
        Binding::new("Ninja").to(
            Implementation::new::<Ninja, _>(|_| Ok(Ninja))
                .depends_on(Dependency::new("katana", "Katana"))
                .depends_on(Dependency::new("shuriken", "Shuriken")),
        ),
    );

    let mut group = c.benchmark_group("ninja_graph");
    group.bench_function("plan_only", |b| {
        b.iter(|| black_box(container.plan("Ninja").unwrap().len()))
    });
    group.bench_function("resolve_transient", |b| {
        b.iter(|| black_box(container.get::<Ninja>("Ninja").unwrap()))
    });
    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_chain_depth(c: &mut Criterion) {
    struct Link;

    let mut group = c.benchmark_group("chain_depth");
    for depth in [4usize, 16, 64] {
        let container = Container::new();
        for i in 0..depth {
            let mut implementation = Implementation::new::<Link, _>(|_| Ok(Link));
            if i + 1 < depth {
                implementation = implementation.depends_on(Dependency::new("next", format!("L{}", i + 1)));
            }
            container.bind(Binding::new(format!("L{}", i)).to(implementation));
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(container.resolve("L0").unwrap()))
        });
    }
    group.finish();
}

fn bench_large_registry(c: &mut Criterion) {
    let container = Container::new();
    for i in 0..1000u64 {
        container.bind(Binding::new(format!("Service{}", i)).to_constant_value(i));
    }

    c.bench_function("large_registry_lookup", |b| {
        b.iter(|| black_box(container.get::<u64>("Service500").unwrap()))
    });
}

fn bench_multi_inject(c: &mut Criterion) {
    let container = Container::new();
    for i in 0..32u32 {
        container.bind(Binding::new("Plugin").to_constant_value(Arc::new(i)));
    }

    c.bench_function("resolve_all_32", |b| {
        b.iter(|| black_box(container.resolve_all("Plugin").unwrap()))
    });
}

criterion_group!(
    micro_benches,
    bench_constant_value,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_ninja_graph
);

criterion_group!(
    macro_benches,
    bench_chain_depth,
    bench_large_registry,
    bench_multi_inject
);

criterion_main!(micro_benches, macro_benches);
