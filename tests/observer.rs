use di_kernel::{
    Binding, BindingRegistry, Container, DiError, DiObserver, Implementation, Planner, Resolver, ServiceIdentifier,
    TracingObserver,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DiObserver for EventLog {
    fn resolving(&self, identifier: &ServiceIdentifier) {
        self.events.lock().unwrap().push(format!("resolving {}", identifier));
    }

    fn resolved(&self, identifier: &ServiceIdentifier, _duration: Duration) {
        self.events.lock().unwrap().push(format!("resolved {}", identifier));
    }

    fn resolution_failed(&self, identifier: &ServiceIdentifier, error: &DiError) {
        self.events.lock().unwrap().push(format!("failed {}: {}", identifier, error));
    }

    fn instance_created(&self, identifier: &ServiceIdentifier, _type_name: &'static str) {
        self.events.lock().unwrap().push(format!("created {}", identifier));
    }
}

struct Katana;
struct Ninja;

#[test]
fn events_follow_the_resolution_order() {
    let log = Arc::new(EventLog::default());
    let container = Container::builder().add_observer(log.clone()).build();
    container.bind(Binding::new("Katana").to(Implementation::new::<Katana, _>(|_| Ok(Katana))));
    container.bind(
        Binding::new("Ninja").to(
            Implementation::new::<Ninja, _>(|args| {
                args.get::<Katana>("katana")?;
                Ok(Ninja)
            })
            .depends_on(di_kernel::Dependency::new("katana", "Katana")),
        ),
    );

    container.get::<Ninja>("Ninja").unwrap();
    assert_eq!(
        log.events(),
        vec![
            "resolving Ninja",
            "resolving Katana",
            "created Katana",
            "resolved Katana",
            "created Ninja",
            "resolved Ninja",
        ]
    );
}

#[test]
fn failures_are_reported_for_each_request_on_the_path() {
    let log = Arc::new(EventLog::default());
    let container = Container::builder().add_observer(log.clone()).build();
    container.bind(
        Binding::new("Ninja").to(
            Implementation::new::<Ninja, _>(|_| Ok(Ninja)).depends_on(di_kernel::Dependency::new("fuel", "Fuel")),
        ),
    );
    container.bind(Binding::new("Fuel").to_dynamic_value(|_| -> di_kernel::DiResult<u8> {
        Err(DiError::InvalidConfiguration("empty tank".into()))
    }));

    assert!(container.resolve("Ninja").is_err());
    assert_eq!(
        log.events(),
        vec![
            "resolving Ninja",
            "resolving Fuel",
            "failed Fuel: Invalid configuration: empty tank",
            "failed Ninja: Invalid configuration: empty tank",
        ]
    );
}

#[test]
fn configured_resolver_observes_nested_resolutions() {
    let registry = Arc::new(BindingRegistry::new());
    registry.add(Binding::new("Base").to_constant_value(40u32));
    registry.add(Binding::new("Answer").to_dynamic_value(|context| Ok(*context.get::<u32>("Base")? + 2)));

    let log = Arc::new(EventLog::default());
    let resolver = Resolver::new().with_observer(log.clone());
    let planner = Planner::default();
    let context = planner.create_context_with_resolver(registry, resolver.clone());
    context.add_plan(planner.create_plan(&context, "Answer", None).unwrap());

    let answer = resolver.resolve(&context).unwrap().downcast::<u32>().unwrap();
    assert_eq!(*answer, 42);
    assert_eq!(
        log.events(),
        vec!["resolving Answer", "resolving Base", "resolved Base", "resolved Answer"]
    );
}

#[test]
fn tracing_observer_emits_under_a_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let container = Container::builder()
            .add_observer(Arc::new(TracingObserver::with_label("test")))
            .build();
        container.bind(Binding::new("Katana").to(Implementation::new::<Katana, _>(|_| Ok(Katana))).in_singleton_scope());
        container.get::<Katana>("Katana").unwrap();
        assert!(container.resolve("Missing").is_err());
    });
}
