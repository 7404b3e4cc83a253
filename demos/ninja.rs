/// Example: the ninja object graph
///
/// Binds a singleton katana, transient shurikens and a lazy provider, then
/// prints the plan and resolves it a few times.
///
/// Run with `RUST_LOG=di_kernel=trace` to see planner and resolver events.

use di_kernel::{
    AnyArc, Binding, BoxFuture, Container, ContainerOptions, Dependency, DiResult, Implementation, ProviderFn,
    Resolved, TracingObserver,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ===== Services =====

#[derive(Debug)]
pub struct KatanaHandler;

#[derive(Debug)]
pub struct KatanaBlade {
    pub steel: Arc<String>,
}

#[derive(Debug)]
pub struct Katana {
    pub handler: Arc<KatanaHandler>,
    pub blade: Arc<KatanaBlade>,
}

impl Katana {
    pub fn hit(&self) -> String {
        format!("cut with {} steel", self.blade.steel)
    }
}

#[derive(Debug)]
pub struct Shuriken;

#[derive(Debug)]
pub struct Ninja {
    pub katana: Arc<Katana>,
    pub shuriken: Arc<Shuriken>,
}

// ===== Registration =====

fn register(container: &Container) {
    container.bind(Binding::new("Steel").to_constant_value("tamahagane".to_string()));
    container.bind(Binding::new("KatanaHandler").to(Implementation::new::<KatanaHandler, _>(|_| Ok(KatanaHandler))));
    container.bind(
        Binding::new("KatanaBlade").to(
            Implementation::new::<KatanaBlade, _>(|args| Ok(KatanaBlade { steel: args.get("steel")? }))
                .depends_on(Dependency::new("steel", "Steel")),
        ),
    );
    container.bind(
        Binding::new("Katana")
            .to(Implementation::new::<Katana, _>(|args| {
                Ok(Katana {
                    handler: args.get("handler")?,
                    blade: args.get("blade")?,
                })
            })
            .depends_on(Dependency::new("handler", "KatanaHandler"))
            .depends_on(Dependency::new("blade", "KatanaBlade")))
            .in_singleton_scope(),
    );
    container.bind(Binding::new("Shuriken").to(Implementation::new::<Shuriken, _>(|_| Ok(Shuriken))));
    container.bind(
        Binding::new("Ninja").to(
            Implementation::new::<Ninja, _>(|args| {
                Ok(Ninja {
                    katana: args.get("katana")?,
                    shuriken: args.get("shuriken")?,
                })
            })
            .depends_on(Dependency::new("katana", "Katana"))
            .depends_on(Dependency::new("shuriken", "Shuriken")),
        ),
    );
    container.bind(Binding::new("NinjaProvider").to_provider(|context| {
        let handle = context.handle();
        let provider: ProviderFn = Arc::new(move || -> BoxFuture<DiResult<AnyArc>> {
            let handle = handle.clone();
            Box::pin(async move { handle.resolve("Ninja")?.into_single() })
        });
        Ok(provider)
    }));
}

#[tokio::main]
async fn main() -> DiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let container = Container::builder()
        .options(ContainerOptions::from_env()?)
        .add_observer(Arc::new(TracingObserver::with_label("demo")))
        .build();
    register(&container);

    println!("Plan for Ninja:\n{}", container.plan("Ninja")?.render_tree());

    let first = container.get::<Ninja>("Ninja")?;
    let second = container.get::<Ninja>("Ninja")?;
    println!("first ninja: {}", first.katana.hit());
    println!("same katana: {}", Arc::ptr_eq(&first.katana, &second.katana));
    println!("same shuriken: {}", Arc::ptr_eq(&first.shuriken, &second.shuriken));

    let provider = container.get_provider("NinjaProvider")?;
    let lazy = Resolved::from(provider().await?).downcast::<Ninja>()?;
    println!("provided ninja shares katana: {}", Arc::ptr_eq(&lazy.katana, &first.katana));

    Ok(())
}
