use rune_forge::{
    autowired::__INSCRIPTIONS, inscribe, instance, Config, Container, InstantiateErrorKind, Locator, Params, Registry,
    RcThreadSafety,
};
use serde_json::json;

#[derive(Clone)]
struct InMemoryCache;

inscribe!("cache.memory", instance(InMemoryCache));

struct Sessions(RcThreadSafety<InMemoryCache>);

inscribe!("sessions.default", |params: Params| {
    Ok::<_, InstantiateErrorKind>(Sessions(params.dependency("cache")?))
});

fn config() -> Config {
    Config::from_value(json!({
        "services": {
            "cache": { "use": "memory", "implementations": { "memory": {} } },
            "sessions": {
                "use": "default",
                "implementations": { "default": { "depends_on": { "cache": "cache" } } },
            },
        },
    }))
    .unwrap()
}

#[test]
fn test_inscriptions_count() {
    assert_eq!(__INSCRIPTIONS.len(), 2);
}

#[test]
fn test_inscriptions() {
    let registry = Registry::new().provide_inscriptions();
    assert!(registry.contains("cache.memory"));
    assert!(registry.contains("sessions.default"));

    let container = Container::new(config(), Locator::new(registry));

    let sessions = container.get_typed::<Sessions>("sessions").unwrap();
    let cache = container.get_typed::<InMemoryCache>("cache").unwrap();
    assert!(RcThreadSafety::ptr_eq(&sessions.0, &cache));
}

#[test]
fn test_registry_without_inscriptions() {
    let container = Container::new(config(), Locator::new(Registry::new()));

    container.resolve("cache").unwrap_err();
}
