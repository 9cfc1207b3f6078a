use alloc::{collections::BTreeMap, string::String};

use crate::instantiator::{boxed_instantiator, BoxedInstantiator, Instantiator};

/// Explicit registrations of instantiators keyed by composite key `<service>.<implementation>`.
///
/// Filled during application startup and read-only for the container afterwards.
/// Explicit registrations take precedence over class paths from the config.
#[derive(Default, Clone)]
pub struct Registry {
    instantiators: BTreeMap<String, BoxedInstantiator>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            instantiators: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn provide(mut self, key: impl Into<String>, instantiator: impl Instantiator) -> Self {
        self.add_instantiator(key, boxed_instantiator(instantiator));
        self
    }

    /// Merges registrations of another registry, the other one wins on equal keys
    #[inline]
    #[must_use]
    pub fn merge(mut self, other: Registry) -> Self {
        self.instantiators.extend(other.instantiators);
        self
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.instantiators.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instantiators.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instantiators.is_empty()
    }
}

impl Registry {
    #[inline]
    pub(crate) fn add_instantiator(&mut self, key: impl Into<String>, instantiator: BoxedInstantiator) -> Option<BoxedInstantiator> {
        self.instantiators.insert(key.into(), instantiator)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, key: &str) -> Option<&BoxedInstantiator> {
        self.instantiators.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::{errors::InstantiateErrorKind, instance, params::Params};

    #[derive(Clone)]
    struct Postgres;
    #[derive(Clone)]
    struct Sqlite;

    #[test]
    fn test_provide() {
        let registry = Registry::new()
            .provide("database.postgres", instance(Postgres))
            .provide("database.sqlite", |_: Params| Ok::<_, InstantiateErrorKind>(Sqlite));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("database.postgres"));
        assert!(registry.contains("database.sqlite"));
        assert!(!registry.contains("database"));
        assert!(registry.get("database.sqlite").is_some());
    }

    #[test]
    fn test_provide_equal_keys() {
        let registry = Registry::new()
            .provide("database.default", instance(Postgres))
            .provide("database.default", instance(Sqlite));
        assert_eq!(registry.len(), 1);

        let database = registry.get("database.default").unwrap().instantiate(Params::default()).unwrap();
        assert!(database.downcast::<Sqlite>().is_ok());
    }

    #[test]
    fn test_merge() {
        let registry = Registry::new()
            .provide("database.default", instance(Postgres))
            .provide("cache.memory", instance(Postgres))
            .merge(Registry::new().provide("database.default", instance(Sqlite)));
        assert_eq!(registry.len(), 2);

        let database = registry.get("database.default").unwrap().instantiate(Params::default()).unwrap();
        assert!(database.downcast::<Sqlite>().is_ok());
        assert!(registry.contains("cache.memory"));
    }

    #[test]
    fn test_registry_macro() {
        let registry = crate::registry! {
            "database.postgres" => instance(Postgres),
            "database.sqlite" => instance(Sqlite),
        };
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("database.postgres"));
    }
}
