use alloc::{borrow::ToOwned as _, collections::BTreeMap, string::ToString as _};
use core::{any::type_name, cell::RefCell};
use parking_lot::ReentrantMutex;
use tracing::{debug, error, info, info_span};

use crate::{
    cache::{Cache, ResolvingGuard},
    config::{Config, ServiceConfig},
    errors::{AttributeErrorKind, ResolveErrorKind},
    key::{CompositeKey, ServiceKey},
    locator::Locator,
    params::Params,
    type_hints::TypeHints,
    utils::thread_safety::{Instance, RcThreadSafety, SendSafety, SyncSafety},
};

/// Lazily builds services described by a [`Config`], instantiating each service at most once.
///
/// Cloned containers share the same resolution cache.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

pub(crate) struct ContainerInner {
    pub(crate) config: Config,
    pub(crate) locator: Locator,
    pub(crate) type_hints: TypeHints,
    /// Held for the whole top-level resolution.
    /// Recursive resolution on the same thread reenters it, so another thread waiting for it
    /// never observes names in progress of this thread.
    pub(crate) cache: ReentrantMutex<RefCell<Cache>>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(config: Config, locator: Locator) -> Self {
        Self::new_with_type_hints(config, locator, TypeHints::new())
    }

    #[inline]
    #[must_use]
    pub fn new_with_type_hints(config: Config, locator: Locator, type_hints: TypeHints) -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                config,
                locator,
                type_hints,
                cache: ReentrantMutex::new(RefCell::new(Cache::new())),
            }),
        }
    }

    /// Resolves a service by name, returning the cached instance if it's already resolved.
    ///
    /// Dependencies from `depends_on` are resolved recursively before the service itself is instantiated.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::CircularDependency`] if the service is already being resolved on this call stack
    /// - Returns [`ResolveErrorKind::ServiceNotFound`] if the service (or one of its dependencies) isn't in the config
    /// - Returns [`ResolveErrorKind::ImplementationNotFound`] if the selected implementation can't be located
    /// - Returns [`ResolveErrorKind::InvalidServiceConfig`] if the instantiator rejects the parameters
    pub fn resolve(&self, key: impl ServiceKey) -> Result<Instance, ResolveErrorKind> {
        let name = key.name();

        let span = info_span!("resolve", service = name);
        let _guard = span.enter();

        debug!("Resolution requested");

        let cache = self.inner.cache.lock();

        if let Some(instance) = cache.borrow().get(name) {
            debug!("Found in cache");
            return Ok(instance);
        }
        if cache.borrow().is_resolving(name) {
            let err = ResolveErrorKind::CircularDependency { name: name.to_owned() };
            error!("{}", err);
            return Err(err);
        }
        let Some(service) = self.inner.config.service(name) else {
            let err = ResolveErrorKind::ServiceNotFound { name: name.to_owned() };
            error!("{}", err);
            return Err(err);
        };

        let result = {
            let _resolving = ResolvingGuard::begin(&cache, name);
            self.instantiate(name, service)
        };

        match result {
            Ok(instance) => {
                cache.borrow_mut().insert(name, instance.clone());
                info!("Wired {} -> {}", name, CompositeKey::new(name, &service.selected));
                Ok(instance)
            }
            Err(err) => {
                debug!("Resolution failed");
                Err(err)
            }
        }
    }

    /// Resolves a service and restores its static type.
    ///
    /// If a type hint was registered for the service, the instance is checked against it first.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::ServiceTypeMismatch`] if the instance doesn't match the type hint or `Dep`
    /// - Returns any error of [`Self::resolve`]
    pub fn get_typed<Dep: SendSafety + SyncSafety + 'static>(&self, key: impl ServiceKey) -> Result<RcThreadSafety<Dep>, ResolveErrorKind> {
        let name = key.name();
        let instance = self.resolve(name)?;

        if let Some(expected) = self.inner.type_hints.get(name) {
            if !expected.is_type_of(&instance) {
                let err = ResolveErrorKind::ServiceTypeMismatch {
                    name: name.to_owned(),
                    expected: expected.name,
                };
                error!("{}", err);
                return Err(err);
            }
        }

        instance.downcast::<Dep>().map_err(|_| {
            let err = ResolveErrorKind::ServiceTypeMismatch {
                name: name.to_owned(),
                expected: type_name::<Dep>(),
            };
            error!("{}", err);
            err
        })
    }

    /// Resolves every service of the config in its enumeration order.
    ///
    /// # Errors
    /// Returns the first error of [`Self::resolve`], services after the failed one stay unresolved
    pub fn build_all(&self) -> Result<(), ResolveErrorKind> {
        for name in self.inner.config.service_names() {
            info!(service = name, "Building service");
            self.resolve(name)?;
        }
        Ok(())
    }

    /// Attribute-style access: treats every service name of the config as a field of the container.
    ///
    /// # Errors
    /// - Returns [`AttributeErrorKind::UnknownService`] if the config has no service with the name
    /// - Returns [`AttributeErrorKind::Resolve`] if the service can't be resolved
    pub fn attr(&self, name: &str) -> Result<Instance, AttributeErrorKind> {
        if !self.inner.config.contains(name) {
            let err = AttributeErrorKind::UnknownService { name: name.to_owned() };
            error!("{}", err);
            return Err(err);
        }
        self.resolve(name).map_err(Into::into)
    }

    /// Checks whether the service is already resolved, without resolving it
    #[must_use]
    pub fn is_resolved(&self, key: impl ServiceKey) -> bool {
        self.inner.cache.lock().borrow().contains(key.name())
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    #[inline]
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.inner.config.service_names()
    }
}

impl Container {
    fn instantiate(&self, name: &str, service: &ServiceConfig) -> Result<Instance, ResolveErrorKind> {
        let key = CompositeKey::new(name, &service.selected);

        let Some(implementation) = service.selected_implementation() else {
            let err = ResolveErrorKind::ImplementationNotFound {
                key: key.to_string(),
                source: None,
            };
            error!("{}", err);
            return Err(err);
        };

        let instantiator = self.inner.locator.locate(key, implementation.class.as_deref())?;

        let mut dependencies = BTreeMap::new();
        for (param, dependency) in &implementation.depends_on {
            debug!(param = %param, dependency = %dependency, "Resolving dependency");
            dependencies.insert(param.clone(), self.resolve(dependency)?);
        }

        instantiator
            .instantiate(Params::new(implementation.params.clone(), dependencies))
            .map_err(|source| {
                let err = ResolveErrorKind::InvalidServiceConfig {
                    key: key.to_string(),
                    source,
                };
                error!("{}", err);
                err
            })
    }
}
