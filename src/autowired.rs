//! Link-time registrations declared next to the types they construct.
//!
//! [`crate::inscribe`] adds an entry to [`__INSCRIPTIONS`] at the declaration site,
//! [`Registry::provide_inscriptions`] merges all of them into an explicit registry.
//! The container itself never reads the inscriptions directly.

use crate::{instantiator::BoxedInstantiator, registry::Registry};

pub use linkme::{self, distributed_slice};

#[distributed_slice]
pub static __INSCRIPTIONS: [fn() -> (&'static str, BoxedInstantiator)];

impl Registry {
    /// Adds every inscription linked into the binary, inscriptions override equal keys
    #[must_use]
    pub fn provide_inscriptions(self) -> Self {
        __INSCRIPTIONS.iter().fold(self, |mut registry, getter| {
            let (key, instantiator) = getter();
            registry.add_instantiator(key, instantiator);
            registry
        })
    }
}

/// Registers an instantiator under a composite key at link time.
///
/// # Syntax
/// ```text
/// inscribe!("<service>.<implementation>", instantiator);
/// ```
///
/// # Examples
/// ```rust
/// use rune_forge::{inscribe, instance, Registry};
///
/// #[derive(Clone)]
/// struct InMemoryCache;
///
/// inscribe!("cache.memory", instance(InMemoryCache));
///
/// fn main() {
///     let registry = Registry::new().provide_inscriptions();
///     assert!(registry.contains("cache.memory"));
/// }
/// ```
#[macro_export]
macro_rules! inscribe {
    ($key:expr, $instantiator:expr $(,)?) => {
        const _: () = {
            use $crate::autowired::distributed_slice;

            fn __inscription() -> (&'static str, $crate::BoxedInstantiator) {
                ($key, $crate::boxed_instantiator($instantiator))
            }

            #[distributed_slice($crate::autowired::__INSCRIPTIONS)]
            #[linkme(crate = $crate::autowired::linkme)]
            static __INSCRIPTION: fn() -> (&'static str, $crate::BoxedInstantiator) = __inscription;
        };
    };
}
