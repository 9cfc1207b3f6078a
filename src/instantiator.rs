use tracing::debug;

use crate::{
    errors::InstantiateErrorKind,
    params::Params,
    utils::thread_safety::{Instance, RcThreadSafety, SendSafety, SyncSafety},
};

/// Uniform "build from named parameters" entry point of a constructible type.
///
/// Implemented for closures `Fn(Params) -> Result<T, E>`.
/// Types with their own construction logic implement [`Constructible`] and are wrapped with [`constructible`].
pub trait Instantiator: SendSafety + SyncSafety + 'static {
    /// # Errors
    /// Returns an error if the parameters are rejected
    fn instantiate(&self, params: Params) -> Result<Instance, InstantiateErrorKind>;
}

impl<F, Provides, Err> Instantiator for F
where
    F: Fn(Params) -> Result<Provides, Err> + SendSafety + SyncSafety + 'static,
    Provides: SendSafety + SyncSafety + 'static,
    Err: Into<InstantiateErrorKind>,
{
    fn instantiate(&self, params: Params) -> Result<Instance, InstantiateErrorKind> {
        match self(params) {
            Ok(dependency) => {
                debug!("Instantiated");
                Ok(RcThreadSafety::new(dependency) as Instance)
            }
            Err(err) => Err(err.into()),
        }
    }
}

pub type BoxedInstantiator = RcThreadSafety<dyn Instantiator>;

#[inline]
#[must_use]
pub fn boxed_instantiator(instantiator: impl Instantiator) -> BoxedInstantiator {
    RcThreadSafety::new(instantiator)
}

/// Type that knows how to build itself from named parameters
pub trait Constructible: Sized + SendSafety + SyncSafety + 'static {
    /// # Errors
    /// Returns an error if the parameters are rejected
    fn construct(params: &Params) -> Result<Self, InstantiateErrorKind>;
}

/// Wrapper to use a [`Constructible`] type as an instantiator
#[inline]
#[must_use]
pub fn constructible<T: Constructible>() -> impl Instantiator {
    |params: Params| T::construct(&params)
}

/// Wrapper to create an instantiator that just returns passed value.
/// It can be used when the value was created outside the container.
#[inline]
#[must_use]
pub fn instance<T: Clone + SendSafety + SyncSafety + 'static>(val: T) -> impl Instantiator {
    move |_: Params| Ok::<_, InstantiateErrorKind>(val.clone())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_instantiator, constructible, instance, Constructible, Instantiator};
    use crate::{errors::InstantiateErrorKind, params::Params};

    use alloc::{
        format,
        string::{String, ToString as _},
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use serde_json::{json, Value};
    use tracing::debug;
    use tracing_test::traced_test;

    #[derive(Clone)]
    struct Postgres {
        port: u16,
    }

    impl Constructible for Postgres {
        fn construct(params: &Params) -> Result<Self, InstantiateErrorKind> {
            Ok(Self { port: params.get("port")? })
        }
    }

    fn params(value: Value) -> Params {
        let Value::Object(values) = value else { unreachable!() };
        Params::new(values, alloc::collections::BTreeMap::new())
    }

    #[test]
    #[traced_test]
    fn test_closure_instantiator() {
        let call_count = std::sync::Arc::new(AtomicU8::new(0));

        let instantiator = boxed_instantiator({
            let call_count = call_count.clone();
            move |params: Params| {
                call_count.fetch_add(1, Ordering::SeqCst);

                debug!("Call instantiator");
                Ok::<_, InstantiateErrorKind>(Postgres { port: params.get("port")? })
            }
        });

        let postgres = instantiator.instantiate(params(json!({ "port": 5432 }))).unwrap();
        assert_eq!(postgres.downcast::<Postgres>().ok().unwrap().port, 5432);
        assert!(instantiator.instantiate(params(json!({}))).is_err());
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[traced_test]
    fn test_custom_error() {
        let instantiator = |_: Params| Err::<Postgres, _>(anyhow::anyhow!("connection refused"));

        let err = instantiator.instantiate(Params::default()).err().unwrap();
        assert!(matches!(err, InstantiateErrorKind::Custom(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_constructible() {
        let instantiator = constructible::<Postgres>();

        let postgres = instantiator.instantiate(params(json!({ "port": 5433 }))).unwrap();
        assert_eq!(postgres.downcast::<Postgres>().ok().unwrap().port, 5433);
        assert!(matches!(
            instantiator.instantiate(params(json!({ "port": "not a port" }))),
            Err(InstantiateErrorKind::InvalidParameter { .. }),
        ));
    }

    #[test]
    fn test_instance() {
        let instantiator = instance(Postgres { port: 1 });

        let postgres_1 = instantiator.instantiate(Params::default()).unwrap();
        let postgres_2 = instantiator.instantiate(Params::default()).unwrap();

        assert_eq!(postgres_1.downcast::<Postgres>().ok().unwrap().port, 1);
        assert_eq!(postgres_2.downcast::<Postgres>().ok().unwrap().port, 1);
    }

    #[test]
    #[allow(dead_code)]
    fn test_instantiator_impls() {
        fn instantiator<Inst: Instantiator>(_inst: Inst) {}
        fn instantiator_with_value<T: Clone + Send + Sync + 'static>(val: T) {
            instantiator(|_: Params| Ok::<_, InstantiateErrorKind>(()));
            instantiator(constructible::<Postgres>());
            instantiator(instance(val));
        }
    }
}
