use alloc::{
    borrow::ToOwned as _,
    collections::BTreeMap,
    string::String,
};
use core::any::type_name;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    errors::InstantiateErrorKind,
    utils::thread_safety::{Instance, RcThreadSafety, SendSafety, SyncSafety},
};

/// Named parameters of an instantiator call:
/// scalar parameters from the implementation config and resolved dependencies
/// keyed by their local parameter names from `depends_on`.
#[derive(Clone, Default)]
pub struct Params {
    values: Map<String, Value>,
    dependencies: BTreeMap<String, Instance>,
}

impl Params {
    #[inline]
    #[must_use]
    pub fn new(values: Map<String, Value>, dependencies: BTreeMap<String, Instance>) -> Self {
        Self { values, dependencies }
    }

    /// Gets a required scalar parameter
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind::MissingParameter`] if the parameter isn't set
    /// - Returns [`InstantiateErrorKind::InvalidParameter`] if the value can't be decoded as `T`
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, InstantiateErrorKind> {
        let Some(value) = self.values.get(name) else {
            return Err(InstantiateErrorKind::MissingParameter { name: name.to_owned() });
        };
        T::deserialize(value).map_err(|source| InstantiateErrorKind::InvalidParameter {
            name: name.to_owned(),
            source,
        })
    }

    /// Gets an optional scalar parameter, `null` is treated as unset
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind::InvalidParameter`] if the value can't be decoded as `T`
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, InstantiateErrorKind> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.get(name).map(Some),
        }
    }

    /// Decodes all scalar parameters at once.
    /// Use `#[serde(deny_unknown_fields)]` on `T` to reject unexpected parameters.
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind::InvalidParameters`] if the parameters can't be decoded as `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, InstantiateErrorKind> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(InstantiateErrorKind::InvalidParameters)
    }

    /// Gets an injected dependency
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind::MissingDependency`] if no dependency is injected under the name
    /// - Returns [`InstantiateErrorKind::DependencyTypeMismatch`] if the dependency isn't an instance of `Dep`
    pub fn dependency<Dep: SendSafety + SyncSafety + 'static>(&self, name: &str) -> Result<RcThreadSafety<Dep>, InstantiateErrorKind> {
        let Some(instance) = self.dependencies.get(name) else {
            return Err(InstantiateErrorKind::MissingDependency { name: name.to_owned() });
        };
        instance
            .clone()
            .downcast::<Dep>()
            .map_err(|_| InstantiateErrorKind::DependencyTypeMismatch {
                name: name.to_owned(),
                expected: type_name::<Dep>(),
            })
    }

    /// Gets an injected dependency without a type check
    #[inline]
    #[must_use]
    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.dependencies.get(name)
    }
}
