use alloc::string::String;

use super::{instantiate::InstantiateErrorKind, load::LoadErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Service `{name}` is not defined in config")]
    ServiceNotFound { name: String },
    #[error("Circular dependency detected while resolving `{name}`")]
    CircularDependency { name: String },
    #[error("No registered instantiator or class path found for `{key}`")]
    ImplementationNotFound {
        key: String,
        #[source]
        source: Option<LoadErrorKind>,
    },
    #[error("Config error in `{key}`: {source}")]
    InvalidServiceConfig {
        key: String,
        #[source]
        source: InstantiateErrorKind,
    },
    #[error("Service `{name}` isn't an instance of `{expected}`")]
    ServiceTypeMismatch { name: String, expected: &'static str },
}
