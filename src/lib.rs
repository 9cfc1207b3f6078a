#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod key;
pub(crate) mod locator;
pub(crate) mod params;
pub(crate) mod registry;
pub(crate) mod type_hints;

pub mod utils;

#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "auto")]
pub mod autowired;

pub use any::TypeInfo;
pub use config::{Config, ImplementationConfig, ServiceConfig};
pub use container::Container;
pub use errors::{AttributeErrorKind, ConfigErrorKind, InstantiateErrorKind, LoadErrorKind, ResolveErrorKind};
pub use instantiator::{boxed_instantiator, constructible, instance, BoxedInstantiator, Constructible, Instantiator};
pub use key::{CompositeKey, ServiceKey};
pub use locator::{ClassLoader, ClassTable, Locator};
pub use params::Params;
pub use registry::Registry;
pub use type_hints::TypeHints;
pub use utils::thread_safety::{Instance, RcThreadSafety};

#[cfg(feature = "loader")]
pub use loader::ConfigLoader;
