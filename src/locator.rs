use alloc::{
    borrow::ToOwned as _,
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString as _},
};
use tracing::{debug, error};

use crate::{
    errors::{LoadErrorKind, ResolveErrorKind},
    instantiator::{boxed_instantiator, BoxedInstantiator, Instantiator},
    key::CompositeKey,
    registry::Registry,
    utils::thread_safety::{SendSafety, SyncSafety},
};

/// Resolves a class path from the config to a constructible type
pub trait ClassLoader: SendSafety + SyncSafety {
    /// # Errors
    /// - Returns [`LoadErrorKind::InvalidPath`] if the path is malformed
    /// - Returns [`LoadErrorKind::UnknownClass`] if nothing is known under the path
    fn load(&self, class_path: &str) -> Result<BoxedInstantiator, LoadErrorKind>;
}

/// [`ClassLoader`] backed by a table of class paths.
///
/// Paths are `module.path:Symbol` or `module.path.Symbol`, both spellings of the same path resolve to the same class.
#[derive(Default, Clone)]
pub struct ClassTable {
    classes: BTreeMap<String, BoxedInstantiator>,
}

impl ClassTable {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { classes: BTreeMap::new() }
    }

    /// Adds a class under the path.
    ///
    /// # Errors
    /// Returns [`LoadErrorKind::InvalidPath`] if the path is malformed
    pub fn add(&mut self, class_path: &str, instantiator: impl Instantiator) -> Result<(), LoadErrorKind> {
        let path = normalize(class_path)?;
        self.classes.insert(path, boxed_instantiator(instantiator));
        Ok(())
    }

    /// Builder-style variant of [`Self::add`]
    ///
    /// # Errors
    /// Returns [`LoadErrorKind::InvalidPath`] if the path is malformed
    pub fn with(mut self, class_path: &str, instantiator: impl Instantiator) -> Result<Self, LoadErrorKind> {
        self.add(class_path, instantiator)?;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for ClassTable {
    fn load(&self, class_path: &str) -> Result<BoxedInstantiator, LoadErrorKind> {
        let path = normalize(class_path)?;
        self.classes.get(&path).cloned().ok_or(LoadErrorKind::UnknownClass { path })
    }
}

/// Normalizes `module.path:Symbol` to `module.path.Symbol`
fn normalize(class_path: &str) -> Result<String, LoadErrorKind> {
    let invalid = || LoadErrorKind::InvalidPath {
        path: class_path.to_owned(),
    };

    let (module, symbol) = match class_path.split_once(':') {
        Some((module, symbol)) => (module, symbol),
        None => class_path.rsplit_once('.').ok_or_else(invalid)?,
    };
    if symbol.is_empty() || symbol.contains(|c| c == '.' || c == ':') {
        return Err(invalid());
    }
    if module.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    if class_path.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let mut path = module.to_string();
    path.push('.');
    path.push_str(symbol);
    Ok(path)
}

/// Finds the instantiator of a selected implementation:
/// explicit registrations first, then the class path from the config.
pub struct Locator {
    registry: Registry,
    loader: Box<dyn ClassLoader>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

impl Locator {
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            loader: Box::new(ClassTable::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_loader(mut self, loader: impl ClassLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// # Errors
    /// Returns [`ResolveErrorKind::ImplementationNotFound`] if the implementation isn't registered explicitly,
    /// and the class path is absent, empty or can't be loaded
    pub fn locate(&self, key: CompositeKey<'_>, class: Option<&str>) -> Result<BoxedInstantiator, ResolveErrorKind> {
        let composite_key = key.to_string();

        if let Some(instantiator) = self.registry.get(&composite_key) {
            debug!(key = %composite_key, "Found in registry");
            return Ok(instantiator.clone());
        }
        debug!(key = %composite_key, "Not found in registry");

        let Some(class) = class.filter(|class| !class.is_empty()) else {
            let err = ResolveErrorKind::ImplementationNotFound {
                key: composite_key,
                source: None,
            };
            error!("{}", err);
            return Err(err);
        };

        match self.loader.load(class) {
            Ok(instantiator) => {
                debug!(key = %composite_key, class, "Loaded by class path");
                Ok(instantiator)
            }
            Err(source) => {
                let err = ResolveErrorKind::ImplementationNotFound {
                    key: composite_key,
                    source: Some(source),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}
