use alloc::{
    borrow::ToOwned as _,
    collections::{BTreeMap, BTreeSet},
    string::String,
};
use core::cell::RefCell;

use crate::utils::thread_safety::Instance;

/// Resolution state of a container: resolved instances and names being resolved on the active call stack.
///
/// A name is never in both of them.
#[derive(Default)]
pub(crate) struct Cache {
    map: BTreeMap<String, Instance>,
    resolving: BTreeSet<String>,
}

impl Cache {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            resolving: BTreeSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<Instance> {
        self.map.get(name).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    #[inline]
    pub(crate) fn insert(&mut self, name: &str, instance: Instance) {
        self.map.insert(name.to_owned(), instance);
    }

    #[inline]
    #[must_use]
    pub(crate) fn is_resolving(&self, name: &str) -> bool {
        self.resolving.contains(name)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

/// Marks a name as being resolved until dropped.
///
/// The mark is removed on every exit path, including unwinding out of an instantiator.
pub(crate) struct ResolvingGuard<'a> {
    cache: &'a RefCell<Cache>,
    name: &'a str,
}

impl<'a> ResolvingGuard<'a> {
    pub(crate) fn begin(cache: &'a RefCell<Cache>, name: &'a str) -> Self {
        cache.borrow_mut().resolving.insert(name.to_owned());
        Self { cache, name }
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut cache) = self.cache.try_borrow_mut() {
            cache.resolving.remove(self.name);
        }
    }
}
