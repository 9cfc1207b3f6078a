use alloc::{collections::BTreeMap, string::String};

use crate::{any::TypeInfo, key::ServiceKey};

/// Expected types of services, checked by [`crate::Container::get_typed`]
#[derive(Default, Clone)]
pub struct TypeHints {
    hints: BTreeMap<String, TypeInfo>,
}

impl TypeHints {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { hints: BTreeMap::new() }
    }

    #[inline]
    #[must_use]
    pub fn hint<T: ?Sized + 'static>(mut self, key: impl ServiceKey) -> Self {
        self.hints.insert(key.name().into(), TypeInfo::of::<T>());
        self
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.hints.get(name)
    }
}
