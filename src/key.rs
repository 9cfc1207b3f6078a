use alloc::string::String;
use core::fmt::{self, Display, Formatter};

/// Identifier of a service in the config.
///
/// Implemented for string types and for enums declared with [`crate::service_keys`].
/// Every key has exactly one canonical name, used as the key of the resolution cache.
pub trait ServiceKey {
    fn name(&self) -> &str;
}

impl ServiceKey for str {
    #[inline]
    fn name(&self) -> &str {
        self
    }
}

impl ServiceKey for String {
    #[inline]
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl<K: ServiceKey + ?Sized> ServiceKey for &K {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Pairing of a service name and its selected implementation name.
/// Explicit registrations are looked up by its string form `<service>.<implementation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeKey<'a> {
    pub service: &'a str,
    pub implementation: &'a str,
}

impl<'a> CompositeKey<'a> {
    #[inline]
    #[must_use]
    pub const fn new(service: &'a str, implementation: &'a str) -> Self {
        Self { service, implementation }
    }
}

impl Display for CompositeKey<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.implementation)
    }
}
