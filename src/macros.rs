/// Declares an enum of service keys, each variant bound to its canonical service name.
///
/// # Syntax
/// ```text
/// service_keys! {
///     pub enum Runes {
///         Database = "database",
///         Cache = "cache",
///     }
/// }
/// ```
///
/// The enum derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord` and `Hash`,
/// implements [`crate::ServiceKey`] and `Display`, and gets `ALL` and `as_str`.
///
/// # Examples
/// ```rust
/// use rune_forge::{service_keys, ServiceKey as _};
///
/// service_keys! {
///     pub enum Runes {
///         Database = "database",
///     }
/// }
///
/// assert_eq!(Runes::Database.name(), "database");
/// ```
#[macro_export]
macro_rules! service_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant, )*
        }

        #[allow(dead_code)]
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            #[inline]
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )*
                }
            }
        }

        impl $crate::ServiceKey for $name {
            #[inline]
            fn name(&self) -> &str {
                self.as_str()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Builds a [`crate::Registry`] from composite keys and instantiators.
///
/// # Syntax
/// ```text
/// registry! {
///     "<service>.<implementation>" => instantiator,
///     ...
/// }
/// ```
///
/// # Examples
/// ```rust
/// use rune_forge::{instance, registry};
///
/// #[derive(Clone)]
/// struct InMemoryCache;
///
/// let registry = registry! {
///     "cache.memory" => instance(InMemoryCache),
/// };
/// assert!(registry.contains("cache.memory"));
/// ```
#[macro_export]
macro_rules! registry {
    ( $( $key:expr => $instantiator:expr ),* $(,)? ) => {{
        let registry = $crate::Registry::new();
        $(
            let registry = registry.provide($key, $instantiator);
        )*
        registry
    }};
}
