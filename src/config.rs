use alloc::{collections::BTreeMap, string::String};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::ConfigErrorKind;

/// Typed service graph.
///
/// ## Document shape
/// ```text
/// services:
///   <service>:
///     use: <implementation>
///     implementations:
///       <implementation>:
///         class: <optional class path>
///         depends_on: { <param>: <service> }
///         <param>: <scalar>
/// ```
///
/// `runes` is accepted as an alias of `services`.
/// A missing or `null` `services` key means zero services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, alias = "runes", deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, ServiceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name of the selected implementation
    #[serde(rename = "use")]
    pub selected: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub implementations: BTreeMap<String, ImplementationConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationConfig {
    /// Class path used when the implementation isn't registered explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Local parameter name to the name of the service it resolves to
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "BTreeMap::is_empty")]
    pub depends_on: BTreeMap<String, String>,
    /// Every other key of the entry, passed to the instantiator as scalar parameters
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Config {
    #[inline]
    #[must_use]
    pub const fn new(services: BTreeMap<String, ServiceConfig>) -> Self {
        Self { services }
    }

    /// Parses a JSON document
    ///
    /// # Errors
    /// Returns [`ConfigErrorKind::Json`] if the document doesn't match the config shape
    pub fn from_json_str(source: &str) -> Result<Self, ConfigErrorKind> {
        serde_json::from_str(source).map_err(Into::into)
    }

    /// Converts an already parsed document, e.g. built with [`serde_json::json`]
    ///
    /// # Errors
    /// Returns [`ConfigErrorKind::Json`] if the document doesn't match the config shape
    pub fn from_value(value: Value) -> Result<Self, ConfigErrorKind> {
        serde_json::from_value(value).map_err(Into::into)
    }

    /// Parses a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigErrorKind::Extract`] if the document can't be parsed or doesn't match the config shape
    #[cfg(feature = "loader")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigErrorKind> {
        use figment::{
            providers::{Format as _, Toml},
            Figment,
        };

        Figment::from(Toml::string(source)).extract().map_err(Into::into)
    }

    #[inline]
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Service names in enumeration order
    #[inline]
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceConfig {
    #[inline]
    #[must_use]
    pub fn selected_implementation(&self) -> Option<&ImplementationConfig> {
        self.implementations.get(&self.selected)
    }
}
