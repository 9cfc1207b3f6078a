//! Loading of [`Config`] from documents and environment variables.
//!
//! Sources are merged in this order, later sources override earlier ones:
//! 1. config files, in the order they were added (`.toml` or `.json`)
//! 2. environment variables with the prefix, nested keys separated by `__`,
//!    e.g. `RUNE_SERVICES__DATABASE__USE=sqlite`

use alloc::{string::String, vec::Vec};
use figment::{
    providers::{Env, Format as _, Json, Toml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::{config::Config, errors::ConfigErrorKind};

pub const DEFAULT_ENV_PREFIX: &str = "RUNE_";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    files: Vec<PathBuf>,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: Some(String::from(DEFAULT_ENV_PREFIX)),
        }
    }

    /// Adds a config file. Missing files are skipped on load
    #[inline]
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Disables the environment overlay
    #[inline]
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Merged sources without extraction
    ///
    /// # Errors
    /// Returns [`ConfigErrorKind::UnsupportedFormat`] if a file has an unknown extension
    pub fn figment(&self) -> Result<Figment, ConfigErrorKind> {
        let mut figment = Figment::new();

        for path in &self.files {
            if !path.exists() {
                debug!(path = %path.display(), "Config file not found, skipped");
                continue;
            }

            figment = match path.extension().and_then(|extension| extension.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    let err = ConfigErrorKind::UnsupportedFormat { path: path.clone() };
                    error!("{}", err);
                    return Err(err);
                }
            };
            debug!(path = %path.display(), "Config file merged");
        }

        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(Env::prefixed(prefix).split("__"));
        }

        Ok(figment)
    }

    /// # Errors
    /// - Returns [`ConfigErrorKind::UnsupportedFormat`] if a file has an unknown extension
    /// - Returns [`ConfigErrorKind::Extract`] if a source can't be parsed or the merged document doesn't match the config shape
    pub fn load(&self) -> Result<Config, ConfigErrorKind> {
        let config: Config = self.figment()?.extract().map_err(|err| {
            let err = ConfigErrorKind::from(err);
            error!("{}", err);
            err
        })?;

        info!(services = config.len(), "Config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigLoader;
    use crate::errors::ConfigErrorKind;

    use alloc::{
        format,
        string::{String, ToString as _},
    };
    use figment::Jail;
    use serde_json::json;
    use tracing_test::traced_test;

    const SERVICES_TOML: &str = r#"
        [services.database]
        use = "postgres"

        [services.database.implementations.postgres]
        class = "app.db:Postgres"
        port = 5432

        [services.database.implementations.sqlite]
        path = "app.db"

        [services.users]
        use = "default"

        [services.users.implementations.default]
        depends_on = { db = "database" }
    "#;

    #[test]
    #[traced_test]
    fn test_load_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("services.toml", SERVICES_TOML)?;

            let config = ConfigLoader::new().without_env().with_file("services.toml").load().unwrap();

            assert_eq!(config.len(), 2);
            let postgres = config.service("database").unwrap().selected_implementation().unwrap();
            assert_eq!(postgres.class.as_deref(), Some("app.db:Postgres"));
            assert_eq!(postgres.params.get("port"), Some(&json!(5432)));
            let users = config.service("users").unwrap().selected_implementation().unwrap();
            assert_eq!(users.depends_on.get("db").map(String::as_str), Some("database"));
            Ok(())
        });
    }

    #[test]
    #[traced_test]
    fn test_env_overlay() {
        Jail::expect_with(|jail| {
            jail.create_file("services.toml", SERVICES_TOML)?;
            jail.set_env("RUNE_SERVICES__DATABASE__USE", "sqlite");
            jail.set_env("RUNE_SERVICES__DATABASE__IMPLEMENTATIONS__SQLITE__PATH", "override.db");

            let config = ConfigLoader::new().with_file("services.toml").load().unwrap();

            let database = config.service("database").unwrap();
            assert_eq!(database.selected, "sqlite");
            let sqlite = database.selected_implementation().unwrap();
            assert_eq!(sqlite.params.get("path"), Some(&json!("override.db")));
            Ok(())
        });
    }

    #[test]
    #[traced_test]
    fn test_later_files_override() {
        Jail::expect_with(|jail| {
            jail.create_file("services.toml", SERVICES_TOML)?;
            jail.create_file(
                "local.json",
                r#"{ "services": { "database": { "use": "sqlite", "implementations": { "sqlite": { "path": "local.db" } } } } }"#,
            )?;

            let config = ConfigLoader::new()
                .without_env()
                .with_file("services.toml")
                .with_file("local.json")
                .load()
                .unwrap();

            let database = config.service("database").unwrap();
            assert_eq!(database.selected, "sqlite");
            assert_eq!(
                database.selected_implementation().unwrap().params.get("path"),
                Some(&json!("local.db"))
            );
            assert!(database.implementations.contains_key("postgres"));
            Ok(())
        });
    }

    #[test]
    #[traced_test]
    fn test_missing_file_and_no_services() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::new().without_env().with_file("missing.toml").load().unwrap();

            assert!(config.is_empty());
            Ok(())
        });
    }

    #[test]
    #[traced_test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("services.yaml", "services: {}")?;

            assert!(matches!(
                ConfigLoader::new().with_file("services.yaml").load(),
                Err(ConfigErrorKind::UnsupportedFormat { .. }),
            ));
            Ok(())
        });
    }

    #[test]
    #[traced_test]
    fn test_invalid_shape() {
        Jail::expect_with(|jail| {
            jail.create_file("services.toml", "[services.database]\nimplementations = {}\n")?;

            assert!(matches!(
                ConfigLoader::new().without_env().with_file("services.toml").load(),
                Err(ConfigErrorKind::Extract(_)),
            ));
            Ok(())
        });
    }
}
