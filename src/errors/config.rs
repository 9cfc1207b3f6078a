#[cfg(feature = "loader")]
use alloc::boxed::Box;
#[cfg(feature = "loader")]
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigErrorKind {
    #[error("Invalid config document: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "loader")]
    #[error(transparent)]
    Extract(Box<figment::Error>),
    #[cfg(feature = "loader")]
    #[error("Unsupported config format of `{}`. Expected `.toml` or `.json`", path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[cfg(feature = "loader")]
impl From<figment::Error> for ConfigErrorKind {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}
