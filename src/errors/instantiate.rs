use alloc::string::String;

#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Missing parameter `{name}`")]
    MissingParameter { name: String },
    #[error("Invalid parameter `{name}`: {source}")]
    InvalidParameter {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[source] serde_json::Error),
    #[error("Missing dependency `{name}`")]
    MissingDependency { name: String },
    #[error("Dependency `{name}` isn't an instance of `{expected}`")]
    DependencyTypeMismatch { name: String, expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
