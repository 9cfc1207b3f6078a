use alloc::string::String;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    #[error("Invalid class path `{path}`. Expected `module.path:Symbol` or `module.path.Symbol`")]
    InvalidPath { path: String },
    #[error("Class `{path}` not found")]
    UnknownClass { path: String },
}
