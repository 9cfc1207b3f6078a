use alloc::string::String;

use super::resolve::ResolveErrorKind;

/// Error of attribute-style access, see [`crate::Container::attr`]
#[derive(thiserror::Error, Debug)]
pub enum AttributeErrorKind {
    #[error("Container has no service named `{name}`")]
    UnknownService { name: String },
    #[error(transparent)]
    Resolve(#[from] ResolveErrorKind),
}
