mod attribute;
mod config;
mod instantiate;
mod load;
mod resolve;

pub use attribute::AttributeErrorKind;
pub use config::ConfigErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use load::LoadErrorKind;
pub use resolve::ResolveErrorKind;
