pub mod document;
pub mod keys;
pub mod sources;

pub use document::CanonicalDocument;
pub use sources::SourceKind;

pub type InferResult<T> = anyhow::Result<T>;
