pub mod coerce;
pub mod convert;
pub mod errors;
pub mod shape;
pub mod table;
pub mod tables;

#[cfg(test)]
mod tests;

pub use coerce::{coerce, coerce_entries, coerce_to_map};
pub use errors::{CoercionError, TableError};
pub use shape::{Field, Schema, Shape, TableKind};
pub use table::{ConfigurationTable, Entry};

pub type TableResult<T> = Result<T, TableError>;
