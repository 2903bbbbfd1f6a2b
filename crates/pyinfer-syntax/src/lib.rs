pub mod errors;
pub mod ini;
pub mod literal;
pub mod statement;
pub mod value;

pub use errors::{IniError, IniErrorKind, LiteralError};
pub use ini::{parse_ini, Ini};
pub use literal::decode_literal;
pub use statement::reconstruct;
pub use value::Value;
