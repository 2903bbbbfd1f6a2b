pub mod diagnostics;
pub mod split;

pub use diagnostics::{Diagnostic, Diagnostics};
