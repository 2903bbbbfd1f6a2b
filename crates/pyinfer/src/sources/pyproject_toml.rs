use pyinfer_schema::convert::toml_table_to_map;
use pyinfer_util::Diagnostics;

use crate::document::CanonicalDocument;
use crate::InferResult;

pub fn parse(text: &str) -> InferResult<toml::Table> {
    Ok(toml::from_str(text)?)
}

/// `pyproject.toml` is already in the target layout; its tables are applied as they are.
pub fn translate(
    table: &toml::Table,
    document: &mut CanonicalDocument,
    diagnostics: &mut Diagnostics,
) -> InferResult<()> {
    document.update(&toml_table_to_map(table), diagnostics)
}
