//! The `[tool]` namespace. Known tools get typed sub-tables; anything else is kept verbatim.

use crate::shape::{Field, Schema, Shape, TableKind};

const FIELDS: &[Field] = &[
    ("setuptools", Shape::Table(TableKind::Setuptools)),
    ("setuptools_scm", Shape::Table(TableKind::SetuptoolsScm)),
    ("coverage", Shape::Table(TableKind::Coverage)),
    ("flake8", Shape::Table(TableKind::Flake8)),
    ("ruff", Shape::Table(TableKind::Ruff)),
    ("pytest", Shape::Any),
];

pub static SCHEMA: Schema = Schema {
    name: "tool",
    fields: FIELDS,
    closed: false,
    placeholdered: false,
    kind: Some(TableKind::Tool),
};

/// Sub-tables that exist even before anything is set on them.
pub const PRESENT_BY_DEFAULT: &[TableKind] = &[TableKind::Setuptools];
