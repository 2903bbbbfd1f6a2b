//! coverage.py configuration.
//! <https://coverage.readthedocs.io/en/latest/config.html>

use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::STRINGS;

const RUN: &[Field] = &[
    ("branch", Shape::Bool),
    ("data_file", Shape::Path),
    ("include", STRINGS),
    ("omit", STRINGS),
    ("parallel", Shape::Bool),
    ("relative_files", Shape::Bool),
    ("source", STRINGS),
];

const REPORT: &[Field] = &[
    ("exclude_lines", STRINGS),
    ("fail_under", Shape::Float),
    ("include", STRINGS),
    ("omit", STRINGS),
    ("precision", Shape::Int),
    ("show_missing", Shape::Bool),
    ("skip_covered", Shape::Bool),
];

const HTML: &[Field] = &[("directory", Shape::Path), ("title", Shape::Str)];

const XML: &[Field] = &[("output", Shape::Path)];

const FIELDS: &[Field] = &[
    ("run", Shape::Nested(RUN)),
    ("report", Shape::Nested(REPORT)),
    ("html", Shape::Nested(HTML)),
    ("xml", Shape::Nested(XML)),
    ("paths", Shape::Map(&STRINGS)),
];

pub static SCHEMA: Schema = Schema {
    name: "tool.coverage",
    fields: FIELDS,
    closed: false,
    placeholdered: true,
    kind: Some(TableKind::Coverage),
};
