//! <https://flake8.pycqa.org/en/latest/user/options.html>

use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::STRINGS;

const FIELDS: &[Field] = &[
    ("quiet", Shape::Int),
    ("count", Shape::Bool),
    ("exclude", STRINGS),
    ("extend-exclude", STRINGS),
    ("filename", STRINGS),
    ("format", Shape::Str),
    ("hang-closing", Shape::Bool),
    ("ignore", STRINGS),
    ("extend-ignore", STRINGS),
    ("per-file-ignores", Shape::Map(&STRINGS)),
    ("max-line-length", Shape::Int),
    ("max-doc-length", Shape::Int),
    ("indent-size", Shape::Int),
    ("select", STRINGS),
    ("extend-select", STRINGS),
    ("disable-noqa", Shape::Bool),
    ("show-source", Shape::Bool),
    ("statistics", Shape::Bool),
    ("require-plugins", STRINGS),
    ("enable-extensions", STRINGS),
    ("jobs", Shape::Int),
    ("tee", Shape::Bool),
    ("builtins", STRINGS),
    ("doctests", Shape::Bool),
    ("include-in-doctest", STRINGS),
    ("exclude-from-doctest", STRINGS),
    ("max-complexity", Shape::Int),
];

pub static SCHEMA: Schema = Schema {
    name: "tool.flake8",
    fields: FIELDS,
    closed: false,
    placeholdered: true,
    kind: Some(TableKind::Flake8),
};
