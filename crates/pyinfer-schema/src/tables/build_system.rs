//! PEP 517 build system requirements.

use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::STRINGS;

const FIELDS: &[Field] = &[
    ("requires", STRINGS),
    ("build-backend", Shape::Str),
    ("backend-path", STRINGS),
];

pub static SCHEMA: Schema = Schema {
    name: "build-system",
    fields: FIELDS,
    closed: true,
    placeholdered: true,
    kind: Some(TableKind::BuildSystem),
};
