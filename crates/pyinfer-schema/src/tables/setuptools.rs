//! Setuptools-specific configuration.
//! <https://setuptools.pypa.io/en/latest/userguide/pyproject_config.html>

use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::{STRINGS, STRINGS_MAP, STRING_MAP};

const FIELDS: &[Field] = &[
    ("platforms", STRINGS),
    ("zip-safe", Shape::Bool),
    ("eager-resources", STRINGS),
    ("py-modules", STRINGS),
    // Either an explicit list or `{find = {...}}`
    ("packages", Shape::Union(&[STRINGS, Shape::Map(&Shape::Any)])),
    ("package-dir", STRING_MAP),
    ("package-data", STRINGS_MAP),
    ("include-package-data", Shape::Bool),
    ("exclude-package-data", STRINGS_MAP),
    ("license-files", STRINGS),
    ("data-files", STRINGS_MAP),
    ("script-files", STRINGS),
    ("namespace-packages", STRINGS),
    ("provides", STRINGS),
    ("obsoletes", STRINGS),
    ("dynamic", Shape::Map(&Shape::Any)),
    ("cmdclass", STRING_MAP),
];

pub static SCHEMA: Schema = Schema {
    name: "tool.setuptools",
    fields: FIELDS,
    closed: true,
    placeholdered: true,
    kind: Some(TableKind::Setuptools),
};
