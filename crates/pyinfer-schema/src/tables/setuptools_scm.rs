use crate::shape::{Field, Schema, Shape, TableKind};

const FIELDS: &[Field] = &[
    ("root", Shape::Path),
    ("version_scheme", Shape::Str),
    ("local_scheme", Shape::Str),
    ("write_to", Shape::Path),
    ("write_to_template", Shape::Str),
    ("version_file", Shape::Path),
    ("version_file_template", Shape::Str),
    ("relative_to", Shape::Str),
    ("tag_regex", Shape::Str),
    ("parentdir_prefix_version", Shape::Str),
    ("fallback_version", Shape::Str),
    ("fallback_root", Shape::Path),
    ("parse", Shape::Any),
    ("git_describe_command", Shape::Any),
    ("dist_name", Shape::Str),
    ("version_cls", Shape::Any),
    ("normalize", Shape::Bool),
    ("search_parent_directories", Shape::Bool),
];

pub static SCHEMA: Schema = Schema {
    name: "tool.setuptools_scm",
    fields: FIELDS,
    closed: false,
    placeholdered: true,
    kind: Some(TableKind::SetuptoolsScm),
};
