//! Translators from each kind of source file into a [`CanonicalDocument`](crate::CanonicalDocument).
//!
//! The legacy formats are first gathered into a raw tree keyed by canonical path, e.g.
//! `{project = {urls = {homepage = ...}}}`, and the tree is then applied to the document's tables,
//! which do the coercion.

pub mod pyproject_toml;
pub mod setup_cfg;
pub mod setup_py;

use indexmap::IndexMap;
use pyinfer_schema::{Schema, Shape, TableKind};
use pyinfer_syntax::Value;

pub type Tree = IndexMap<String, Value>;

/// The files a configuration is read from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    SetupPy,
    SetupCfg,
    PyprojectToml,
}

impl SourceKind {
    /// Recognizes a file name regardless of case.
    pub fn from_file_name(name: &str) -> Option<SourceKind> {
        match name.to_lowercase().as_str() {
            "setup.py" => Some(SourceKind::SetupPy),
            "setup.cfg" => Some(SourceKind::SetupCfg),
            "pyproject.toml" => Some(SourceKind::PyprojectToml),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SourceKind::SetupPy => "setup.py",
            SourceKind::SetupCfg => "setup.cfg",
            SourceKind::PyprojectToml => "pyproject.toml",
        }
    }
}

fn merge_values(existing: &mut Value, value: Value) {
    match (existing, value) {
        (Value::Map(existing), Value::Map(entries)) => {
            for (key, value) in entries {
                match existing.get_mut(&key) {
                    Some(current) => merge_values(current, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (existing, value) => *existing = value,
    }
}

/// Store `value` at a dotted `path`, creating intermediate maps. Maps already at the path are
/// merged with `value` rather than replaced.
pub fn insert_path(tree: &mut Tree, path: &str, value: Value) {
    let (key, rest) = match path.split_once('.') {
        Some((key, rest)) => (key, Some(rest)),
        None => (path, None),
    };

    let value = match rest {
        Some(rest) => nest(rest, value),
        None => value,
    };
    match tree.get_mut(key) {
        Some(existing) => merge_values(existing, value),
        None => {
            tree.insert(key.to_string(), value);
        }
    }
}

/// Wrap `value` in one single-entry map per segment of `path`.
pub fn nest(path: &str, value: Value) -> Value {
    path.rsplit('.').fold(value, |inner, segment| {
        Value::Map(IndexMap::from([(segment.to_string(), inner)]))
    })
}

/// The shape declared for a dotted path, or `None` if no schema along the way declares it.
pub fn declared_shape(path: &str) -> Option<Shape> {
    let mut segments = path.split('.');
    let mut shape = match segments.next()? {
        "project" => Shape::Table(TableKind::Project),
        "build-system" => Shape::Table(TableKind::BuildSystem),
        "tool" => Shape::Table(TableKind::Tool),
        _ => return None,
    };

    for segment in segments {
        let schema = match shape {
            Shape::Table(kind) => *kind.schema(),
            Shape::Nested(fields) => Schema::nested(fields),
            _ => return None,
        };
        shape = *schema.field(segment)?;
    }
    Some(shape)
}

fn split_names(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Pair comma-separated names with comma-separated emails as `Name <email>`. When the counts
/// differ, names and emails are listed separately.
pub(crate) fn combine_people(names: &str, emails: &str) -> Vec<String> {
    let names = split_names(names);
    let emails = split_names(emails);

    if names.len() == emails.len() {
        names
            .iter()
            .zip(&emails)
            .map(|(name, email)| format!("{name} <{email}>"))
            .collect()
    } else {
        names
            .iter()
            .map(|name| name.to_string())
            .chain(emails.iter().map(|email| format!("<{email}>")))
            .collect()
    }
}

/// `packages = find:` and `find_packages(where="src")` name the search roots with one string;
/// `pyproject.toml` expects a list.
pub(crate) fn normalize_find(tree: &mut Tree) {
    let packages = tree
        .get_mut("tool")
        .and_then(|tool| match tool {
            Value::Map(tool) => tool.get_mut("setuptools"),
            _ => None,
        })
        .and_then(|setuptools| match setuptools {
            Value::Map(setuptools) => setuptools.get_mut("packages"),
            _ => None,
        });

    if let Some(Value::Map(packages)) = packages {
        if let Some(Value::Map(find)) = packages.get_mut("find") {
            if let Some(root) = find.get_mut("where") {
                if matches!(root, Value::String(_)) {
                    *root = Value::List(vec![root.clone()]);
                }
            }
        }
    }
}
