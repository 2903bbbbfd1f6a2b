//! PEP 621 project metadata.
//! <https://packaging.python.org/en/latest/specifications/pyproject-toml/>
//!
//! Several fields accept shorthand that legacy build files use: comma-separated author strings,
//! license and readme fields naming a file, and INI blocks of extras and entry points.

use std::path::Path;

use indexmap::IndexMap;
use pyinfer_syntax::Value;
use pyinfer_util::split::split_filter_empty;
use pyinfer_util::{Diagnostic, Diagnostics};

use crate::coerce::coerce_entries;
use crate::errors::TableError;
use crate::shape::{Field, Schema, Shape, TableKind};
use crate::table::ConfigurationTable;
use crate::tables::{STRINGS, STRINGS_MAP, STRING_MAP};
use crate::TableResult;

const PEOPLE: Shape = Shape::List(&STRING_MAP);
const ENTRY_POINTS: Shape = Shape::Map(&STRING_MAP);

const FIELDS: &[Field] = &[
    ("name", Shape::Str),
    ("version", Shape::Str),
    ("description", Shape::Str),
    ("readme", Shape::Union(&[STRING_MAP, Shape::Str])),
    ("requires-python", Shape::Str),
    ("license", Shape::Union(&[STRING_MAP, Shape::Str])),
    ("license-files", STRINGS),
    ("authors", PEOPLE),
    ("maintainers", PEOPLE),
    ("keywords", STRINGS),
    ("classifiers", STRINGS),
    ("urls", STRING_MAP),
    ("scripts", STRING_MAP),
    ("gui-scripts", STRING_MAP),
    ("entry-points", ENTRY_POINTS),
    ("dependencies", STRINGS),
    ("optional-dependencies", STRINGS_MAP),
    ("dynamic", STRINGS),
];

pub static SCHEMA: Schema = Schema {
    name: "project",
    fields: FIELDS,
    closed: true,
    placeholdered: true,
    kind: Some(TableKind::Project),
};

/// Entry point groups that have fields of their own.
const SCRIPT_GROUPS: &[(&str, &str)] = &[
    ("console_scripts", "scripts"),
    ("gui_scripts", "gui-scripts"),
];

/// Names of the regular files in `directory`, sorted.
fn list_files(directory: Option<&Path>) -> Vec<String> {
    let Some(directory) = directory else {
        return vec![];
    };

    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::debug!("cannot list {}: {error}", directory.display());
            return vec![];
        }
    };

    let mut ret: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    ret.sort();
    ret
}

/// The file named `name`, or else the first file whose name contains `kind`.
fn find_file(
    files: &[String],
    name: &str,
    kind: &str,
    diagnostics: &mut Diagnostics,
) -> Option<(String, bool)> {
    if files.iter().any(|file| file == name) {
        return Some((name.to_string(), true));
    }

    let candidates: Vec<String> = files
        .iter()
        .filter(|file| file.to_lowercase().contains(kind))
        .cloned()
        .collect();
    if candidates.len() > 1 {
        diagnostics.push(Diagnostic::MultipleFiles {
            kind: kind.to_string(),
            candidates: candidates.clone(),
        });
    }
    candidates.into_iter().next().map(|file| (file, false))
}

fn string_map<const N: usize>(entries: [(&str, String); N]) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect(),
    )
}

/// `Name <email>` becomes `{name, email}`; either part may be missing.
fn parse_person(text: &str) -> Option<Value> {
    let (name, email) = match text.split_once('<') {
        Some((name, rest)) => (name, rest.split('>').next()),
        None if text.contains('@') && !text.trim().contains(char::is_whitespace) => {
            ("", Some(text))
        }
        None => (text, None),
    };

    let mut ret = IndexMap::new();
    let name = name.trim();
    if !name.is_empty() {
        ret.insert("name".to_string(), Value::from(name));
    }
    if let Some(email) = email.map(str::trim).filter(|email| !email.is_empty()) {
        ret.insert("email".to_string(), Value::from(email));
    }
    (!ret.is_empty()).then_some(Value::Map(ret))
}

fn people(value: Value) -> Value {
    let split = |text: &str| -> Vec<Value> {
        split_filter_empty(text, ",")
            .filter_map(parse_person)
            .collect()
    };
    match value {
        Value::String(text) => Value::List(split(&text)),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .flat_map(|item| match item {
                    Value::String(text) => split(&text),
                    other => vec![other],
                })
                .collect(),
        ),
        other => other,
    }
}

fn license(value: Value, directory: Option<&Path>, diagnostics: &mut Diagnostics) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    let files = list_files(directory);
    match find_file(&files, text.trim(), "license", diagnostics) {
        Some((file, true)) => string_map([("file", file)]),
        Some((file, false)) => string_map([
            ("file", file),
            ("content-type", "text/plain".to_string()),
        ]),
        None => {
            tracing::debug!("no license file found for `{text}`");
            Value::None
        }
    }
}

fn readme_content_type(file: &str) -> &'static str {
    if file.to_lowercase().ends_with(".md") {
        "text/markdown"
    } else {
        "text/x-rst"
    }
}

fn readme(value: Value, directory: Option<&Path>, diagnostics: &mut Diagnostics) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    let text = text.trim();
    let text = text.strip_prefix("file:").map_or(text, str::trim);
    let files = list_files(directory);
    match find_file(&files, text, "readme", diagnostics) {
        Some((file, _)) => {
            let content_type = readme_content_type(&file).to_string();
            string_map([("file", file), ("content-type", content_type)])
        }
        None => string_map([
            ("text", text.to_string()),
            ("content-type", "text/plain".to_string()),
        ]),
    }
}

fn entries(
    table: &ConfigurationTable,
    key: &str,
    value: &Value,
    item: &Shape,
    shape: &Shape,
) -> TableResult<IndexMap<String, Value>> {
    coerce_entries(value, item, shape).map_err(|source| TableError::Coercion {
        table: table.name().to_string(),
        key: key.to_string(),
        source,
    })
}

/// Set a project field, expanding the shorthand forms that legacy build files use.
pub(crate) fn set_field(
    table: &mut ConfigurationTable,
    key: &str,
    value: Value,
    diagnostics: &mut Diagnostics,
) -> TableResult<()> {
    let Some(shape) = SCHEMA.field(key).copied() else {
        return Err(TableError::KeyNotInSchema {
            table: table.name().to_string(),
            key: key.to_string(),
        });
    };

    let value = match key {
        "authors" | "maintainers" => people(value),
        "license" => license(value, table.directory(), diagnostics),
        "readme" => readme(value, table.directory(), diagnostics),
        "optional-dependencies" => {
            let extras = entries(table, key, &value, &STRINGS, &shape)?;
            Value::Map(
                extras
                    .into_iter()
                    .map(|(extra, requirements)| {
                        let requirements = match requirements {
                            Value::List(items) => {
                                items.into_iter().filter(|item| !item.is_empty()).collect()
                            }
                            other => vec![other],
                        };
                        (extra, Value::List(requirements))
                    })
                    .collect(),
            )
        }
        "entry-points" => {
            let mut groups = entries(table, key, &value, &STRING_MAP, &shape)?;
            for (group, field) in SCRIPT_GROUPS {
                if let Some(scripts) = groups.shift_remove(*group) {
                    table.set_shaped(field, STRING_MAP, scripts, diagnostics)?;
                }
            }
            if groups.is_empty() {
                return Ok(());
            }
            Value::Map(groups)
        }
        _ => value,
    };

    if value.is_none() {
        return table.set_absent(key);
    }
    table.set_shaped(key, shape, value, diagnostics)
}
