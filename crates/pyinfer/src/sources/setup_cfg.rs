//! `setup.cfg` in the declarative setuptools format.
//! <https://setuptools.pypa.io/en/latest/userguide/declarative_config.html>
//!
//! `[metadata]` and `[options]` (and their dotted sub-sections) go through the key tables. Every
//! other section configures a tool: `[tool:name]`, `[name:sub]` and plain `[name]` all end up
//! under `tool`.

use indexmap::IndexMap;
use pyinfer_schema::{coerce, coerce_to_map, Shape};
use pyinfer_syntax::ini::IniSection;
use pyinfer_syntax::{parse_ini, Value};
use pyinfer_util::split::non_empty_lines;
use pyinfer_util::Diagnostics;

use crate::document::CanonicalDocument;
use crate::keys;
use crate::sources::{combine_people, declared_shape, insert_path, normalize_find, Tree};
use crate::InferResult;

/// Keywords whose single-line values are comma-separated lists.
const COMMA_SEPARATED: &[&str] = &[
    "keywords",
    "platforms",
    "classifiers",
    "provides",
    "obsoletes",
    "license_files",
    "py_modules",
    "namespace_packages",
];

/// Option sub-sections whose entries are comma-separated lists.
const COMMA_SEPARATED_SECTIONS: &[&str] = &["package_data", "exclude_package_data", "data_files"];

/// Project fields that may be read from a file (or, for the version, an attribute) at build time.
const DYNAMIC_FIELDS: &[&str] = &["version", "description", "classifiers", "dependencies"];

/// Setuptools command sections, which `pyproject.toml` keeps under `tool.distutils`.
const DISTUTILS_COMMANDS: &[&str] = &[
    "aliases",
    "bdist",
    "bdist_rpm",
    "bdist_wheel",
    "build",
    "build_ext",
    "build_py",
    "build_sphinx",
    "egg_info",
    "install",
    "sdist",
    "upload_docs",
];

fn split_line(line: &str, commas: bool) -> Vec<&str> {
    if !commas {
        return vec![line];
    }
    line.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Read an INI value for a field of the given shape.
///
/// Text meant for a table is read as `key = value` lines, and kept whole if that fails. Otherwise
/// each line is an item, and a single item collapses to a scalar.
fn ini_value(text: &str, shape: Option<&Shape>, commas: bool) -> Value {
    if let Some(shape @ (Shape::Map(_) | Shape::Nested(_) | Shape::Table(_))) = shape {
        let text = Value::from(text.trim());
        return match coerce_to_map(&text, shape) {
            Ok(entries) => Value::Map(entries),
            Err(_) => text,
        };
    }

    let commas = commas && matches!(shape, Some(Shape::List(_)));
    let mut items: Vec<Value> = non_empty_lines(text)
        .flat_map(|line| split_line(line, commas))
        .map(Value::from)
        .collect();
    match items.len() {
        0 => Value::from(""),
        1 if !commas => items.remove(0),
        _ => Value::List(items),
    }
}

fn section_map(section: &IniSection, item: Option<&Shape>, commas: bool) -> Value {
    Value::Map(
        section
            .iter()
            .map(|(key, text)| (key.clone(), ini_value(text, item, commas)))
            .collect(),
    )
}

/// Fold `{role}_email` into `{role}` as `Name <email>` entries.
fn combine_section_people(section: &mut IniSection, role: &str) {
    let emails = section
        .shift_remove(&format!("{role}_email"))
        .or_else(|| section.shift_remove(&format!("{role}-email")))
        .unwrap_or_default();
    let names = section.get(role).cloned().unwrap_or_default();

    let people = combine_people(&names, &emails);
    if !people.is_empty() {
        section.insert(role.to_string(), people.join(", "));
    }
}

/// `attr: module.attribute` or `file: path` in place of a literal value.
fn directive(text: &str) -> Option<(&'static str, &str)> {
    let text = text.trim();
    if let Some(attribute) = text.strip_prefix("attr:") {
        return Some(("attr", attribute.trim()));
    }
    if let Some(files) = text.strip_prefix("file:") {
        return Some(("file", files.trim()));
    }
    None
}

struct Translation {
    tree: Tree,
    dynamic: Vec<Value>,
}

impl Translation {
    fn keyword(&mut self, section: &str, key: &str, text: &str) {
        let key = key.replace('-', "_");
        let Some(path) = keys::lookup_in(section, &key) else {
            tracing::debug!("skipping [{section}] {key}");
            return;
        };

        if let Some(field) = path.strip_prefix("project.") {
            if DYNAMIC_FIELDS.contains(&field) {
                if let Some((kind, argument)) = directive(text) {
                    let argument = match kind {
                        "file" => Value::List(
                            argument
                                .split(',')
                                .map(str::trim)
                                .filter(|file| !file.is_empty())
                                .map(Value::from)
                                .collect(),
                        ),
                        _ => Value::from(argument),
                    };
                    insert_path(
                        &mut self.tree,
                        &format!("tool.setuptools.dynamic.{field}.{kind}"),
                        argument,
                    );
                    self.dynamic.push(Value::from(field));
                    return;
                }
            }
        }

        if key == "packages" {
            let find = match text.trim() {
                "find:" => Some(IndexMap::new()),
                "find_namespace:" => Some(IndexMap::from([(
                    "namespaces".to_string(),
                    Value::Bool(true),
                )])),
                _ => None,
            };
            if let Some(find) = find {
                insert_path(&mut self.tree, "tool.setuptools.packages.find", Value::Map(find));
                return;
            }
        }

        let shape = declared_shape(path);
        let commas = COMMA_SEPARATED.contains(&key.as_str());
        insert_path(&mut self.tree, path, ini_value(text, shape.as_ref(), commas));
    }

    fn find_options(&mut self, section: &IniSection) {
        let mut find = IndexMap::new();
        for (key, text) in section {
            let value = match key.as_str() {
                "where" | "include" | "exclude" => Value::List(
                    non_empty_lines(text)
                        .flat_map(|line| split_line(line, true))
                        .map(Value::from)
                        .collect(),
                ),
                _ => {
                    let value = Value::from(text.trim());
                    coerce(&value, &Shape::Bool).unwrap_or(value)
                }
            };
            find.insert(key.clone(), value);
        }
        insert_path(&mut self.tree, "tool.setuptools.packages.find", Value::Map(find));
    }

    /// A sub-section such as `[options.extras_require]`, holding the entries of one keyword.
    fn keyword_section(&mut self, parent: &str, key: &str, section: &IniSection) {
        let Some(path) = keys::lookup_in(parent, key) else {
            tracing::debug!("skipping section [{parent}.{key}]");
            return;
        };

        let item = match declared_shape(path) {
            Some(Shape::Map(item)) => Some(*item),
            _ => None,
        };
        let commas = COMMA_SEPARATED_SECTIONS.contains(&key);
        insert_path(&mut self.tree, path, section_map(section, item.as_ref(), commas));
    }

    fn tool_section(&mut self, path: &str, section: &IniSection) {
        let mut entries = IndexMap::new();
        for (key, text) in section {
            let mut key = key.clone();
            let mut shape = declared_shape(&format!("{path}.{key}"));
            if shape.is_none() && key.contains('_') {
                let dashed = key.replace('_', "-");
                if let Some(dashed_shape) = declared_shape(&format!("{path}.{dashed}")) {
                    key = dashed;
                    shape = Some(dashed_shape);
                }
            }
            entries.insert(key, ini_value(text, shape.as_ref(), true));
        }
        insert_path(&mut self.tree, path, Value::Map(entries));
    }
}

/// Where a section that configures a tool belongs, e.g. `coverage:run` → `tool.coverage.run`.
fn tool_path(name: &str) -> String {
    let name = name.strip_prefix("tool:").unwrap_or(name);
    match name.split_once(':') {
        Some((tool, sub)) => format!("tool.{}.{}", tool.trim(), sub.trim()),
        None if name == "pytest" => "tool.pytest.ini_options".to_string(),
        None if DISTUTILS_COMMANDS.contains(&name) => format!("tool.distutils.{name}"),
        None => format!("tool.{name}"),
    }
}

/// Translate a `setup.cfg` file.
pub fn translate(
    text: &str,
    document: &mut CanonicalDocument,
    diagnostics: &mut Diagnostics,
) -> InferResult<()> {
    let ini = parse_ini(text)?;

    let mut translation = Translation {
        tree: Tree::new(),
        dynamic: vec![],
    };
    for (name, section) in ini.sections() {
        match name.split_once('.') {
            None if matches!(name, "metadata" | "options") => {
                let mut section = section.clone();
                if name == "metadata" {
                    combine_section_people(&mut section, "author");
                    combine_section_people(&mut section, "maintainer");
                }
                for (key, text) in &section {
                    translation.keyword(name, key, text);
                }
            }
            Some(("options", "packages.find")) => translation.find_options(section),
            Some((parent @ ("metadata" | "options"), key)) => {
                translation.keyword_section(parent, key, section)
            }
            _ => translation.tool_section(&tool_path(name), section),
        }
    }

    let Translation { mut tree, dynamic } = translation;
    if !dynamic.is_empty() {
        insert_path(&mut tree, "project.dynamic", Value::List(dynamic));
    }
    normalize_find(&mut tree);

    document.update(&tree, diagnostics)
}
