use indexmap::IndexMap;
use pyinfer_script::{read_setup_py, Parameters};
use pyinfer_syntax::Value;
use pyinfer_util::Diagnostics;

use crate::document::CanonicalDocument;
use crate::keys;
use crate::sources::{self, insert_path, normalize_find, Tree};
use crate::InferResult;

/// Fold `{role}_email` into `{role}`, giving a list of `Name <email>` strings.
fn combine_people(parameters: &mut Parameters, role: &str) {
    let email = parameters.shift_remove(&format!("{role}_email"));
    let emails = match &email {
        Some(Value::String(text)) => text.as_str(),
        _ => "",
    };
    let names = match parameters.get(role) {
        Some(Value::String(text)) => text.clone(),
        Some(_) => return,
        None => String::new(),
    };

    let people = sources::combine_people(&names, emails);
    if !people.is_empty() {
        let people = people.into_iter().map(Value::String).collect();
        parameters.insert(role.to_string(), Value::List(people));
    }
}

/// `data_files` is a list of `(directory, [files])` pairs; `pyproject.toml` wants a table.
fn data_files_table(value: Value) -> Value {
    let Value::List(pairs) = &value else {
        return value;
    };

    let mut ret = IndexMap::new();
    for pair in pairs {
        match pair.as_list() {
            Some([Value::String(directory), files]) => {
                ret.insert(directory.clone(), files.clone());
            }
            _ => return value,
        }
    }
    Value::Map(ret)
}

/// Translate the keyword arguments of the `setup()` call in a `setup.py` script.
pub fn translate(
    text: &str,
    document: &mut CanonicalDocument,
    diagnostics: &mut Diagnostics,
) -> InferResult<()> {
    let mut parameters = read_setup_py(text, diagnostics);
    combine_people(&mut parameters, "author");
    combine_people(&mut parameters, "maintainer");
    let scm_version = parameters.shift_remove("use_scm_version");

    let mut tree = Tree::new();
    for (key, value) in parameters {
        let Some(path) = keys::lookup(&key) else {
            tracing::debug!("skipping setup() argument `{key}`");
            continue;
        };
        let value = match key.as_str() {
            "data_files" => data_files_table(value),
            _ => value,
        };
        insert_path(&mut tree, path, value);
    }
    normalize_find(&mut tree);

    let scm_options = match scm_version {
        Some(options @ Value::Map(_)) => Some(options),
        Some(Value::Bool(true)) => Some(Value::Map(IndexMap::new())),
        Some(other) => {
            tracing::debug!("ignoring use_scm_version={other}");
            None
        }
        None => None,
    };

    let has_version = matches!(
        tree.get("project"),
        Some(Value::Map(project)) if project.contains_key("version")
    );
    if scm_options.is_some() && !has_version {
        insert_path(
            &mut tree,
            "project.dynamic",
            Value::List(vec![Value::from("version")]),
        );
    }

    document.update(&tree, diagnostics)?;
    if let Some(options) = scm_options {
        // Set directly, since an empty table still selects setuptools_scm's defaults
        document.set("tool.setuptools_scm", options, diagnostics)?;
    }
    Ok(())
}
