use std::sync::LazyLock;

use pyinfer_syntax::{reconstruct, Value};
use pyinfer_util::{Diagnostic, Diagnostics};
use regex::Regex;

use crate::bindings::collect_bindings;
use crate::extract::{extract_parameters, Parameters};

static SETUP_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w])setup\s*\(").unwrap());
static SETUP_DEFINITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdef\s+setup\s*\(").unwrap());

/// Mapping parameters use `*` rather than an empty key to mean "every package".
fn rename_empty_keys(parameters: &mut Parameters) {
    for value in parameters.values_mut() {
        if let Value::Map(map) = value {
            if map.keys().any(String::is_empty) {
                *map = map
                    .drain(..)
                    .map(|(key, entry)| {
                        if key.is_empty() {
                            ("*".to_string(), entry)
                        } else {
                            (key, entry)
                        }
                    })
                    .collect();
            }
        }
    }
}

/// Recover the keyword arguments of the `setup()` call in a `setup.py` script.
///
/// The script is never executed. Top-level assignments are recorded and substituted into the
/// arguments so that values built from variables can still be decoded. If the script calls
/// `setup()` more than once, the last call wins; if it never does, the result is empty.
pub fn read_setup_py(source: &str, diagnostics: &mut Diagnostics) -> Parameters {
    let statements = reconstruct(source.lines());

    let calls: Vec<usize> = statements
        .iter()
        .enumerate()
        .filter(|(_, s)| SETUP_CALL_REGEX.is_match(s) && !SETUP_DEFINITION_REGEX.is_match(s))
        .map(|(i, _)| i)
        .collect();

    let Some(&index) = calls.last() else {
        tracing::debug!("no setup() call among {} statements", statements.len());
        return Parameters::new();
    };

    if calls.len() > 1 {
        diagnostics.push(Diagnostic::MultipleCalls {
            function: "setup".to_string(),
            count: calls.len(),
        });
    }

    let bindings = collect_bindings(&statements, Some(index));
    tracing::debug!(
        "using setup() call in statement {index} with {} bindings",
        bindings.len()
    );

    let statement = &statements[index];
    let start = SETUP_CALL_REGEX
        .find(statement)
        .map_or(0, |call| call.end());
    let end = statement
        .rfind(')')
        .filter(|end| *end >= start)
        .unwrap_or(statement.len());

    let mut parameters = extract_parameters(&statement[start..end], &bindings, diagnostics);
    rename_empty_keys(&mut parameters);
    parameters
}

#[cfg(test)]
mod test {
    use crate::setup_py::read_setup_py;
    use indexmap::indexmap;
    use pyinfer_syntax::Value;
    use pyinfer_util::{Diagnostic, Diagnostics};
    use pretty_assertions::assert_eq;

    #[test]
    fn no_call() {
        let mut diagnostics = Diagnostics::new();
        let parameters = read_setup_py("from setuptools import setup\n", &mut diagnostics);
        assert!(parameters.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn last_call_wins() {
        let source = r#"
from setuptools import setup

def setup(**kwargs):
    pass

if False:
    setup(name="first")
setuptools.setup(name="second")
"#;
        let mut diagnostics = Diagnostics::new();
        let parameters = read_setup_py(source, &mut diagnostics);
        assert_eq!(
            parameters,
            indexmap! {"name".to_string() => Value::from("second")}
        );
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::MultipleCalls {
                function: "setup".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn empty_keys_become_wildcards() {
        let source = r#"setup(package_data={"": ["*.fits"], "pkg": ["*.txt"]})"#;
        let parameters = read_setup_py(source, &mut Diagnostics::new());
        assert_eq!(
            parameters,
            indexmap! {
                "package_data".to_string() => Value::Map(indexmap! {
                    "*".to_string() => Value::List(vec![Value::from("*.fits")]),
                    "pkg".to_string() => Value::List(vec![Value::from("*.txt")]),
                }),
            }
        );
    }
}
