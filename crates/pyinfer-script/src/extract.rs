//! Recovers keyword arguments from the text between a call's parentheses.

use std::sync::LazyLock;

use indexmap::IndexMap;
use pyinfer_syntax::{decode_literal, Value};
use pyinfer_util::split::{bracket_balance, ends_in_quotes, split_top_level};
use pyinfer_util::{Diagnostic, Diagnostics};
use regex::{Captures, Regex};

use crate::bindings::{normalize_concatenation, Binding, Bindings};

pub type Parameters = IndexMap<String, Value>;

static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.+?=[^=]+),").unwrap());
static KEYWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z_]\w*\s*=[^=]").unwrap());
static OPEN_READ_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\w+\.)*open\((.+?)\)\.read\(\)").unwrap());

/// Split the argument text into `name=value` fragments.
///
/// The split is a heuristic: a fragment ends at the last comma before the next `=`. Fragments
/// that were cut inside a string or a bracketed value are joined back onto their predecessor.
fn split_fragments(text: &str) -> Vec<String> {
    let mut fragments: Vec<String> = FRAGMENT_REGEX
        .captures_iter(text)
        .map(|captures| captures[1].to_string())
        .collect();

    let mut index = 1;
    while index < fragments.len() {
        let fragment = &fragments[index];
        let broken = fragment.trim_start().starts_with(['"', '\''])
            || !KEYWORD_REGEX.is_match(fragment)
            || ends_in_quotes(&fragments[index - 1])
            || bracket_balance(&fragments[index - 1]) > 0;

        if broken {
            let fragment = fragments.remove(index);
            fragments[index - 1].push(',');
            fragments[index - 1].push_str(&fragment);
        } else {
            index += 1;
        }
    }

    fragments
}

/// `open(PATH, ...).read()` becomes `PATH`.
fn resolve_file_reads(text: &str) -> String {
    OPEN_READ_REGEX
        .replace_all(text, |captures: &Captures| {
            split_top_level(&captures[1], ',')
                .first()
                .map(|path| path.trim().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

/// `find_packages(ARGS)` becomes `{"find": {ARGS}}`.
fn discover_packages(text: &str, bindings: &Bindings, diagnostics: &mut Diagnostics) -> Option<Value> {
    let (namespaces, rest) = match text.split_once("find_namespace_packages(") {
        Some((_, rest)) => (true, rest),
        None => (false, text.split_once("find_packages(")?.1),
    };
    let arguments = rest.rsplit_once(')').map_or(rest, |(arguments, _)| arguments);

    let mut find = extract_parameters(arguments, bindings, diagnostics);
    if namespaces {
        find.insert("namespaces".to_string(), Value::Bool(true));
    }

    let mut ret = IndexMap::new();
    ret.insert("find".to_string(), Value::Map(find));
    Some(Value::Map(ret))
}

fn resolve_value(
    name: &str,
    text: &str,
    bindings: &Bindings,
    diagnostics: &mut Diagnostics,
) -> Option<Value> {
    let text = normalize_concatenation(&resolve_file_reads(&bindings.substitute(text)));
    let text = text.trim().trim_end_matches(',').trim_end();

    match decode_literal(text) {
        Ok(value) => Some(value),
        Err(error) => {
            if let Some(packages) = discover_packages(text, bindings, diagnostics) {
                return Some(packages);
            }

            tracing::debug!("`{name}` did not decode: {error}");
            let dropped = name == "version";
            diagnostics.push(Diagnostic::UndecodableLiteral {
                name: name.to_string(),
                text: text.to_string(),
                dropped,
            });
            (!dropped).then(|| Value::String(text.to_string()))
        }
    }
}

/// Recover the keyword arguments of a call from the text between its parentheses.
///
/// Explicit keyword arguments come first, in source order, followed by the entries of every
/// `**name` spread, so a spread can override an explicit keyword.
pub fn extract_parameters(
    arguments: &str,
    bindings: &Bindings,
    diagnostics: &mut Diagnostics,
) -> Parameters {
    let mut spreads = vec![];
    let mut keywords = vec![];
    for fragment in split_top_level(arguments, ',') {
        match fragment.trim().strip_prefix("**") {
            Some(name) => spreads.push(name.trim().to_string()),
            None => keywords.push(fragment),
        }
    }

    let mut text = keywords.join(",").trim().to_string();
    if !text.ends_with(',') {
        text.push(',');
    }

    let mut parameters = Parameters::new();
    for fragment in split_fragments(&text) {
        let Some((name, value)) = fragment.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if let Some(value) = resolve_value(name, value, bindings, diagnostics) {
            parameters.insert(name.to_string(), value);
        }
    }

    for name in spreads {
        match bindings.get(&name) {
            Some(Binding::Decoded(Value::Map(map))) => {
                parameters.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            _ => diagnostics.push(Diagnostic::UnresolvedSpread { name }),
        }
    }

    parameters
}
