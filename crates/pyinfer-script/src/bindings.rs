//! Top-level variable assignments of a script, recorded so that later expressions referring to
//! them can be decoded as literals.

use std::borrow::Cow;
use std::sync::LazyLock;

use indexmap::IndexMap;
use pyinfer_syntax::{decode_literal, Value};
use pyinfer_util::split::{quoted_segments, QuoteState};
use regex::Regex;

static ASSIGNMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*=([^=].*)$").unwrap());
static GLOB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"glob\.glob\(([^()]*)\)").unwrap());
static LIST_CONCAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\s*\+\s*\[").unwrap());
static MAP_CONCAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*\+\s*\*\*\{").unwrap());
static LEADING_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\[{])\s*,").unwrap());
static DOUBLE_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*,").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Decoded(Value),
    /// Text that is not a literal even after substitution
    Raw(String),
}

impl Binding {
    fn substitution(&self) -> Cow<'_, str> {
        match self {
            Binding::Decoded(value) => Cow::Owned(value.to_string()),
            Binding::Raw(text) => Cow::Borrowed(text),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Binding::Decoded(value) => Some(value),
            Binding::Raw(_) => None,
        }
    }
}

/// Apply `regex` to the parts of `text` outside string literals.
fn replace_unquoted(text: &str, regex: &Regex, replacement: &str) -> String {
    quoted_segments(text)
        .into_iter()
        .map(|(quoted, segment)| match quoted {
            true => Cow::Borrowed(segment),
            false => regex.replace_all(segment, replacement),
        })
        .collect()
}

/// Rewrite `[a] + [b]` as `[a, b]` and `{a} + **{b}` as `{a, b}`. String contents are left as
/// they are.
pub fn normalize_concatenation(text: &str) -> String {
    let text = replace_unquoted(text, &LIST_CONCAT_REGEX, ",");
    let text = replace_unquoted(&text, &MAP_CONCAT_REGEX, ",");
    // Concatenating an empty collection leaves a separator with nothing before it
    let text = replace_unquoted(&text, &LEADING_SEPARATOR_REGEX, "$1");
    replace_unquoted(&text, &DOUBLE_SEPARATOR_REGEX, ",")
}

/// Replace `glob.glob(ARG)` with `ARG`. The pattern is kept, not expanded.
pub fn expand_globs(text: &str) -> String {
    GLOB_REGEX.replace_all(text, "$1").into_owned()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    bindings: IndexMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    /// Replace every bound name in `text` with its value.
    ///
    /// Only whole identifiers outside string literals are replaced. Attribute names (`os.path`)
    /// and keyword argument names (`name=`) are left alone.
    pub fn substitute(&self, text: &str) -> String {
        if self.bindings.is_empty() {
            return text.to_string();
        }

        let mut ret = String::with_capacity(text.len());
        let mut state = QuoteState::default();
        let mut prev: Option<char> = None;
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            let quoted = state.feed(c);
            let continues_word = prev.is_some_and(|p| p.is_alphanumeric() || p == '_' || p == '.');
            if quoted || continues_word || !(c.is_alphabetic() || c == '_') {
                ret.push(c);
                prev = Some(c);
                continue;
            }

            let mut end = start + c.len_utf8();
            while let Some(&(i, n)) = chars.peek() {
                if !(n.is_alphanumeric() || n == '_') {
                    break;
                }
                end = i + n.len_utf8();
                chars.next();
            }

            let name = &text[start..end];
            let rest = text[end..].trim_start();
            let is_keyword = rest.starts_with('=') && !rest.starts_with("==");
            match self.bindings.get(name) {
                Some(binding) if !is_keyword => ret.push_str(&binding.substitution()),
                _ => ret.push_str(name),
            }
            prev = name.chars().last();
        }

        ret
    }

    /// Substitute known names into `text` and decode the result, falling back to raw text.
    pub fn resolve(&self, text: &str) -> Binding {
        let text = normalize_concatenation(&expand_globs(&self.substitute(text)));
        let text = text.trim();
        match decode_literal(text) {
            Ok(value) => Binding::Decoded(value),
            Err(_) => Binding::Raw(text.to_string()),
        }
    }
}

/// Record the top-level assignments among `statements`, in source order, skipping the statement
/// at `excluding`. Later assignments to the same name replace earlier ones.
pub fn collect_bindings(statements: &[String], excluding: Option<usize>) -> Bindings {
    let mut bindings = Bindings::new();
    for (index, statement) in statements.iter().enumerate() {
        if Some(index) == excluding {
            continue;
        }

        let Some(captures) = ASSIGNMENT_REGEX.captures(statement) else {
            continue;
        };
        let binding = bindings.resolve(&captures[2]);
        tracing::trace!("binding {} = {:?}", &captures[1], binding);
        bindings.insert(&captures[1], binding);
    }
    bindings
}
