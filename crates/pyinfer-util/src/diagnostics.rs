//! Advisory events raised while inferring a configuration.
//!
//! None of these stop processing. They are collected in order so callers (and tests) can inspect
//! what was guessed, and each one is logged as a warning when it is recorded.

use derive_more::Display;
use itertools::Itertools;

#[derive(Clone, Debug, Display, PartialEq)]
pub enum Diagnostic {
    /// A value satisfied more than one alternative of a union; the first was used.
    #[display("multiple possible options for parsing `{key}` ({candidates} matched); using the first")]
    AmbiguousUnion { key: String, candidates: usize },

    /// A script calls the target function more than once; the last call was used.
    #[display("multiple {function}() calls found ({count}); using the last one")]
    MultipleCalls { function: String, count: usize },

    /// Several files in the project directory could back a field; the first was used.
    #[display("multiple {kind} files found: {}; using {}", candidates.iter().join(", "), candidates[0])]
    MultipleFiles { kind: String, candidates: Vec<String> },

    /// A call argument is not a literal. It is kept as raw text unless `dropped` is set.
    #[display("`{name}` is not a literal: {text}{}", if *dropped { " (dropped)" } else { "" })]
    UndecodableLiteral {
        name: String,
        text: String,
        dropped: bool,
    },

    /// A `**name` argument does not refer to a known mapping.
    #[display("cannot expand `**{name}`; it is not bound to a mapping")]
    UnresolvedSpread { name: String },

    /// A source file could not be translated completely.
    #[display("stopped reading {file}: {error}")]
    SourceFailed { file: String, error: String },
}

#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.events.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.events
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::diagnostics::{Diagnostic, Diagnostics};
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_in_order() {
        let mut d = Diagnostics::new();
        d.push(Diagnostic::MultipleCalls {
            function: "setup".into(),
            count: 2,
        });
        d.push(Diagnostic::UnresolvedSpread {
            name: "extra".into(),
        });

        assert_eq!(d.len(), 2);
        assert_eq!(
            d.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "multiple setup() calls found (2); using the last one",
                "cannot expand `**extra`; it is not bound to a mapping",
            ]
        );
    }

    #[test]
    fn multiple_files_message() {
        let diagnostic = Diagnostic::MultipleFiles {
            kind: "license".into(),
            candidates: vec!["LICENSE".into(), "LICENSE.txt".into()],
        };
        assert_eq!(
            diagnostic.to_string(),
            "multiple license files found: LICENSE, LICENSE.txt; using LICENSE"
        );
    }
}
