//! <https://docs.astral.sh/ruff/settings/>

use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::{STRINGS, STRING_MAP};

const FLAKE8_ANNOTATIONS: &[Field] = &[
    ("allow-star-arg-any", Shape::Bool),
    ("mypy-init-return", Shape::Bool),
    ("suppress-dummy-args", Shape::Bool),
    ("suppress-none-returning", Shape::Bool),
];

const FLAKE8_BANDIT: &[Field] = &[
    ("hardcoded-tmp-directory", STRINGS),
    ("hardcoded-tmp-directory-extend", STRINGS),
];

const FLAKE8_BUGBEAR: &[Field] = &[("extend-immutable-calls", STRINGS)];

const FLAKE8_ERRMSG: &[Field] = &[("max-string-length", Shape::Int)];

const FLAKE8_IMPORT_CONVENTIONS: &[Field] = &[("aliases", STRING_MAP), ("extend-aliases", STRING_MAP)];

const FLAKE8_PYTEST_STYLE: &[Field] = &[
    ("fixture-parentheses", Shape::Bool),
    ("mark-parentheses", Shape::Bool),
    ("parametrize-names-type", Shape::Str),
    ("parametrize-values-row-type", Shape::Str),
    ("parametrize-values-type", Shape::Str),
    ("raises-extend-require-match-for", STRINGS),
    ("raises-require-match-for", STRINGS),
];

const FLAKE8_QUOTES: &[Field] = &[
    ("avoid-escape", Shape::Bool),
    ("docstring-quotes", Shape::Str),
    ("inline-quotes", Shape::Str),
    ("multiline-quotes", Shape::Str),
];

const FLAKE8_TIDY_IMPORTS: &[Field] = &[
    ("ban-relative-imports", Shape::Str),
    ("banned-api", STRING_MAP),
];

const FLAKE8_UNUSED_ARGUMENTS: &[Field] = &[("ignore-variadic-names", Shape::Bool)];

const ISORT: &[Field] = &[
    ("classes", STRINGS),
    ("combine-as-imports", Shape::Bool),
    ("constants", STRINGS),
    ("extra-standard-library", STRINGS),
    ("force-single-line", Shape::Bool),
    ("force-sort-within-sections", Shape::Bool),
    ("force-wrap-aliases", Shape::Bool),
    ("known-first-party", STRINGS),
    ("known-third-party", STRINGS),
    ("no-lines-before", STRINGS),
    ("order-by-type", Shape::Bool),
    ("relative-imports-order", Shape::Str),
    ("required-imports", STRINGS),
    ("single-line-exclusions", STRINGS),
    ("split-on-trailing-comma", Shape::Bool),
    ("variables", STRINGS),
];

const MCCABE: &[Field] = &[("max-complexity", Shape::Int)];

const PEP8_NAMING: &[Field] = &[
    ("classmethod-decorators", STRINGS),
    ("ignore-names", STRINGS),
    ("staticmethod-decorators", STRINGS),
];

const PYCODESTYLE: &[Field] = &[
    ("ignore-overlong-task-comments", Shape::Bool),
    ("max-doc-length", Shape::Int),
];

const PYDOCSTYLE: &[Field] = &[("convention", Shape::Str)];

const PYUPGRADE: &[Field] = &[("keep-runtime-typing", Shape::Bool)];

const FIELDS: &[Field] = &[
    ("allowed-confusables", STRINGS),
    ("builtins", STRINGS),
    ("cache-dir", Shape::Str),
    ("dummy-variable-rgx", Shape::Str),
    ("exclude", STRINGS),
    ("extend", Shape::Str),
    ("extend-exclude", STRINGS),
    ("extend-ignore", STRINGS),
    ("extend-select", STRINGS),
    ("external", STRINGS),
    ("fix", Shape::Bool),
    ("fix-only", Shape::Bool),
    ("fixable", STRINGS),
    ("force-exclude", Shape::Bool),
    ("format", Shape::Str),
    ("ignore", STRINGS),
    ("ignore-init-module-imports", Shape::Bool),
    ("line-length", Shape::Int),
    ("namespace-packages", STRINGS),
    ("per-file-ignores", Shape::Map(&STRINGS)),
    ("required-version", Shape::Str),
    ("respect-gitignore", Shape::Bool),
    ("select", STRINGS),
    ("show-source", Shape::Bool),
    ("src", Shape::List(&Shape::Path)),
    ("target-version", Shape::Str),
    ("task-tags", STRINGS),
    ("typing-modules", STRINGS),
    ("unfixable", STRINGS),
    ("update-check", Shape::Bool),
    ("flake8-annotations", Shape::Nested(FLAKE8_ANNOTATIONS)),
    ("flake8-bandit", Shape::Nested(FLAKE8_BANDIT)),
    ("flake8-bugbear", Shape::Nested(FLAKE8_BUGBEAR)),
    ("flake8-errmsg", Shape::Nested(FLAKE8_ERRMSG)),
    ("flake8-import-conventions", Shape::Nested(FLAKE8_IMPORT_CONVENTIONS)),
    ("flake8-pytest-style", Shape::Nested(FLAKE8_PYTEST_STYLE)),
    ("flake8-quotes", Shape::Nested(FLAKE8_QUOTES)),
    ("flake8-tidy-imports", Shape::Nested(FLAKE8_TIDY_IMPORTS)),
    ("flake8-unused-arguments", Shape::Nested(FLAKE8_UNUSED_ARGUMENTS)),
    ("isort", Shape::Nested(ISORT)),
    ("mccabe", Shape::Nested(MCCABE)),
    ("pep8-naming", Shape::Nested(PEP8_NAMING)),
    ("pycodestyle", Shape::Nested(PYCODESTYLE)),
    ("pydocstyle", Shape::Nested(PYDOCSTYLE)),
    ("pyupgrade", Shape::Nested(PYUPGRADE)),
];

pub static SCHEMA: Schema = Schema {
    name: "tool.ruff",
    fields: FIELDS,
    closed: false,
    placeholdered: true,
    kind: Some(TableKind::Ruff),
};
