use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use pyinfer::CanonicalDocument;
use pyinfer_syntax::Value;
use pyinfer_util::{Diagnostic, Diagnostics};
use tempfile::TempDir;

const CRDS_SETUP_PY: &str = include_str!("../../pyinfer-script/tests/data/crds_setup.py");

fn project_with(files: &[(&str, &str)]) -> TempDir {
    let directory = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(directory.path().join(name), content).unwrap();
    }
    directory
}

fn infer(directory: &Path) -> (CanonicalDocument, Vec<Diagnostic>) {
    let mut diagnostics = Diagnostics::new();
    let document = CanonicalDocument::from_directory(directory, &mut diagnostics).unwrap();
    (document, diagnostics.into_vec())
}

fn expected(text: &str) -> toml::Table {
    toml::from_str(text).unwrap()
}

const SETUP_CFG: &str = r#"
[metadata]
name = example
version = attr: example.__version__
description = An example
long_description = file: README.md
author = A. Person
author_email = a@example.org
license = MIT
keywords = one, two
classifiers =
    Programming Language :: Python :: 3
    License :: OSI Approved :: MIT License
project_urls =
    Source = https://example.org/src

[options]
packages = find:
python_requires = >=3.8
install_requires =
    numpy>=1.20
    astropy
zip_safe = False

[options.packages.find]
where = src

[options.extras_require]
test =
    pytest
    pytest-cov

[options.entry_points]
console_scripts =
    example = example.cli:main

[flake8]
max_line_length = 100
exclude = .git, build

[coverage:run]
branch = True
omit =
    */tests/*

[tool:pytest]
testpaths = tests
"#;

const SETUP_CFG_TOML: &str = r#"
[project]
name = "example"
description = "An example"
readme = { file = "README.md", content-type = "text/markdown" }
requires-python = ">=3.8"
license = { file = "LICENSE", content-type = "text/plain" }
authors = [{ name = "A. Person", email = "a@example.org" }]
keywords = ["one", "two"]
classifiers = [
    "Programming Language :: Python :: 3",
    "License :: OSI Approved :: MIT License",
]
urls = { Source = "https://example.org/src" }
scripts = { example = "example.cli:main" }
dependencies = ["numpy>=1.20", "astropy"]
optional-dependencies = { test = ["pytest", "pytest-cov"] }
dynamic = ["version"]

[tool.setuptools]
zip-safe = false
dynamic = { version = { attr = "example.__version__" } }
packages = { find = { where = ["src"] } }

[tool.flake8]
max-line-length = 100
exclude = [".git", "build"]

[tool.coverage.run]
branch = true
omit = ["*/tests/*"]

[tool.pytest.ini_options]
testpaths = "tests"
"#;

#[test_log::test]
fn setup_cfg() {
    let directory = project_with(&[
        ("setup.cfg", SETUP_CFG),
        ("README.md", "# example\n"),
        ("LICENSE", "MIT License\n"),
    ]);

    let (document, diagnostics) = infer(directory.path());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(document.to_toml(), expected(SETUP_CFG_TOML));
}

#[test_log::test]
fn output_reads_back_the_same() {
    let directory = project_with(&[
        ("setup.cfg", SETUP_CFG),
        ("README.md", "# example\n"),
        ("LICENSE", "MIT License\n"),
    ]);
    let (document, _) = infer(directory.path());

    let text = document.to_toml_string().unwrap();
    let output = project_with(&[("pyproject.toml", text.as_str())]);
    let (reread, diagnostics) = infer(output.path());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(reread.to_toml(), document.to_toml());
}

#[test_log::test]
fn setup_py_with_files() {
    let directory = project_with(&[
        (
            "setup.py",
            r#"
from setuptools import setup, find_packages

setup(
    name="example",
    version="1.0",
    long_description=open("README.rst").read(),
    license="BSD",
    packages=find_packages(),
    use_scm_version=True,
)
"#,
        ),
        ("README.rst", "example\n=======\n"),
        ("LICENSE", "BSD 3-Clause License\n"),
    ]);

    let (document, diagnostics) = infer(directory.path());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        document.to_toml(),
        expected(
            r#"
[project]
name = "example"
version = "1.0"
readme = { file = "README.rst", content-type = "text/x-rst" }
license = { file = "LICENSE", content-type = "text/plain" }

[tool.setuptools.packages.find]

[tool.setuptools_scm]
"#
        )
    );
}

#[test_log::test]
fn crds() {
    let directory = project_with(&[("setup.py", CRDS_SETUP_PY), ("README.rst", "CRDS\n")]);

    let (document, diagnostics) = infer(directory.path());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        document.to_toml(),
        expected(
            r#"
[project]
name = "crds"
description = "Calibration Reference Data System,  HST/JWST/Roman reference file management"
readme = { file = "README.rst", content-type = "text/x-rst" }
requires-python = ">=3.8"
authors = [{ name = "STScI CRDS s/w developers" }]
classifiers = [
    "Intended Audience :: Science/Research",
    "License :: OSI Approved :: BSD License",
    "Programming Language :: Python :: 3",
]
dependencies = ["astropy", "numpy", "filelock", "asdf", "requests", "lxml", "parsley"]
dynamic = ["version"]

[project.urls]
homepage = "https://hst-crds.stsci.edu"
Documentation = "https://hst-crds.stsci.edu/static/users_guide/index.html"
Source = "https://github.com/spacetelescope/crds/"

[project.optional-dependencies]
jwst = ["jwst"]
submission = ["requests", "lxml", "parsley"]
test = ["lockfile", "mock", "pytest"]
docs = ["sphinx", "sphinx_rtd_theme"]

[build-system]
requires = ["setuptools_scm"]

[tool.setuptools]
provides = ["crds"]
zip-safe = false
packages = ["crds", "crds.bestrefs", "crds.hst", "crds.jwst"]
script-files = ["scripts/*"]

[tool.setuptools.package-dir]
crds = "crds"
"crds.bestrefs" = "crds/bestrefs"
"crds.hst" = "crds/hst"
"crds.jwst" = "crds/jwst"

[tool.setuptools.package-data]
"crds.hst" = ["*.dat", "*.yaml", "*.json", "tpns/*.tpn", "specs/*.rmap"]
"crds.jwst" = ["*.dat", "*.yaml", "*.json", "tpns/*.tpn", "specs/*.rmap"]

[tool.setuptools_scm]
write_to = "crds/_version.py"
"#
        )
    );
}

#[test_log::test]
fn precedence() {
    let directory = project_with(&[
        (
            "setup.py",
            r#"
from setuptools import setup
setup(name="example", version="0.1", description="from setup.py", install_requires=["numpy"])
"#,
        ),
        ("setup.cfg", "[metadata]\nname = example\nversion = 0.2\n"),
        ("pyproject.toml", "[project]\nname = \"example\"\nversion = \"0.3\"\n"),
    ]);

    let (document, diagnostics) = infer(directory.path());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let project = document.project();
    assert_eq!(project.value("version"), Some(&Value::from("0.3")));
    assert_eq!(project.value("description"), Some(&Value::from("from setup.py")));
    assert_eq!(
        project.value("dependencies"),
        Some(&Value::List(vec![Value::from("numpy")]))
    );
}

#[test_log::test]
fn file_names_are_case_insensitive() {
    let directory = project_with(&[("SETUP.CFG", "[metadata]\nname = example\n")]);
    let (document, _) = infer(directory.path());
    assert_eq!(document.project().value("name"), Some(&Value::from("example")));
}

#[test_log::test]
fn dynamic_version_from_setuptools_scm() {
    let directory = project_with(&[(
        "setup.py",
        r#"setup(name="example", use_scm_version={"write_to": "example/_version.py"})"#,
    )]);

    let (document, _) = infer(directory.path());
    assert_eq!(
        document.to_toml(),
        expected(
            r#"
[project]
name = "example"
dynamic = ["version"]

[tool.setuptools_scm]
write_to = "example/_version.py"
"#
        )
    );
}

#[test_log::test]
fn failed_source_keeps_what_was_read() {
    let directory = project_with(&[
        ("setup.cfg", "[metadata]\nname = example\n\n[options]\nzip_safe = sometimes\n"),
        ("pyproject.toml", "[project]\ndescription = \"An example\"\n"),
    ]);

    let (document, diagnostics) = infer(directory.path());
    assert_eq!(document.project().value("name"), Some(&Value::from("example")));
    assert_eq!(
        document.project().value("description"),
        Some(&Value::from("An example"))
    );

    let [Diagnostic::SourceFailed { file, error }] = diagnostics.as_slice() else {
        panic!("expected one failed source, got {diagnostics:?}");
    };
    assert!(file.ends_with("setup.cfg"), "{file}");
    assert!(
        error.starts_with("`tool.setuptools.zip-safe`: cannot read string `'sometimes'` as bool"),
        "{error}"
    );
}

#[test_log::test]
fn invalid_ini() {
    let directory = project_with(&[("setup.cfg", "name = example\n")]);

    let (document, diagnostics) = infer(directory.path());
    assert_eq!(document.to_toml(), toml::Table::new());
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::SourceFailed { .. }]
    ));
}

#[test_log::test]
fn invalid_toml_is_an_error() {
    let directory = project_with(&[("pyproject.toml", "[project\n")]);
    let mut diagnostics = Diagnostics::new();
    assert!(CanonicalDocument::from_directory(directory.path(), &mut diagnostics).is_err());
}

#[test_log::test]
fn closed_tables_reject_unknown_keys() {
    let directory = project_with(&[("pyproject.toml", "[project]\nname = \"a\"\nflavor = \"b\"\n")]);

    let (document, diagnostics) = infer(directory.path());
    assert_eq!(document.project().value("name"), Some(&Value::from("a")));
    let [Diagnostic::SourceFailed { error, .. }] = diagnostics.as_slice() else {
        panic!("expected one failed source, got {diagnostics:?}");
    };
    assert_eq!(error, "`project` table does not contain `flavor`");
}

#[test_log::test]
fn no_sources() {
    let directory = project_with(&[("README.md", "")]);
    let (document, diagnostics) = infer(directory.path());
    assert!(diagnostics.is_empty());
    assert_eq!(document.to_toml_string().unwrap(), "");
}
