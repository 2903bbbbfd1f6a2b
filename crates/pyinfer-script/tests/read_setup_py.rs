use indexmap::{indexmap, IndexMap};
use pyinfer_script::read_setup_py;
use pyinfer_syntax::{reconstruct, Value};
use pyinfer_util::Diagnostics;
use pretty_assertions::assert_eq;

const CRDS_SETUP_PY: &str = include_str!("data/crds_setup.py");

fn strings(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::from(*s)).collect())
}

fn map(entries: IndexMap<&str, Value>) -> Value {
    Value::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

#[test_log::test]
fn crds_statements() {
    let statements = reconstruct(CRDS_SETUP_PY.lines());
    assert_eq!(
        &statements[..6],
        &[
            "import sys",
            "import glob",
            "from distutils.core import setup",
            "import setuptools",
            r#"STD_MISSION_FILES = [ "*.dat", "*.yaml", "*.json", "tpns/*.tpn", "specs/*.rmap", ]"#,
            r#"setup_pars = { "packages": [ "crds", "crds.bestrefs", "crds.hst", "crds.jwst", ], "package_dir": { "crds": "crds", "crds.bestrefs": "crds/bestrefs", "crds.hst": "crds/hst", "crds.jwst": "crds/jwst", }, "package_data": { "crds.hst": STD_MISSION_FILES, "crds.jwst": STD_MISSION_FILES, }, "scripts": glob.glob("scripts/*"), }"#,
        ]
    );
    assert_eq!(statements.len(), 9);
    assert!(statements[8].starts_with(r#"setup( name="crds", provides=["crds"],"#));
    assert!(statements[8].ends_with("**setup_pars)"));
}

#[test_log::test]
fn crds_parameters() {
    let mut diagnostics = Diagnostics::new();
    let parameters = read_setup_py(CRDS_SETUP_PY, &mut diagnostics);
    assert!(diagnostics.is_empty());

    let mission_files = strings(&["*.dat", "*.yaml", "*.json", "tpns/*.tpn", "specs/*.rmap"]);
    let test_deps = strings(&["lockfile", "mock", "pytest"]);
    let expected = indexmap! {
        "name" => Value::from("crds"),
        "provides" => strings(&["crds"]),
        "use_scm_version" => map(indexmap! {"write_to" => Value::from("crds/_version.py")}),
        "description" => Value::from(
            "Calibration Reference Data System,  HST/JWST/Roman reference file management"
        ),
        "long_description" => Value::from("README.rst"),
        "author" => Value::from("STScI CRDS s/w developers"),
        "url" => Value::from("https://hst-crds.stsci.edu"),
        "license" => Value::from("BSD"),
        "python_requires" => Value::from(">=3.8"),
        "setup_requires" => strings(&["setuptools_scm"]),
        "install_requires" => strings(&[
            "astropy", "numpy", "filelock", "asdf", "requests", "lxml", "parsley",
        ]),
        "extras_require" => map(indexmap! {
            "jwst" => strings(&["jwst"]),
            "submission" => strings(&["requests", "lxml", "parsley"]),
            "test" => test_deps.clone(),
            "docs" => strings(&["sphinx", "sphinx_rtd_theme"]),
        }),
        "tests_require" => test_deps,
        "zip_safe" => Value::Bool(false),
        "classifiers" => strings(&[
            "Intended Audience :: Science/Research",
            "License :: OSI Approved :: BSD License",
            "Programming Language :: Python :: 3",
        ]),
        "project_urls" => map(indexmap! {
            "Documentation" => Value::from("https://hst-crds.stsci.edu/static/users_guide/index.html"),
            "Source" => Value::from("https://github.com/spacetelescope/crds/"),
        }),
        "packages" => strings(&["crds", "crds.bestrefs", "crds.hst", "crds.jwst"]),
        "package_dir" => map(indexmap! {
            "crds" => Value::from("crds"),
            "crds.bestrefs" => Value::from("crds/bestrefs"),
            "crds.hst" => Value::from("crds/hst"),
            "crds.jwst" => Value::from("crds/jwst"),
        }),
        "package_data" => map(indexmap! {
            "crds.hst" => mission_files.clone(),
            "crds.jwst" => mission_files,
        }),
        "scripts" => Value::from("scripts/*"),
    };

    assert_eq!(
        parameters.keys().map(String::as_str).collect::<Vec<_>>(),
        expected.keys().copied().collect::<Vec<_>>()
    );
    for (key, value) in expected {
        assert_eq!(parameters.get(key), Some(&value), "{key}");
    }
}
