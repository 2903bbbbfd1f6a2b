use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;

const SETUP_CFG: &str = "[metadata]\nname = example\n\n[options]\ninstall_requires =\n    numpy\n";

fn expected() -> toml::Table {
    toml::from_str("[project]\nname = \"example\"\ndependencies = [\"numpy\"]\n").unwrap()
}

#[test]
fn prints_to_stdout() {
    let directory = tempfile::tempdir().unwrap();
    fs::write(directory.path().join("setup.cfg"), SETUP_CFG).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pyinfer"))
        .arg(directory.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed: toml::Table = toml::from_str(&String::from_utf8(output.stdout).unwrap()).unwrap();
    assert_eq!(printed, expected());
}

#[test]
fn writes_to_a_new_directory() {
    let directory = tempfile::tempdir().unwrap();
    fs::write(directory.path().join("setup.cfg"), SETUP_CFG).unwrap();
    let output_file = directory.path().join("out").join("pyproject.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_pyinfer"))
        .arg(directory.path())
        .arg("--output")
        .arg(&output_file)
        .status()
        .unwrap();
    assert!(status.success());

    let written: toml::Table = toml::from_str(&fs::read_to_string(&output_file).unwrap()).unwrap();
    assert_eq!(written, expected());
}

#[test]
fn missing_directory_fails() {
    let directory = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_pyinfer"))
        .arg(directory.path().join("nothing"))
        .status()
        .unwrap();
    assert!(!status.success());
}
