use crate::{ConfigurationTable, TableKind};
use indexmap::indexmap;
use pretty_assertions::assert_eq;
use pyinfer_syntax::Value;
use pyinfer_util::Diagnostics;

fn tool(entries: &[(&str, Value)]) -> ConfigurationTable {
    let mut d = Diagnostics::new();
    let mut tool = ConfigurationTable::new(TableKind::Tool);
    for (key, value) in entries {
        tool.set(key, value.clone(), &mut d).unwrap();
    }
    tool
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    )
}

#[test]
fn later_values_win() {
    let mut d = Diagnostics::new();
    let mut low = ConfigurationTable::new(TableKind::Project);
    low.update(
        &indexmap! {
            "name".to_string() => Value::from("crds"),
            "version".to_string() => Value::from("1.0"),
        },
        &mut d,
    )
    .unwrap();

    let mut high = ConfigurationTable::new(TableKind::Project);
    high.set("version", Value::from("2.0"), &mut d).unwrap();

    low.merge(&high).unwrap();
    assert_eq!(low.value("name"), Some(&Value::from("crds")));
    assert_eq!(low.value("version"), Some(&Value::from("2.0")));
    assert_eq!(low.populated_count(), 2);
}

#[test]
fn sub_tables_merge_instead_of_replacing() {
    let mut low = tool(&[(
        "setuptools",
        map(&[("zip-safe", Value::Bool(false))]),
    )]);
    let high = tool(&[
        ("setuptools", map(&[("platforms", Value::from("any"))])),
        (
            "coverage",
            map(&[("run", map(&[("branch", Value::Bool(true))]))]),
        ),
    ]);

    low.merge(&high).unwrap();

    let setuptools = low.table("setuptools").unwrap();
    assert_eq!(setuptools.value("zip-safe"), Some(&Value::Bool(false)));
    assert_eq!(
        setuptools.value("platforms"),
        Some(&Value::List(vec![Value::from("any")]))
    );
    assert_eq!(
        low.table("coverage").unwrap().to_value(),
        map(&[("run", map(&[("branch", Value::Bool(true))]))])
    );
}

#[test]
fn merging_an_empty_table_changes_nothing() {
    let mut low = tool(&[("setuptools", map(&[("zip-safe", Value::Bool(true))]))]);
    let before = low.clone();
    low.merge(&ConfigurationTable::new(TableKind::Tool)).unwrap();
    assert_eq!(low, before);
}

#[test]
fn serialize_nests_along_the_name() {
    let table = tool(&[(
        "setuptools",
        map(&[
            ("zip-safe", Value::Bool(false)),
            ("packages", map(&[("find", map(&[("where", Value::from("src"))]))])),
        ]),
    )]);

    let expected: toml::Table = toml::from_str(
        r#"
[tool.setuptools]
zip-safe = false

[tool.setuptools.packages.find]
where = "src"
"#,
    )
    .unwrap();
    assert_eq!(table.serialize(), expected);

    let reparsed: toml::Table = toml::from_str(&table.to_toml_string().unwrap()).unwrap();
    assert_eq!(reparsed, expected);
}

#[test]
fn empty_tables_are_not_serialized() {
    let tool = ConfigurationTable::new(TableKind::Tool);
    assert_eq!(tool.to_value(), map(&[]));

    let expected: toml::Table = toml::from_str("[tool]\n").unwrap();
    assert_eq!(tool.serialize(), expected);
}
