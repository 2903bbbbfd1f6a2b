//! Conversions between [`Value`] and TOML values.

use indexmap::IndexMap;
use pyinfer_syntax::Value;

/// `None` has no TOML representation; it is dropped, including from lists and tables.
pub fn value_to_toml(value: &Value) -> Option<toml::Value> {
    match value {
        Value::None => None,
        Value::Bool(b) => Some(toml::Value::Boolean(*b)),
        Value::Integer(i) => Some(toml::Value::Integer(*i)),
        Value::Float(x) => Some(toml::Value::Float(*x)),
        Value::String(s) => Some(toml::Value::String(s.clone())),
        Value::List(items) => Some(toml::Value::Array(
            items.iter().filter_map(value_to_toml).collect(),
        )),
        Value::Map(map) => Some(toml::Value::Table(
            map.iter()
                .filter_map(|(key, v)| Some((key.clone(), value_to_toml(v)?)))
                .collect(),
        )),
    }
}

pub fn toml_to_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Integer(*i),
        toml::Value::Float(x) => Value::Float(*x),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Map(toml_table_to_map(table)),
    }
}

pub fn toml_table_to_map(table: &toml::Table) -> IndexMap<String, Value> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), toml_to_value(value)))
        .collect()
}
