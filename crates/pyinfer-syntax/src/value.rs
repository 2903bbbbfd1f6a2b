use std::fmt;
use std::fmt::{Display, Formatter, Write};

use derive_more::{From, TryInto};
use indexmap::IndexMap;
use itertools::Itertools;

/// A decoded Python literal, or a value destined for a TOML document.
///
/// Tuples and sets decode to [`Value::List`]. Mapping keys are always strings.
#[derive(Clone, Debug, PartialEq, From, TryInto)]
#[try_into(owned, ref)]
pub enum Value {
    #[from(ignore)]
    #[try_into(ignore)]
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    #[try_into(ignore)]
    List(Vec<Value>),
    #[try_into(ignore)]
    Map(IndexMap<String, Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// `None`, or a string, list or map without content.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::None => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Bool(_) | Value::Integer(_) | Value::Float(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Render the way this value would be written as a key of a Python dict literal.
    pub fn to_key(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::List(_) | Value::Map(_) => None,
            other => Some(other.to_string()),
        }
    }
}

pub fn write_python_string(f: &mut impl Write, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Formats the value as Python source that decodes back to the same value.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write_python_string(f, s),
            Value::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Value::Map(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_python_string(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::value::Value;
    use indexmap::indexmap;
    use pretty_assertions::assert_eq;

    #[test]
    fn python_repr() {
        let value = Value::Map(indexmap! {
            "name".to_string() => Value::from("crds"),
            "zip_safe".to_string() => Value::Bool(false),
            "n".to_string() => Value::List(vec![Value::Integer(1), Value::Float(2.5), Value::None]),
        });
        assert_eq!(
            value.to_string(),
            "{'name': 'crds', 'zip_safe': False, 'n': [1, 2.5, None]}"
        );
    }

    #[test]
    fn string_quoting() {
        assert_eq!(Value::from("it's").to_string(), r#""it's""#);
        assert_eq!(Value::from(r#"both ' and ""#).to_string(), r#"'both \' and "'"#);
        assert_eq!(Value::from("a\nb\\").to_string(), r"'a\nb\\'");
    }

    #[test]
    fn emptiness() {
        assert!(Value::None.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Integer(0).is_empty());
    }

    #[test]
    fn try_into_scalars() {
        let value = Value::from("x");
        assert_eq!(<&String>::try_from(&value).ok(), Some(&"x".to_string()));
        assert!(bool::try_from(value).is_err());
    }
}
