//! Conversion of raw values into the shape declared for a field.
//!
//! Values arrive from three very different sources: TOML gives typed values, INI gives plain
//! (often multi-line) strings, and `setup.py` gives decoded Python literals. Coercion accepts all of
//! these and produces the single representation the shape calls for.

use indexmap::IndexMap;
use pyinfer_syntax::{decode_literal, Value};
use pyinfer_util::split::non_empty_lines;

use crate::errors::CoercionError;
use crate::shape::Shape;

fn mismatch(value: &Value, shape: &Shape) -> CoercionError {
    CoercionError {
        expected: shape.to_string(),
        found: value.type_name(),
        value: value.to_string(),
    }
}

fn coerce_str(value: &Value, shape: &Shape) -> Result<Value, CoercionError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) => Ok(Value::String(value.to_string())),
        _ => Err(mismatch(value, shape)),
    }
}

fn coerce_int(value: &Value, shape: &Shape) -> Result<Value, CoercionError> {
    match value {
        Value::Integer(_) => Ok(value.clone()),
        Value::Float(x) if x.fract() == 0.0 && x.abs() < i64::MAX as f64 => {
            Ok(Value::Integer(*x as i64))
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| mismatch(value, shape)),
        _ => Err(mismatch(value, shape)),
    }
}

fn coerce_float(value: &Value, shape: &Shape) -> Result<Value, CoercionError> {
    match value {
        Value::Float(_) => Ok(value.clone()),
        Value::Integer(i) => Ok(Value::Float(*i as f64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| mismatch(value, shape)),
        _ => Err(mismatch(value, shape)),
    }
}

fn coerce_bool(value: &Value, shape: &Shape) -> Result<Value, CoercionError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::Integer(0) => Ok(Value::Bool(false)),
        Value::Integer(1) => Ok(Value::Bool(true)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(mismatch(value, shape)),
        },
        _ => Err(mismatch(value, shape)),
    }
}

fn coerce_list(value: &Value, item: &Shape, shape: &Shape) -> Result<Value, CoercionError> {
    let items = match value {
        Value::List(items) => items
            .iter()
            .map(|v| coerce(v, item))
            .collect::<Result<Vec<_>, _>>()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with(['[', '(']) {
                if let Ok(decoded) = decode_literal(trimmed) {
                    return coerce_list(&decoded, item, shape);
                }
            }

            if s.contains('\n') {
                non_empty_lines(s)
                    .map(|line| coerce(&Value::from(line.trim()), item))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                vec![coerce(value, item)?]
            }
        }
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) => vec![coerce(value, item)?],
        Value::None | Value::Map(_) => return Err(mismatch(value, shape)),
    };
    Ok(Value::List(items))
}

/// Lines of `key = value` (or `key: value`).
fn parse_assignment_block(text: &str) -> Option<IndexMap<String, Value>> {
    non_empty_lines(text)
        .map(|line| {
            let (key, value) = line.split_once('=').or_else(|| line.split_once(':'))?;
            Some((key.trim().to_string(), Value::from(value.trim())))
        })
        .collect()
}

/// Coerce to a map whose values have shape `item`. `shape` only names the expectation in errors.
pub fn coerce_entries(
    value: &Value,
    item: &Shape,
    shape: &Shape,
) -> Result<IndexMap<String, Value>, CoercionError> {
    match value {
        Value::Map(map) => map
            .iter()
            .map(|(key, v)| Ok((key.clone(), coerce(v, item)?)))
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('{') {
                if let Ok(decoded @ Value::Map(_)) = decode_literal(trimmed) {
                    return coerce_entries(&decoded, item, shape);
                }
            }

            if !(s.contains('\n') || s.contains('=')) {
                return Err(mismatch(value, shape));
            }
            let block = parse_assignment_block(s).ok_or_else(|| mismatch(value, shape))?;
            coerce_entries(&Value::Map(block), item, shape)
        }
        _ => Err(mismatch(value, shape)),
    }
}

/// Coerce to a map with values of any shape. `shape` only names the expectation in errors.
pub fn coerce_to_map(value: &Value, shape: &Shape) -> Result<IndexMap<String, Value>, CoercionError> {
    coerce_entries(value, &Shape::Any, shape)
}

/// Convert `value` into the representation declared by `shape`.
///
/// For a [`Shape::Union`] the first alternative that succeeds is used. Callers that need to know
/// whether the choice was ambiguous try the alternatives themselves.
pub fn coerce(value: &Value, shape: &Shape) -> Result<Value, CoercionError> {
    match shape {
        Shape::Any => Ok(value.clone()),
        Shape::Str | Shape::Path => coerce_str(value, shape),
        Shape::Int => coerce_int(value, shape),
        Shape::Float => coerce_float(value, shape),
        Shape::Bool => coerce_bool(value, shape),
        Shape::List(item) => coerce_list(value, item, shape),
        Shape::Map(item) => coerce_entries(value, item, shape).map(Value::Map),
        Shape::Union(alternatives) => alternatives
            .iter()
            .find_map(|alternative| coerce(value, alternative).ok())
            .ok_or_else(|| mismatch(value, shape)),
        Shape::Nested(fields) => {
            let map = coerce_to_map(value, shape)?;
            let mut ret = IndexMap::new();
            for (name, field) in fields.iter() {
                if let Some(v) = map.get(*name) {
                    ret.insert(name.to_string(), coerce(v, field)?);
                }
            }
            Ok(Value::Map(ret))
        }
        Shape::Table(_) => coerce_to_map(value, shape).map(Value::Map),
    }
}
