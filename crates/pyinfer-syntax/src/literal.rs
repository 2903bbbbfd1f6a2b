//! Safe evaluation of Python literal expressions.
//!
//! The text is parsed as a Python expression and the tree is folded into a [`Value`]. Strings
//! (with implicit concatenation), numbers, `True`, `False`, `None`, lists, tuples, sets, dicts,
//! `set()` and unary signs on numbers are accepted. Any other node, including names, calls and
//! f-strings, is rejected without being evaluated.

use indexmap::IndexMap;
use rustpython_parser::{ast, Parse};

use crate::errors::LiteralError;
use crate::value::Value;

pub type LiteralResult<T> = Result<T, LiteralError>;

/// Decode a Python literal expression such as `['a', 'b']` or `{'x': (1, 2)}`.
pub fn decode_literal(text: &str) -> LiteralResult<Value> {
    let expr = ast::Expr::parse(text.trim(), "<literal>")
        .map_err(|error| LiteralError::Syntax(error.to_string()))?;
    literal_value(&expr)
}

fn literal_value(expr: &ast::Expr) -> LiteralResult<Value> {
    match expr {
        ast::Expr::Constant(constant) => constant_value(&constant.value),
        ast::Expr::List(list) => sequence(&list.elts),
        ast::Expr::Tuple(tuple) => sequence(&tuple.elts),
        ast::Expr::Set(set) => sequence(&set.elts),
        ast::Expr::Dict(dict) => {
            let mut map = IndexMap::new();
            for (key, value) in dict.keys.iter().zip(&dict.values) {
                // `{**other}` has no key
                let Some(key) = key else {
                    return Err(LiteralError::NotALiteral(format!("**{}", describe(value))));
                };
                let key = literal_value(key)?;
                let key = key
                    .to_key()
                    .ok_or_else(|| LiteralError::UnhashableKey(key.to_string()))?;
                map.insert(key, literal_value(value)?);
            }
            Ok(Value::Map(map))
        }
        ast::Expr::UnaryOp(unary) => signed_number(unary),
        ast::Expr::Call(call) if is_empty_set(call) => Ok(Value::List(vec![])),
        other => Err(LiteralError::NotALiteral(describe(other))),
    }
}

fn sequence(items: &[ast::Expr]) -> LiteralResult<Value> {
    items
        .iter()
        .map(literal_value)
        .collect::<LiteralResult<Vec<_>>>()
        .map(Value::List)
}

fn integer(digits: &str) -> LiteralResult<Value> {
    digits
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| LiteralError::InvalidNumber(digits.to_string()))
}

fn constant_value(constant: &ast::Constant) -> LiteralResult<Value> {
    match constant {
        ast::Constant::None => Ok(Value::None),
        ast::Constant::Bool(b) => Ok(Value::Bool(*b)),
        ast::Constant::Str(s) => Ok(Value::String(s.clone())),
        ast::Constant::Bytes(bytes) => String::from_utf8(bytes.clone())
            .map(Value::String)
            .map_err(|_| LiteralError::NotALiteral(format!("{constant:?}"))),
        ast::Constant::Int(int) => integer(&int.to_string()),
        ast::Constant::Float(x) => Ok(Value::Float(*x)),
        ast::Constant::Tuple(items) => items
            .iter()
            .map(constant_value)
            .collect::<LiteralResult<Vec<_>>>()
            .map(Value::List),
        // Complex numbers and `...` have no counterpart in TOML
        other => Err(LiteralError::NotALiteral(format!("{other:?}"))),
    }
}

/// `-1`, `+2.5`. The sign only applies to a number written directly after it.
fn signed_number(unary: &ast::ExprUnaryOp) -> LiteralResult<Value> {
    let negative = match unary.op {
        ast::UnaryOp::USub => true,
        ast::UnaryOp::UAdd => false,
        _ => return Err(LiteralError::NotALiteral(describe(&unary.operand))),
    };

    match unary.operand.as_ref() {
        ast::Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Int(int),
            ..
        }) => match negative {
            // Negated as text so that `i64::MIN` still fits
            true => integer(&format!("-{int}")),
            false => integer(&int.to_string()),
        },
        ast::Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Float(x),
            ..
        }) => Ok(Value::Float(if negative { -*x } else { *x })),
        operand => Err(LiteralError::NotALiteral(describe(operand))),
    }
}

fn is_empty_set(call: &ast::ExprCall) -> bool {
    call.args.is_empty()
        && call.keywords.is_empty()
        && matches!(call.func.as_ref(), ast::Expr::Name(name) if name.id.as_str() == "set")
}

/// Short description of a rejected node, for error messages.
fn describe(expr: &ast::Expr) -> String {
    match expr {
        ast::Expr::Name(name) => name.id.as_str().to_string(),
        ast::Expr::Attribute(attribute) => {
            format!("{}.{}", describe(&attribute.value), attribute.attr.as_str())
        }
        ast::Expr::Call(call) => format!("{}(...)", describe(&call.func)),
        ast::Expr::JoinedStr(_) => "f-string".to_string(),
        ast::Expr::Constant(constant) => format!("{:?}", constant.value),
        _ => "expression".to_string(),
    }
}
