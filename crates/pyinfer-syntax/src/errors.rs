use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("`{0}` is not a literal")]
    NotALiteral(String),
    #[error("unhashable mapping key `{0}`")]
    UnhashableKey(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_no}: {kind}")]
pub struct IniError {
    pub line_no: usize,
    pub kind: IniErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniErrorKind {
    #[error("`{0}` appears before any section header")]
    MissingSectionHeader(String),
    #[error("expected `key = value`, found `{0}`")]
    MissingDelimiter(String),
}
