use thiserror::Error;

/// A value could not be brought into the declared shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot read {found} `{value}` as {expected}")]
pub struct CoercionError {
    pub expected: String,
    pub found: &'static str,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("`{table}` table does not contain `{key}`")]
    KeyNotInSchema { table: String, key: String },

    #[error("cannot delete `{table}.{key}`; set it as absent instead")]
    DeletionRejected { table: String, key: String },

    #[error("`{table}.{key}`: {source}")]
    Coercion {
        table: String,
        key: String,
        source: CoercionError,
    },

    #[error("`{table}.{key}`: no alternative of `{shape}` accepts `{value}`")]
    NoUnionAlternative {
        table: String,
        key: String,
        shape: String,
        value: String,
    },

    #[error("could not serialize `{table}`: {source}")]
    Serialize {
        table: String,
        source: toml::ser::Error,
    },
}
