use std::fmt;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::tables;

/// The declared type of a table field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Stored verbatim
    Any,
    Str,
    Path,
    Int,
    Float,
    Bool,
    List(&'static Shape),
    /// String keys mapped to values of one shape
    Map(&'static Shape),
    /// The first alternative that accepts a value wins
    Union(&'static [Shape]),
    /// An anonymous sub-table with its own declared fields
    Nested(&'static [Field]),
    /// A sub-table with a schema of its own
    Table(TableKind),
}

pub type Field = (&'static str, Shape);

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => f.write_str("any"),
            Shape::Str => f.write_str("string"),
            Shape::Path => f.write_str("path"),
            Shape::Int => f.write_str("integer"),
            Shape::Float => f.write_str("float"),
            Shape::Bool => f.write_str("bool"),
            Shape::List(inner) => write!(f, "list of {inner}"),
            Shape::Map(inner) => write!(f, "map of {inner}"),
            Shape::Union(alternatives) => write!(f, "{}", alternatives.iter().join(" | ")),
            Shape::Nested(fields) => {
                write!(f, "table with {}", fields.iter().map(|(name, _)| name).join(", "))
            }
            Shape::Table(kind) => write!(f, "`{}` table", kind.schema().name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Project,
    BuildSystem,
    Tool,
    Setuptools,
    SetuptoolsScm,
    Coverage,
    Flake8,
    Ruff,
}

impl TableKind {
    pub fn schema(self) -> &'static Schema {
        match self {
            TableKind::Project => &tables::project::SCHEMA,
            TableKind::BuildSystem => &tables::build_system::SCHEMA,
            TableKind::Tool => &tables::tool::SCHEMA,
            TableKind::Setuptools => &tables::setuptools::SCHEMA,
            TableKind::SetuptoolsScm => &tables::setuptools_scm::SCHEMA,
            TableKind::Coverage => &tables::coverage::SCHEMA,
            TableKind::Flake8 => &tables::flake8::SCHEMA,
            TableKind::Ruff => &tables::ruff::SCHEMA,
        }
    }
}

/// Declared fields of a table and how strictly they are enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    /// Dotted path of the table in the document
    pub name: &'static str,
    pub fields: &'static [Field],
    /// Reject keys that are not declared
    pub closed: bool,
    /// Start with one absent slot per declared field
    pub placeholdered: bool,
    pub kind: Option<TableKind>,
}

impl Schema {
    /// Schema of an anonymous sub-table. Undeclared keys are rejected.
    pub const fn nested(fields: &'static [Field]) -> Schema {
        Schema {
            name: "",
            fields,
            closed: true,
            placeholdered: false,
            kind: None,
        }
    }

    pub fn field(&self, key: &str) -> Option<&'static Shape> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, shape)| shape)
    }

    pub fn declares(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

#[cfg(test)]
mod test {
    use crate::shape::{Shape, TableKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn describe() {
        assert_eq!(
            Shape::Map(&Shape::List(&Shape::Str)).to_string(),
            "map of list of string"
        );
        assert_eq!(
            Shape::Union(&[Shape::Map(&Shape::Str), Shape::Str]).to_string(),
            "map of string | string"
        );
        assert_eq!(
            Shape::Table(TableKind::Setuptools).to_string(),
            "`tool.setuptools` table"
        );
    }

    #[test]
    fn tool_tables_live_under_tool() {
        for kind in [
            TableKind::Setuptools,
            TableKind::SetuptoolsScm,
            TableKind::Coverage,
            TableKind::Flake8,
            TableKind::Ruff,
        ] {
            let schema = kind.schema();
            assert!(schema.name.starts_with("tool."), "{}", schema.name);
            assert_eq!(schema.kind, Some(kind));
        }
    }
}
