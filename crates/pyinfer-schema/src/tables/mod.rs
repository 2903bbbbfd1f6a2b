//! Schemas of the tables that make up a `pyproject.toml` document.

pub mod build_system;
pub mod coverage;
pub mod flake8;
pub mod project;
pub mod ruff;
pub mod setuptools;
pub mod setuptools_scm;
pub mod tool;

use crate::shape::Shape;

pub(crate) const STRINGS: Shape = Shape::List(&Shape::Str);
pub(crate) const STRING_MAP: Shape = Shape::Map(&Shape::Str);
pub(crate) const STRINGS_MAP: Shape = Shape::Map(&STRINGS);
