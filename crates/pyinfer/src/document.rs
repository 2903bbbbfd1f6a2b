//! The inferred `pyproject.toml`: `project`, `build-system` and `tool` tables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use pyinfer_schema::{ConfigurationTable, TableKind};
use pyinfer_syntax::Value;
use pyinfer_util::{Diagnostic, Diagnostics};

use crate::sources::{nest, pyproject_toml, setup_cfg, setup_py, SourceKind, Tree};
use crate::InferResult;

#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalDocument {
    project: ConfigurationTable,
    build_system: ConfigurationTable,
    tool: ConfigurationTable,
}

impl CanonicalDocument {
    /// An empty document. `directory` is where fields that name files are looked up.
    pub fn new(directory: Option<&Path>) -> Self {
        let table = |kind: TableKind| match directory {
            Some(directory) => ConfigurationTable::with_directory(kind, directory),
            None => ConfigurationTable::new(kind),
        };
        Self {
            project: table(TableKind::Project),
            build_system: table(TableKind::BuildSystem),
            tool: table(TableKind::Tool),
        }
    }

    pub fn project(&self) -> &ConfigurationTable {
        &self.project
    }

    pub fn build_system(&self) -> &ConfigurationTable {
        &self.build_system
    }

    pub fn tool(&self) -> &ConfigurationTable {
        &self.tool
    }

    pub fn table(&self, name: &str) -> Option<&ConfigurationTable> {
        match name {
            "project" => Some(&self.project),
            "build-system" => Some(&self.build_system),
            "tool" => Some(&self.tool),
            _ => None,
        }
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut ConfigurationTable> {
        match name {
            "project" => Some(&mut self.project),
            "build-system" => Some(&mut self.build_system),
            "tool" => Some(&mut self.tool),
            _ => None,
        }
    }

    fn tables(&self) -> [&ConfigurationTable; 3] {
        [&self.project, &self.build_system, &self.tool]
    }

    /// Apply a tree of top-level tables. Unknown top-level keys are skipped.
    pub fn update(&mut self, tree: &Tree, diagnostics: &mut Diagnostics) -> InferResult<()> {
        for (name, value) in tree {
            let Some(table) = self.table_mut(name) else {
                tracing::debug!("skipping top-level key `{name}`");
                continue;
            };
            let Value::Map(items) = value else {
                bail!("`{name}` must be a table, not {}", value.type_name());
            };
            table.update(items, diagnostics)?;
        }
        Ok(())
    }

    /// Set the entry at a dotted path such as `tool.setuptools.zip-safe`. Unlike
    /// [`CanonicalDocument::update`], empty values are stored.
    pub fn set(&mut self, path: &str, value: Value, diagnostics: &mut Diagnostics) -> InferResult<()> {
        let (name, key) = path
            .split_once('.')
            .ok_or_else(|| anyhow!("`{path}` does not name an entry of a table"))?;
        let table = self
            .table_mut(name)
            .ok_or_else(|| anyhow!("unknown table `{name}`"))?;

        let (key, value) = match key.split_once('.') {
            Some((key, rest)) => (key, nest(rest, value)),
            None => (key, value),
        };
        table.set(key, value, diagnostics)?;
        Ok(())
    }

    /// Apply the populated entries of `other` on top of this document.
    pub fn merge(&mut self, other: &CanonicalDocument) -> InferResult<()> {
        self.project.merge(&other.project)?;
        self.build_system.merge(&other.build_system)?;
        self.tool.merge(&other.tool)?;
        Ok(())
    }

    /// Read one `setup.py`, `setup.cfg` or `pyproject.toml` file.
    ///
    /// If the file cannot be translated completely, a [`Diagnostic::SourceFailed`] is recorded and
    /// whatever was read up to that point is returned. Failing to read the file, or a
    /// `pyproject.toml` that is not valid TOML, is an error.
    pub fn from_file(path: &Path, diagnostics: &mut Diagnostics) -> InferResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let kind = SourceKind::from_file_name(file_name)
            .ok_or_else(|| anyhow!("{} is not a known configuration file", path.display()))?;

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut document = Self::new(Some(directory));
        let result = match kind {
            SourceKind::SetupPy => setup_py::translate(&text, &mut document, diagnostics),
            SourceKind::SetupCfg => setup_cfg::translate(&text, &mut document, diagnostics),
            SourceKind::PyprojectToml => {
                let table = pyproject_toml::parse(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                pyproject_toml::translate(&table, &mut document, diagnostics)
            }
        };

        if let Err(error) = result {
            diagnostics.push(Diagnostic::SourceFailed {
                file: path.display().to_string(),
                error: format!("{error:#}"),
            });
        }
        Ok(document)
    }

    /// Infer the configuration of the project in `directory` from every known file it contains,
    /// with `pyproject.toml` taking precedence over `setup.cfg`, and `setup.cfg` over `setup.py`.
    pub fn from_directory(directory: &Path, diagnostics: &mut Diagnostics) -> InferResult<Self> {
        let entries = fs::read_dir(directory)
            .with_context(|| format!("failed to list {}", directory.display()))?;

        let mut sources: Vec<(SourceKind, PathBuf)> = vec![];
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to list {}", directory.display()))?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Some(kind) = entry.file_name().to_str().and_then(SourceKind::from_file_name)
            else {
                continue;
            };
            sources.push((kind, entry.path()));
        }
        sources.sort();

        let mut document = Self::new(Some(directory));
        for (kind, path) in sources {
            tracing::debug!("reading {} as {}", path.display(), kind.file_name());
            let partial = Self::from_file(&path, diagnostics)?;
            document.merge(&partial)?;
        }
        Ok(document)
    }

    /// The document as TOML. Tables without entries are left out.
    pub fn to_toml(&self) -> toml::Table {
        let mut ret = toml::Table::new();
        for table in self.tables() {
            if table.to_value().is_empty() {
                continue;
            }
            ret.extend(table.serialize());
        }
        ret
    }

    pub fn to_toml_string(&self) -> InferResult<String> {
        toml::to_string(&self.to_toml()).context("failed to serialize the configuration")
    }
}

#[cfg(test)]
mod test {
    use crate::document::CanonicalDocument;
    use indexmap::indexmap;
    use pretty_assertions::assert_eq;
    use pyinfer_syntax::Value;
    use pyinfer_util::Diagnostics;

    #[test]
    fn set_along_a_path() {
        let mut d = Diagnostics::new();
        let mut document = CanonicalDocument::new(None);
        document
            .set("tool.setuptools.zip-safe", Value::from("false"), &mut d)
            .unwrap();
        document
            .set("tool.setuptools_scm", Value::Map(indexmap! {}), &mut d)
            .unwrap();

        let expected: toml::Table = toml::from_str(
            r#"
[tool.setuptools]
zip-safe = false

[tool.setuptools_scm]
"#,
        )
        .unwrap();
        assert_eq!(document.to_toml(), expected);
    }

    #[test]
    fn unknown_tables() {
        let mut d = Diagnostics::new();
        let mut document = CanonicalDocument::new(None);
        assert!(document.set("nothing.here", Value::Integer(1), &mut d).is_err());
        assert!(document.set("project", Value::Integer(1), &mut d).is_err());
        assert!(document
            .update(&indexmap! {"project".to_string() => Value::Integer(1)}, &mut d)
            .is_err());
    }

    #[test]
    fn empty_document() {
        let document = CanonicalDocument::new(None);
        assert_eq!(document.to_toml(), toml::Table::new());
        assert_eq!(document.to_toml_string().unwrap(), "");
    }
}
