//! A TOML table whose keys and value shapes are governed by a [`Schema`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use pyinfer_syntax::Value;
use pyinfer_util::{Diagnostic, Diagnostics};

use crate::coerce::{coerce, coerce_to_map};
use crate::convert::value_to_toml;
use crate::errors::TableError;
use crate::shape::{Field, Schema, Shape, TableKind};
use crate::tables::{project, tool};
use crate::TableResult;

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Value(Value),
    Table(ConfigurationTable),
}

#[derive(Clone, Debug)]
pub struct ConfigurationTable {
    name: String,
    schema: Schema,
    /// Project directory, consulted when a field refers to a file
    directory: Option<PathBuf>,
    /// A slot holding `None` is a declared field that has not been set.
    slots: IndexMap<String, Option<Entry>>,
}

impl ConfigurationTable {
    pub fn new(kind: TableKind) -> Self {
        Self::from_schema(kind.schema().name.to_string(), *kind.schema(), None)
    }

    pub fn with_directory(kind: TableKind, directory: impl Into<PathBuf>) -> Self {
        Self::from_schema(
            kind.schema().name.to_string(),
            *kind.schema(),
            Some(directory.into()),
        )
    }

    pub(crate) fn from_schema(name: String, schema: Schema, directory: Option<PathBuf>) -> Self {
        let mut slots = IndexMap::new();
        if schema.placeholdered {
            slots.extend(schema.fields.iter().map(|(key, _)| (key.to_string(), None)));
        }

        let mut ret = Self {
            name,
            schema,
            directory,
            slots,
        };

        if schema.kind == Some(TableKind::Tool) {
            for kind in tool::PRESENT_BY_DEFAULT {
                let key = kind.schema().name.trim_start_matches("tool.");
                let child = ret.child(*kind);
                ret.slots.insert(key.to_string(), Some(Entry::Table(child)));
            }
        }

        ret
    }

    fn child(&self, kind: TableKind) -> Self {
        Self::from_schema(
            kind.schema().name.to_string(),
            *kind.schema(),
            self.directory.clone(),
        )
    }

    fn nested(&self, key: &str, fields: &'static [Field]) -> Self {
        Self::from_schema(
            format!("{}.{key}", self.name),
            Schema::nested(fields),
            self.directory.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn check_key(&self, key: &str) -> TableResult<()> {
        if self.schema.closed && !self.schema.declares(key) {
            return Err(TableError::KeyNotInSchema {
                table: self.name.clone(),
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Coerce `value` into the shape declared for `key` and store it.
    ///
    /// Setting [`Value::None`] marks the key as absent. Keys that a closed table does not declare
    /// are rejected; an open table stores them verbatim.
    pub fn set(&mut self, key: &str, value: Value, diagnostics: &mut Diagnostics) -> TableResult<()> {
        self.check_key(key)?;
        if value.is_none() {
            return self.set_absent(key);
        }

        if self.schema.kind == Some(TableKind::Project) {
            return project::set_field(self, key, value, diagnostics);
        }

        let shape = self.schema.field(key).copied().unwrap_or(Shape::Any);
        self.set_shaped(key, shape, value, diagnostics)
    }

    pub(crate) fn set_shaped(
        &mut self,
        key: &str,
        shape: Shape,
        value: Value,
        diagnostics: &mut Diagnostics,
    ) -> TableResult<()> {
        let coercion = |source| TableError::Coercion {
            table: self.name.clone(),
            key: key.to_string(),
            source,
        };

        let entry = match shape {
            Shape::Any => Entry::Value(value),
            Shape::Union(alternatives) => {
                let mut candidates = alternatives
                    .iter()
                    .filter_map(|alternative| coerce(&value, alternative).ok());
                let Some(first) = candidates.next() else {
                    return Err(TableError::NoUnionAlternative {
                        table: self.name.clone(),
                        key: key.to_string(),
                        shape: shape.to_string(),
                        value: value.to_string(),
                    });
                };

                let others = candidates.count();
                if others > 0 {
                    diagnostics.push(Diagnostic::AmbiguousUnion {
                        key: format!("{}.{key}", self.name),
                        candidates: others + 1,
                    });
                }
                Entry::Value(first)
            }
            Shape::Nested(fields) => {
                let map = coerce_to_map(&value, &shape).map_err(coercion)?;

                let mut table = match self.slots.get(key) {
                    Some(Some(Entry::Table(existing))) if !map.is_empty() => existing.clone(),
                    _ => self.nested(key, fields),
                };
                for (sub_key, sub_value) in map {
                    if table.schema.declares(&sub_key) {
                        table.set(&sub_key, sub_value, diagnostics)?;
                    } else {
                        tracing::debug!("skipping undeclared key `{}.{sub_key}`", table.name);
                    }
                }
                Entry::Table(table)
            }
            Shape::Table(kind) => {
                let map = coerce_to_map(&value, &shape).map_err(coercion)?;

                if !matches!(self.slots.get(key), Some(Some(Entry::Table(_)))) {
                    let child = self.child(kind);
                    self.slots.insert(key.to_string(), Some(Entry::Table(child)));
                }
                if let Some(Some(Entry::Table(table))) = self.slots.get_mut(key) {
                    table.update(&map, diagnostics)?;
                }
                return Ok(());
            }
            _ => Entry::Value(coerce(&value, &shape).map_err(coercion)?),
        };

        self.slots.insert(key.to_string(), Some(entry));
        Ok(())
    }

    pub fn set_absent(&mut self, key: &str) -> TableResult<()> {
        self.check_key(key)?;
        self.slots.insert(key.to_string(), None);
        Ok(())
    }

    /// Entries are never removed; use [`ConfigurationTable::set_absent`] instead.
    pub fn delete(&mut self, key: &str) -> TableResult<()> {
        Err(TableError::DeletionRejected {
            table: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// Set every entry of `items` that has content, in order.
    pub fn update(
        &mut self,
        items: &IndexMap<String, Value>,
        diagnostics: &mut Diagnostics,
    ) -> TableResult<()> {
        for (key, value) in items {
            if value.is_empty() {
                continue;
            }
            self.set(key, value.clone(), diagnostics)?;
        }
        Ok(())
    }

    /// Apply the populated entries of `other` on top of this table. Sub-tables present on both
    /// sides are merged rather than replaced.
    pub fn merge(&mut self, other: &ConfigurationTable) -> TableResult<()> {
        for (key, entry) in &other.slots {
            match entry {
                None => {}
                Some(Entry::Value(value)) => {
                    if value.is_empty() {
                        continue;
                    }
                    self.check_key(key)?;
                    self.slots
                        .insert(key.clone(), Some(Entry::Value(value.clone())));
                }
                Some(Entry::Table(theirs)) => {
                    if let Some(Some(Entry::Table(ours))) = self.slots.get_mut(key) {
                        ours.merge(theirs)?;
                        continue;
                    }
                    if theirs.is_unused_default() {
                        continue;
                    }
                    self.check_key(key)?;
                    self.slots
                        .insert(key.clone(), Some(Entry::Table(theirs.clone())));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key)? {
            Entry::Value(value) => Some(value),
            Entry::Table(_) => None,
        }
    }

    pub fn table(&self, key: &str) -> Option<&ConfigurationTable> {
        match self.get(key)? {
            Entry::Table(table) => Some(table),
            Entry::Value(_) => None,
        }
    }

    pub fn table_mut(&mut self, key: &str) -> Option<&mut ConfigurationTable> {
        match self.slots.get_mut(key)?.as_mut()? {
            Entry::Table(table) => Some(table),
            Entry::Value(_) => None,
        }
    }

    /// Keys in insertion order, including absent ones.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Number of entries that are set. In a placeholdered table an entry must also have content.
    pub fn populated_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| match slot {
                None => false,
                Some(_) if !self.schema.placeholdered => true,
                Some(Entry::Value(value)) => !value.is_empty(),
                Some(Entry::Table(table)) => table.populated_count() > 0,
            })
            .count()
    }

    /// A sub-table that exists from construction and was never given content.
    fn is_unused_default(&self) -> bool {
        self.schema
            .kind
            .is_some_and(|kind| tool::PRESENT_BY_DEFAULT.contains(&kind))
            && self.populated_count() == 0
    }

    /// Set entries as a map. An empty sub-table is kept, since it asks for defaults, unless it was
    /// only created up front.
    pub fn to_value(&self) -> Value {
        let mut ret = IndexMap::new();
        for (key, slot) in &self.slots {
            let value = match slot {
                None => continue,
                Some(Entry::Table(table)) if table.is_unused_default() => continue,
                Some(Entry::Table(table)) => table.to_value(),
                Some(Entry::Value(value)) => value.clone(),
            };
            ret.insert(key.clone(), value);
        }
        Value::Map(ret)
    }

    /// The table's entries nested under its dotted name, e.g. `{tool = {setuptools = {...}}}`.
    pub fn serialize(&self) -> toml::Table {
        let mut table = match value_to_toml(&self.to_value()) {
            Some(toml::Value::Table(table)) => table,
            _ => toml::Table::new(),
        };

        for segment in self.name.rsplit('.') {
            let mut outer = toml::Table::new();
            outer.insert(segment.to_string(), toml::Value::Table(table));
            table = outer;
        }
        table
    }

    pub fn to_toml_string(&self) -> TableResult<String> {
        toml::to_string(&self.serialize()).map_err(|source| TableError::Serialize {
            table: self.name.clone(),
            source,
        })
    }
}

impl PartialEq for ConfigurationTable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.to_value() == other.to_value()
    }
}
