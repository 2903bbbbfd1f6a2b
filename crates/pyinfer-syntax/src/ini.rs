//! Reader for the INI dialect used by `setup.cfg`.
//!
//! Follows the default rules of Python's `configparser`: `#` and `;` start full-line comments,
//! keys are lowercased, the first `=` or `:` separates a key from its value, and lines indented
//! deeper than their key continue its value. Interpolation is not performed.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::errors::{IniError, IniErrorKind};

pub type IniSection = IndexMap<String, String>;

static SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<header>.+)\]\s*$").unwrap());
static OPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<key>.*?)\s*[=:]\s*(?P<value>.*)$").unwrap());

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ini {
    sections: IndexMap<String, IniSection>,
}

impl Ini {
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &IniSection)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

struct PendingOption {
    section: String,
    key: String,
    indent: usize,
    lines: Vec<String>,
}

impl PendingOption {
    fn finish(self, sections: &mut IndexMap<String, IniSection>) {
        let value = self.lines.join("\n").trim_end().to_string();
        sections
            .entry(self.section)
            .or_default()
            .insert(self.key, value);
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

pub fn parse_ini(text: &str) -> Result<Ini, IniError> {
    let mut sections: IndexMap<String, IniSection> = IndexMap::new();
    let mut current_section: Option<String> = None;
    let mut pending: Option<PendingOption> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.is_empty() {
            // Blank lines inside a value are kept; trailing ones are trimmed on finish
            if let Some(option) = pending.as_mut() {
                option.lines.push(String::new());
            }
            continue;
        }

        let indent = indentation(line);
        if let Some(option) = pending.as_mut() {
            if indent > option.indent {
                option.lines.push(trimmed.to_string());
                continue;
            }
        }

        if let Some(option) = pending.take() {
            option.finish(&mut sections);
        }

        if let Some(captures) = SECTION_REGEX.captures(trimmed) {
            let name = captures["header"].trim().to_string();
            sections.entry(name.clone()).or_default();
            current_section = Some(name);
            continue;
        }

        let Some(section) = current_section.clone() else {
            return Err(IniError {
                line_no,
                kind: IniErrorKind::MissingSectionHeader(trimmed.to_string()),
            });
        };

        let Some(captures) = OPTION_REGEX.captures(trimmed) else {
            return Err(IniError {
                line_no,
                kind: IniErrorKind::MissingDelimiter(trimmed.to_string()),
            });
        };

        pending = Some(PendingOption {
            section,
            key: captures["key"].trim().to_lowercase(),
            indent,
            lines: vec![captures["value"].to_string()],
        });
    }

    if let Some(option) = pending {
        option.finish(&mut sections);
    }

    // configparser folds DEFAULT into every other section; setup.cfg files do not use it
    sections.shift_remove("DEFAULT");

    Ok(Ini { sections })
}
