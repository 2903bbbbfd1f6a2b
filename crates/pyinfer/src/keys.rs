//! Where each legacy setuptools keyword lands in `pyproject.toml`.
//! <https://setuptools.pypa.io/en/latest/userguide/declarative_config.html>
//!
//! Keys are the underscore spelling used by `setup()` and the `[metadata]` / `[options]` sections
//! of `setup.cfg`. Values are dotted paths from the document root.

use phf::{self, phf_map};

pub static METADATA: phf::Map<&'static str, &'static str> = phf_map! {
    "name" => "project.name",
    "version" => "project.version",
    "description" => "project.description",
    "summary" => "project.description",
    "long_description" => "project.readme",
    "description_file" => "project.readme",
    "author" => "project.authors",
    "maintainer" => "project.maintainers",
    "keywords" => "project.keywords",
    "license" => "project.license",
    "license_file" => "tool.setuptools.license-files",
    "license_files" => "tool.setuptools.license-files",
    "classifiers" => "project.classifiers",
    "url" => "project.urls.homepage",
    "home_page" => "project.urls.homepage",
    "download_url" => "project.urls.download",
    "project_urls" => "project.urls",
    "platforms" => "tool.setuptools.platforms",
    "provides" => "tool.setuptools.provides",
    "obsoletes" => "tool.setuptools.obsoletes",
};

pub static OPTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "zip_safe" => "tool.setuptools.zip-safe",
    "include_package_data" => "tool.setuptools.include-package-data",
    "packages" => "tool.setuptools.packages",
    "py_modules" => "tool.setuptools.py-modules",
    "package_dir" => "tool.setuptools.package-dir",
    "package_data" => "tool.setuptools.package-data",
    "exclude_package_data" => "tool.setuptools.exclude-package-data",
    "data_files" => "tool.setuptools.data-files",
    "scripts" => "tool.setuptools.script-files",
    "namespace_packages" => "tool.setuptools.namespace-packages",
    "eager_resources" => "tool.setuptools.eager-resources",
    "install_requires" => "project.dependencies",
    "python_requires" => "project.requires-python",
    "setup_requires" => "build-system.requires",
    "entry_points" => "project.entry-points",
    "extras_require" => "project.optional-dependencies",
};

/// Canonical path of a `setup()` keyword, which may come from either section.
pub fn lookup(key: &str) -> Option<&'static str> {
    METADATA.get(key).or_else(|| OPTIONS.get(key)).copied()
}

/// Canonical path of a key in the named `setup.cfg` section.
pub fn lookup_in(section: &str, key: &str) -> Option<&'static str> {
    match section {
        "metadata" => METADATA.get(key).copied(),
        "options" => OPTIONS.get(key).copied(),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crate::keys::{lookup, lookup_in};
    use pretty_assertions::assert_eq;

    #[test]
    fn sections() {
        assert_eq!(lookup("install_requires"), Some("project.dependencies"));
        assert_eq!(lookup("url"), Some("project.urls.homepage"));
        assert_eq!(lookup("tests_require"), None);
        assert_eq!(lookup_in("options", "name"), None);
        assert_eq!(lookup_in("metadata", "name"), Some("project.name"));
    }

    #[test]
    fn every_path_names_a_top_level_table() {
        for path in crate::keys::METADATA.values().chain(crate::keys::OPTIONS.values()) {
            let root = path.split('.').next().unwrap_or_default();
            assert!(["project", "build-system", "tool"].contains(&root), "{path}");
        }
    }
}
