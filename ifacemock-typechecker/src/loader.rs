//! Package loading
//!
//! Reads the Go files of a directory, groups them by package clause and checks
//! each group against one shared `TypeEnv`. An external test package
//! (`package foo_test` next to `package foo`) is checked after the package it
//! tests and gets the import path suffix `_test`.

use crate::checker::Checker;
use crate::env::{PackageId, PackageKind, TypeEnv};
use crate::error::{LoadError, LoadResult};
use crate::importer::SourceImporter;
use crate::module::Module;
use ifacemock_parser::{parse_source_file_with_name, SourceFile};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory containing `go.mod`; discovered from the loaded directory when unset
    pub module_root: Option<PathBuf>,
    /// Resolve `fmt`, `io`, `context`, `sort` and `encoding` from built-in stubs
    pub stdlib_stubs: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            module_root: None,
            stdlib_stubs: true,
        }
    }
}

/// One parsed source file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// File name used in diagnostics
    pub name: String,
    pub path: Option<PathBuf>,
    pub source: String,
    pub ast: SourceFile,
}

/// The checked packages of one directory and the environment holding them
#[derive(Debug)]
pub struct LoadedPackages {
    pub env: TypeEnv,
    /// Packages declared in the directory, ordered by package name
    pub packages: Vec<PackageId>,
}

#[derive(Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse and check every package declared in `dir`
    pub fn load_dir(&self, dir: &Path) -> LoadResult<LoadedPackages> {
        let _span = tracing::info_span!("load_dir", dir = %dir.display()).entered();

        let groups = parse_dir(dir, true)?;
        let module = match &self.config.module_root {
            Some(root) => Some(Module::read(root)?),
            None => Module::find(dir)?,
        };
        let base_path = module
            .as_ref()
            .and_then(|m| m.import_path_of(dir))
            .or_else(|| groups.keys().find(|name| !name.ends_with("_test")).cloned())
            .or_else(|| groups.keys().next().cloned())
            .unwrap_or_default();
        tracing::debug!(path = %base_path, packages = groups.len(), "parsed directory");

        let mut env = TypeEnv::new();
        let mut importer = SourceImporter::new(self.config.clone(), module);
        let mut packages = Vec::with_capacity(groups.len());

        // Package names sort before their `_test` counterparts, so the package
        // under test is finished by the time its external tests import it.
        for (name, files) in groups {
            let path = if name.ends_with("_test") && !base_path.ends_with("_test") {
                format!("{base_path}_test")
            } else {
                base_path.clone()
            };
            importer.begin(&path);
            let package = Checker::check_package(&mut env, &mut importer, &path, PackageKind::Source, files);
            importer.finish(&path, package);
            packages.push(package);
        }

        Ok(LoadedPackages { env, packages })
    }
}

/// Parse the `.go` files in `dir`, grouped by package name
///
/// Files are read in name order. Names starting with `.` or `_` are ignored, as
/// the go tool does, and `_test.go` files only when `include_tests` is false.
/// The first syntax error aborts the whole directory.
pub fn parse_dir(dir: &Path, include_tests: bool) -> LoadResult<BTreeMap<String, Vec<ParsedFile>>> {
    let io_error = |source| LoadError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let wanted = name.ends_with(".go")
            && !name.starts_with(['.', '_'])
            && (include_tests || !name.ends_with("_test.go"));
        if wanted && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(LoadError::NoGoFiles {
            dir: dir.display().to_string(),
        });
    }

    let mut groups: BTreeMap<String, Vec<ParsedFile>> = BTreeMap::new();
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ast = parse_source_file_with_name(&source, Some(name.clone()))?;
        tracing::trace!(file = %name, package = %ast.package.name, "parsed file");

        groups.entry(ast.package.name.clone()).or_default().push(ParsedFile {
            name,
            path: Some(path),
            source,
            ast,
        });
    }
    Ok(groups)
}
