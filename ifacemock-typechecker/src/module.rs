//! Go module discovery
//!
//! Import paths under the enclosing module's path map onto directories below
//! the directory holding its `go.mod`.

use crate::error::{LoadError, LoadResult};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Directory containing `go.mod`
    pub root: PathBuf,
    /// Module path declared by the `module` directive
    pub path: String,
}

impl Module {
    /// Walk up from `start` to the nearest directory with a `go.mod`
    pub fn find(start: &Path) -> LoadResult<Option<Module>> {
        let start = canonical(start)?;
        for dir in start.ancestors() {
            if dir.join("go.mod").is_file() {
                return Module::read(dir).map(Some);
            }
        }
        Ok(None)
    }

    /// Read the `go.mod` in `root`
    pub fn read(root: &Path) -> LoadResult<Module> {
        let root = canonical(root)?;
        let file = root.join("go.mod");
        let contents = std::fs::read_to_string(&file).map_err(|source| LoadError::Io {
            path: file.display().to_string(),
            source,
        })?;
        let path = parse_module_path(&contents).ok_or_else(|| LoadError::InvalidModuleFile {
            path: file.display().to_string(),
            message: "missing module directive".to_string(),
        })?;

        tracing::debug!(module = %path, root = %root.display(), "found module");
        Ok(Module { root, path })
    }

    /// Directory holding the package with `import_path`, if it belongs to this module
    pub fn dir_for(&self, import_path: &str) -> Option<PathBuf> {
        if import_path == self.path {
            return Some(self.root.clone());
        }
        let rest = import_path.strip_prefix(&self.path)?.strip_prefix('/')?;
        Some(rest.split('/').fold(self.root.clone(), |dir, segment| dir.join(segment)))
    }

    /// Import path of the package in `dir`, if `dir` lies inside this module
    pub fn import_path_of(&self, dir: &Path) -> Option<String> {
        let dir = canonical(dir).ok()?;
        let relative = dir.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            Some(self.path.clone())
        } else {
            Some(format!("{}/{}", self.path, segments.join("/")))
        }
    }
}

/// Module path from the `module` directive of a `go.mod` file
pub fn parse_module_path(contents: &str) -> Option<String> {
    for line in contents.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with([' ', '\t', '"']) {
            continue;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        if !path.is_empty() {
            return Some(path.to_string());
        }
    }
    None
}

fn canonical(dir: &Path) -> LoadResult<PathBuf> {
    dir.canonicalize().map_err(|source| LoadError::Io {
        path: dir.display().to_string(),
        source,
    })
}
