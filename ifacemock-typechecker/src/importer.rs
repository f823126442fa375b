//! Import resolution
//!
//! `SourceImporter` resolves an import path in three tiers: packages of the
//! enclosing Go module are parsed and checked from source, a handful of
//! standard-library packages come from built-in stubs, and anything else
//! becomes an opaque package. Imports between module packages are tracked on a
//! directed graph so cycles are reported instead of recursing forever.

use crate::checker::Checker;
use crate::env::{PackageId, PackageKind, TypeEnv};
use crate::error::{ImportError, LoadError};
use crate::loader::{parse_dir, LoaderConfig, ParsedFile};
use crate::module::Module;
use crate::stdlib;
use ifacemock_parser::parse_source_file_with_name;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Resolves import paths to checked packages
pub trait Importer {
    /// Import `path` on behalf of the package at `from`
    fn import(&mut self, env: &mut TypeEnv, from: &str, path: &str) -> Result<PackageId, ImportError>;
}

#[derive(Debug)]
pub struct SourceImporter {
    config: LoaderConfig,
    module: Option<Module>,
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    /// Packages whose check has not finished, outermost first
    in_progress: Vec<String>,
    done: HashMap<String, PackageId>,
}

impl SourceImporter {
    pub fn new(config: LoaderConfig, module: Option<Module>) -> Self {
        Self {
            config,
            module,
            graph: DiGraph::new(),
            nodes: HashMap::new(),
            in_progress: Vec::new(),
            done: HashMap::new(),
        }
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    /// Mark a package checked outside the importer as being checked
    pub fn begin(&mut self, path: &str) {
        self.node(path);
        self.in_progress.push(path.to_string());
    }

    /// Record a package checked outside the importer as complete
    pub fn finish(&mut self, path: &str, package: PackageId) {
        if let Some(pos) = self.in_progress.iter().rposition(|p| p == path) {
            self.in_progress.remove(pos);
        }
        self.done.insert(path.to_string(), package);
    }

    fn node(&mut self, path: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(path) {
            return node;
        }
        let node = self.graph.add_node(path.to_string());
        self.nodes.insert(path.to_string(), node);
        node
    }

    /// Cycle closed by the edge `from -> path`, outermost package first
    fn cycle_through(&self, path: &str) -> Vec<String> {
        let start = self
            .in_progress
            .iter()
            .position(|p| p == path)
            .unwrap_or_default();
        let mut cycle: Vec<String> = self.in_progress[start..].to_vec();
        cycle.push(path.to_string());
        cycle
    }

    fn load_module_package(
        &mut self,
        env: &mut TypeEnv,
        path: &str,
        dir: &std::path::Path,
    ) -> Result<PackageId, ImportError> {
        let groups = parse_dir(dir, false)?;
        let files = groups
            .into_iter()
            .find(|(name, _)| !name.ends_with("_test"))
            .map(|(_, files)| files)
            .ok_or_else(|| LoadError::NoGoFiles {
                dir: dir.display().to_string(),
            })?;

        self.in_progress.push(path.to_string());
        let package = Checker::check_package(env, self, path, PackageKind::Source, files);
        self.in_progress.pop();
        Ok(package)
    }

    fn load_stub(&mut self, env: &mut TypeEnv, path: &str, source: &str) -> Result<PackageId, ImportError> {
        let name = format!("{path}/{}.go", default_package_name(path));
        let ast = parse_source_file_with_name(source, Some(name.clone())).map_err(LoadError::from)?;
        let files = vec![ParsedFile {
            name,
            path: None,
            source: source.to_string(),
            ast,
        }];
        Ok(Checker::check_package(env, self, path, PackageKind::Stub, files))
    }
}

impl Importer for SourceImporter {
    fn import(&mut self, env: &mut TypeEnv, from: &str, path: &str) -> Result<PackageId, ImportError> {
        if let Some(&package) = self.done.get(path) {
            return Ok(package);
        }

        let from_node = self.node(from);
        let to_node = self.node(path);
        self.graph.update_edge(from_node, to_node, ());
        if has_path_connecting(&self.graph, to_node, from_node, None) {
            let cycle = self.cycle_through(path);
            tracing::warn!(cycle = %cycle.join(" -> "), "import cycle");
            return Err(ImportError::Cycle { cycle });
        }

        let _span = tracing::debug_span!("import", path).entered();
        let module_dir = self.module.as_ref().and_then(|m| m.dir_for(path));
        let package = if let Some(dir) = module_dir {
            tracing::debug!(dir = %dir.display(), "loading module package");
            self.load_module_package(env, path, &dir)?
        } else if let Some(source) = stdlib::stub_source(path).filter(|_| self.config.stdlib_stubs) {
            tracing::debug!("loading standard library stub");
            self.load_stub(env, path, source)?
        } else {
            tracing::debug!("no source available, using an opaque package");
            env.add_package(path, &default_package_name(path), PackageKind::Opaque)
        };

        self.done.insert(path.to_string(), package);
        Ok(package)
    }
}

/// Name a package is referred to by when its source is unavailable:
/// the last path element, skipping a major-version suffix, cut at the first
/// dot and without a `go-` prefix or `-go` suffix
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }

    let name = last.split('.').next().unwrap_or(last);
    let name = name.strip_prefix("go-").unwrap_or(name);
    let name = name.strip_suffix("-go").unwrap_or(name);
    name.replace('-', "_")
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
