//! Type qualification relative to the declaring file
//!
//! Types from other packages must be written the way the file declaring the
//! contract refers to them: through its alias for the package, its package
//! name, or nothing at all for dot imports. Every package used that way is
//! recorded so the generated file imports exactly what it needs.

use crate::model::{Import, SynthesizedImport};
use ifacemock_typechecker::{
    default_package_name, type_string, Package, PackageId, TypeEnv, TypeId,
};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Imports used by the rendered types of one extraction
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UsedImports {
    imports: IndexMap<String, Import>,
    synthesized: Vec<SynthesizedImport>,
}

impl UsedImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `import` unless its path is already recorded
    pub fn add(&mut self, import: &Import) {
        if !self.imports.contains_key(&import.path) {
            self.imports.insert(import.path.clone(), import.clone());
        }
    }

    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.values()
    }

    pub fn synthesized(&self) -> &[SynthesizedImport] {
        &self.synthesized
    }

    pub fn into_parts(self) -> (Vec<Import>, Vec<SynthesizedImport>) {
        (self.imports.into_values().collect(), self.synthesized)
    }
}

pub struct Qualifier<'a> {
    env: &'a TypeEnv,
    /// Package declaring the contract
    package: PackageId,
    table: &'a [Import],
    /// Names the declaring file already binds, with what they refer to
    bound: HashMap<String, String>,
    used: &'a mut UsedImports,
}

impl<'a> Qualifier<'a> {
    pub fn new(
        env: &'a TypeEnv,
        package: PackageId,
        table: &'a [Import],
        used: &'a mut UsedImports,
    ) -> Self {
        let mut bound = HashMap::new();
        let declaring = env.package(package);
        for name in declaring.scope.keys() {
            bound.insert(name.clone(), format!("declared in package {}", declaring.name));
        }
        for import in table {
            let name = match import.alias.as_str() {
                "_" | "." => continue,
                "" => env
                    .package_by_path(&import.path)
                    .map(|id| env.package(id).name.clone())
                    .unwrap_or_else(|| default_package_name(&import.path)),
                alias => alias.to_string(),
            };
            bound.insert(name, format!("the name of import \"{}\"", import.path));
        }

        Self {
            env,
            package,
            table,
            bound,
            used,
        }
    }

    /// Render `ty` as it must be written in the declaring file
    pub fn type_string(&mut self, ty: TypeId) -> String {
        let env = self.env;
        type_string(env, ty, |id, package| self.qualify(id, package))
    }

    /// Prefix for names declared in `package`; empty for no prefix
    pub fn qualify(&mut self, id: PackageId, package: &Package) -> String {
        if id == self.package {
            return String::new();
        }

        for import in self.table.iter().filter(|i| i.path == package.path) {
            match import.alias.as_str() {
                // Side-effect imports bind no name
                "_" => continue,
                "." => {
                    self.used.add(import);
                    return String::new();
                }
                "" => {
                    self.used.add(import);
                    return package.name.clone();
                }
                alias => {
                    self.used.add(import);
                    return alias.to_string();
                }
            }
        }

        self.synthesize(package)
    }

    fn synthesize(&mut self, package: &Package) -> String {
        let import = Import::new(package.path.clone());
        if self.used.imports.contains_key(&import.path) {
            return package.name.clone();
        }
        self.used.add(&import);

        let collision = self.bound.get(&package.name).cloned().or_else(|| {
            self.used
                .synthesized
                .iter()
                .find(|s| s.name == package.name && s.path != package.path)
                .map(|s| format!("the name of added import \"{}\"", s.path))
        });
        tracing::debug!(path = %package.path, name = %package.name, ?collision, "synthesized import");
        self.used.synthesized.push(SynthesizedImport {
            path: package.path.clone(),
            name: package.name.clone(),
            collision,
        });
        package.name.clone()
    }
}
