//! Unit tests for the type checker
//!
//! Sources are checked in memory under the import path `example.com/test`,
//! without a module, so every non-stub import becomes an opaque package.

mod test_diagnostics;

use crate::{
    type_string, Checker, LoaderConfig, PackageId, PackageKind, ParsedFile, SourceImporter,
    TypeEnv, TypeId,
};
use ifacemock_parser::parse_source_file_with_name;

pub(crate) const TEST_PATH: &str = "example.com/test";

pub(crate) fn check_files_with(config: LoaderConfig, files: &[(&str, &str)]) -> (TypeEnv, PackageId) {
    let mut env = TypeEnv::new();
    let mut importer = SourceImporter::new(config, None);
    let parsed = files
        .iter()
        .map(|(name, source)| ParsedFile {
            name: name.to_string(),
            path: None,
            source: source.to_string(),
            ast: parse_source_file_with_name(source, Some(name.to_string()))
                .expect("test source should parse"),
        })
        .collect();
    let package = Checker::check_package(&mut env, &mut importer, TEST_PATH, PackageKind::Source, parsed);
    (env, package)
}

pub(crate) fn check_files(files: &[(&str, &str)]) -> (TypeEnv, PackageId) {
    check_files_with(LoaderConfig::default(), files)
}

pub(crate) fn check(source: &str) -> (TypeEnv, PackageId) {
    check_files(&[("test.go", source)])
}

/// Type declared by `name` in the checked package
pub(crate) fn lookup(env: &TypeEnv, package: PackageId, name: &str) -> TypeId {
    let obj = env
        .package(package)
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} should be declared"));
    env.type_name(obj)
        .and_then(|tn| tn.ty)
        .unwrap_or_else(|| panic!("{name} should be a resolved type"))
}

/// Render a type the way it would be written inside the checked package
pub(crate) fn render(env: &TypeEnv, package: PackageId, ty: TypeId) -> String {
    type_string(env, ty, |id, pkg| {
        if id == package {
            String::new()
        } else {
            pkg.name.clone()
        }
    })
}

/// Rendering of the underlying type of a declared name
pub(crate) fn underlying(env: &TypeEnv, package: PackageId, name: &str) -> String {
    render(env, package, env.underlying(lookup(env, package, name)))
}

pub(crate) fn diagnostics(env: &TypeEnv, package: PackageId) -> Vec<String> {
    env.package(package)
        .diagnostics
        .iter()
        .map(|&id| env.diagnostic(id).to_string())
        .collect()
}
