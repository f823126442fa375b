//! Unit tests for contract extraction
//!
//! Packages are checked in memory under `example.com/test` without a module,
//! so imports other than the standard-library stubs are opaque.

mod test_qualifier;
mod test_resolver;

use crate::{resolve, ContractDescription, ExtractResult};
use ifacemock_parser::parse_source_file_with_name;
use ifacemock_typechecker::{
    Checker, LoaderConfig, PackageId, PackageKind, ParsedFile, SourceImporter, TypeEnv, TypeId,
};

pub(crate) const TEST_PATH: &str = "example.com/test";

pub(crate) fn check_files(files: &[(&str, &str)]) -> (TypeEnv, PackageId) {
    let mut env = TypeEnv::new();
    let mut importer = SourceImporter::new(LoaderConfig::default(), None);
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

pub(crate) fn resolve_files(files: &[(&str, &str)], name: &str) -> ExtractResult<ContractDescription> {
    let (env, package) = check_files(files);
    resolve(&env, &[package], name)
}

pub(crate) fn resolve_source(source: &str, name: &str) -> ExtractResult<ContractDescription> {
    resolve_files(&[("test.go", source)], name)
}

pub(crate) fn lookup(env: &TypeEnv, package: PackageId, name: &str) -> TypeId {
    let obj = env
        .package(package)
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} should be declared"));
    env.type_name(obj)
        .and_then(|tn| tn.ty)
        .unwrap_or_else(|| panic!("{name} should be a type"))
}

/// `name(params) results` for every method, in order
pub(crate) fn signatures(contract: &ContractDescription) -> Vec<String> {
    contract
        .methods
        .iter()
        .map(|m| {
            let results = m.results_string();
            if results.is_empty() {
                format!("{}({})", m.name, m.params_string())
            } else {
                format!("{}({}) {}", m.name, m.params_string(), results)
            }
        })
        .collect()
}
