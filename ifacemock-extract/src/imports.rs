//! Import tables

use crate::model::Import;
use ifacemock_parser::SourceFile;

/// Every import spec of a file, in source order
pub fn import_table(file: &SourceFile) -> Vec<Import> {
    file.imports
        .iter()
        .map(|spec| Import {
            alias: spec.alias.clone().unwrap_or_default(),
            path: spec.path.clone(),
        })
        .collect()
}
