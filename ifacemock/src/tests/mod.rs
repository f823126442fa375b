//! Unit tests for mock emission


use ifacemock_extract::{extract, ContractDescription};
use std::fs;
use tempfile::TempDir;

/// Extract `name` from a single-file package holding `source`
pub(crate) fn contract(source: &str, name: &str) -> ContractDescription {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("source.go"), source).expect("write source file");
    extract(dir.path(), name).expect("should extract")
}
