//! Method ordering
//!
//! Methods are grouped by the interface declaring them, then kept in source
//! order within it. Positions alone are not enough when the contract spans
//! several files or packages.

use crate::model::MethodDescription;
use std::cmp::Ordering;

pub fn compare_methods(a: &MethodDescription, b: &MethodDescription) -> Ordering {
    a.source_contract
        .cmp(&b.source_contract)
        .then(a.position.cmp(&b.position))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_methods(methods: &mut [MethodDescription]) {
    methods.sort_by(compare_methods);
}
