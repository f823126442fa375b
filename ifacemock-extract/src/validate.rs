//! Type graph validation
//!
//! A contract can only be trusted when every type reachable from it resolved.
//! The walk uses an explicit work list and visited set, so recursive types
//! terminate, and it collects the diagnostic behind every invalid type it
//! reaches rather than stopping at the first.

use ifacemock_typechecker::{DiagnosticId, Type, TypeEnv, TypeId};
use std::collections::{BTreeSet, HashSet};

/// Diagnostics behind the invalid types reachable from `root`, in the order
/// they were reported. Empty when the graph is well formed.
pub fn invalid_reachable(env: &TypeEnv, root: TypeId) -> Vec<DiagnosticId> {
    let mut diagnostics = BTreeSet::new();
    let mut visited = HashSet::new();
    let mut work = vec![root];

    while let Some(ty) = work.pop() {
        if !visited.insert(ty) {
            continue;
        }
        match env.ty(ty) {
            Type::Invalid(diagnostic) => {
                diagnostics.insert(*diagnostic);
            }
            Type::Basic(_) | Type::Opaque => {}
            Type::Named(named) => {
                work.extend(named.underlying);
                work.extend(named.type_args.iter().copied());
            }
            Type::TypeParam(param) => work.push(param.constraint),
            Type::Pointer(elem) | Type::Slice(elem) => work.push(*elem),
            Type::Array { elem, .. } | Type::Chan { elem, .. } => work.push(*elem),
            Type::Map { key, value } => {
                work.push(*key);
                work.push(*value);
            }
            Type::Signature(sig) => {
                work.extend(sig.params.iter().map(|v| v.ty));
                work.extend(sig.results.iter().map(|v| v.ty));
            }
            Type::Struct(fields) => work.extend(fields.iter().map(|f| f.ty)),
            Type::Interface(iface) => {
                work.extend(iface.methods.iter().map(|m| m.signature));
                work.extend(iface.embeddeds.iter().copied());
            }
            Type::Union(terms) => work.extend(terms.iter().map(|t| t.ty)),
        }
    }

    diagnostics.into_iter().collect()
}

/// Whether every type reachable from `root` is well formed
pub fn is_valid(env: &TypeEnv, root: TypeId) -> bool {
    invalid_reachable(env, root).is_empty()
}
