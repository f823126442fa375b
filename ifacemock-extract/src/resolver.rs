//! Contract resolution
//!
//! Finds the named interface among the checked packages of a directory,
//! refuses it when anything reachable from it failed to type-check, flattens
//! the interfaces it embeds breadth-first and describes every method with types
//! qualified for the file declaring the interface.

use crate::error::{ExtractError, ExtractResult};
use crate::imports::import_table;
use crate::model::{
    ContractDescription, MethodDescription, ParamDescription, ResultDescription,
    TypeParamDescription,
};
use crate::ordering::sort_methods;
use crate::qualifier::{Qualifier, UsedImports};
use crate::validate::invalid_reachable;
use ifacemock_typechecker::{
    canonical_string, type_string, variadic_elem, Method, PackageId, Signature, Type, TypeEnv,
    TypeId,
};
use std::collections::{HashMap, HashSet, VecDeque};

/// Resolve `name` in the first of `packages` that declares it
pub fn resolve(env: &TypeEnv, packages: &[PackageId], name: &str) -> ExtractResult<ContractDescription> {
    let _span = tracing::debug_span!("resolve", name).entered();

    let Some((package, obj)) = packages
        .iter()
        .find_map(|&p| env.package(p).lookup(name).map(|obj| (p, obj)))
    else {
        let searched: Vec<&str> = packages.iter().map(|&p| env.package(p).path.as_str()).collect();
        return Err(ExtractError::NotFound {
            name: name.to_string(),
            packages: searched.join(", "),
        });
    };

    let object = env.object(obj);
    let Some(type_name) = env.type_name(obj) else {
        return Err(ExtractError::NotNamedType {
            name: name.to_string(),
            kind: object.kind.describe().to_string(),
        });
    };
    let Some(ty) = type_name.ty else {
        return Err(ExtractError::NotNamedType {
            name: name.to_string(),
            kind: "type without a resolved declaration".to_string(),
        });
    };

    // An invalid underlying type is reported through its diagnostics below
    let broken = matches!(env.ty(env.underlying(ty)), Type::Invalid(_));
    if env.interface(ty).is_none() && !broken {
        let underlying = type_string(env, env.underlying(ty), |_, p| p.name.clone());
        return Err(ExtractError::NotInterface {
            name: name.to_string(),
            underlying,
        });
    }

    let invalid = invalid_reachable(env, ty);
    if !invalid.is_empty() {
        tracing::debug!(count = invalid.len(), "contract reaches invalid types");
        return Err(ExtractError::TypeErrors {
            name: name.to_string(),
            errors: invalid.iter().map(|&id| env.diagnostic(id).clone()).collect(),
        });
    }

    let table = object
        .pos
        .map(|pos| import_table(&env.file(pos.file).ast))
        .unwrap_or_default();
    let mut used = UsedImports::new();

    let (type_params, mut methods) = {
        let mut qualifier = Qualifier::new(env, package, &table, &mut used);
        let type_params = type_name
            .type_params
            .iter()
            .filter_map(|&param| match env.ty(param) {
                Type::TypeParam(tp) => Some((tp.name.clone(), tp.constraint)),
                _ => None,
            })
            .map(|(name, constraint)| TypeParamDescription {
                name,
                constraint: qualifier.type_string(constraint),
            })
            .collect::<Vec<_>>();
        let methods = collect_methods(env, ty, &mut qualifier)?;
        (type_params, methods)
    };
    sort_methods(&mut methods);

    let (imports, synthesized_imports) = used.into_parts();
    tracing::info!(
        methods = methods.len(),
        imports = imports.len(),
        synthesized = synthesized_imports.len(),
        "resolved contract"
    );

    Ok(ContractDescription {
        name: object.name.clone(),
        type_params,
        package: env.package(package).name.clone(),
        imports,
        methods,
        synthesized_imports,
    })
}

/// Interfaces making up `root`, breadth-first, each with its canonical identity
fn flatten(env: &TypeEnv, root: TypeId) -> Vec<(TypeId, String)> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([root]);
    let mut order = Vec::new();

    while let Some(ty) = queue.pop_front() {
        // Unions and other type terms constrain type sets but declare no methods
        let Some(iface) = env.interface(ty) else {
            continue;
        };
        let identity = canonical_string(env, ty);
        if !seen.insert(identity.clone()) {
            continue;
        }
        queue.extend(iface.embeddeds.iter().copied());
        order.push((ty, identity));
    }
    order
}

fn collect_methods(
    env: &TypeEnv,
    root: TypeId,
    qualifier: &mut Qualifier<'_>,
) -> ExtractResult<Vec<MethodDescription>> {
    // method name -> (signature identity, declaring interface)
    let mut produced: HashMap<String, (String, String)> = HashMap::new();
    let mut methods = Vec::new();

    for (ty, contract) in flatten(env, root) {
        let Some(iface) = env.interface(ty) else {
            continue;
        };
        for method in &iface.methods {
            let Type::Signature(sig) = env.ty(method.signature) else {
                return Err(ExtractError::MalformedSignature {
                    method: method.name.clone(),
                });
            };

            let identity = signature_identity(env, sig);
            match produced.get(&method.name) {
                Some((existing, _)) if *existing == identity => {
                    tracing::trace!(method = %method.name, from = %contract, "already declared");
                    continue;
                }
                Some((_, first)) => {
                    return Err(ExtractError::DuplicateMethod {
                        method: method.name.clone(),
                        first: first.clone(),
                        second: contract,
                    });
                }
                None => {}
            }
            produced.insert(method.name.clone(), (identity, contract.clone()));
            methods.push(describe_method(env, qualifier, method, sig, &contract));
        }
    }
    Ok(methods)
}

/// Parameter and result types of a signature, ignoring names
fn signature_identity(env: &TypeEnv, sig: &Signature) -> String {
    let last = sig.params.len().saturating_sub(1);
    let params: Vec<String> = sig
        .params
        .iter()
        .enumerate()
        .map(|(i, var)| {
            if sig.variadic && i == last {
                format!("...{}", canonical_string(env, variadic_elem(env, var.ty)))
            } else {
                canonical_string(env, var.ty)
            }
        })
        .collect();
    let results: Vec<String> = sig.results.iter().map(|var| canonical_string(env, var.ty)).collect();
    format!("({}) ({})", params.join(", "), results.join(", "))
}

fn describe_method(
    env: &TypeEnv,
    qualifier: &mut Qualifier<'_>,
    method: &Method,
    sig: &Signature,
    contract: &str,
) -> MethodDescription {
    let last = sig.params.len().saturating_sub(1);
    let params = sig
        .params
        .iter()
        .enumerate()
        .map(|(i, var)| {
            let variadic = sig.variadic && i == last;
            let ty = if variadic { variadic_elem(env, var.ty) } else { var.ty };
            ParamDescription {
                name: var.name.clone(),
                type_string: qualifier.type_string(ty),
                variadic,
            }
        })
        .collect();
    let results = sig
        .results
        .iter()
        .map(|var| ResultDescription {
            name: var.name.clone(),
            type_string: qualifier.type_string(var.ty),
        })
        .collect();

    MethodDescription {
        name: method.name.clone(),
        source_contract: contract.to_string(),
        position: method.pos,
        params,
        results,
    }
}
