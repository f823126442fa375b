//! Generic instantiation
//!
//! An instance `List[int]` is a `Named` sharing the origin's object with its
//! own type arguments. Its underlying type is the origin's underlying type with
//! every type parameter substituted. Instances are cached per (origin, args), so
//! recursive generic declarations reach a fixed point instead of expanding
//! forever.

use crate::env::{ObjectId, TypeEnv};
use crate::types::{Field, Interface, Method, Named, Signature, Term, Type, TypeId, Var};
use std::collections::HashMap;

type Substitution = HashMap<TypeId, TypeId>;

impl TypeEnv {
    /// Instantiate the generic type declared by `obj` with `args`
    pub(crate) fn instantiate(&mut self, obj: ObjectId, args: Vec<TypeId>) -> TypeId {
        let (origin, params) = match self.type_name(obj) {
            Some(tn) => (tn.ty, tn.type_params.clone()),
            None => (None, Vec::new()),
        };
        // Inside its own declaration a generic type refers to itself as `T[P...]`
        if let Some(origin) = origin {
            if !params.is_empty() && args == params {
                return origin;
            }
        }

        let key = (obj, args.clone());
        if let Some(&existing) = self.instances.get(&key) {
            return existing;
        }

        let instance = self.alloc(Type::Named(Named {
            obj,
            type_args: args,
            underlying: None,
        }));
        self.instances.insert(key, instance);
        self.expand_instance(instance);
        instance
    }

    /// Compute an instance's underlying type once its origin is resolved
    pub(crate) fn expand_instance(&mut self, instance: TypeId) -> Option<TypeId> {
        let Type::Named(named) = self.ty(instance).clone() else {
            return None;
        };
        if let Some(underlying) = named.underlying {
            return Some(underlying);
        }
        if named.type_args.is_empty() {
            return None;
        }

        let tn = self.type_name(named.obj)?.clone();
        let origin_underlying = match self.ty(tn.ty?) {
            Type::Named(origin) => origin.underlying?,
            _ => return None,
        };

        let underlying = if matches!(self.ty(origin_underlying), Type::Opaque) {
            origin_underlying
        } else {
            let substitution: Substitution = tn
                .type_params
                .iter()
                .copied()
                .zip(named.type_args.iter().copied())
                .collect();
            self.subst(origin_underlying, &substitution)
        };

        self.replace(
            instance,
            Type::Named(Named {
                underlying: Some(underlying),
                ..named
            }),
        );
        Some(underlying)
    }

    /// Expand every instance created while its origin was still being resolved
    pub(crate) fn expand_pending_instances(&mut self) {
        loop {
            let pending: Vec<TypeId> = self
                .instances
                .values()
                .copied()
                .filter(|&id| matches!(self.ty(id), Type::Named(n) if n.underlying.is_none()))
                .collect();
            let expanded = pending
                .into_iter()
                .filter_map(|id| self.expand_instance(id))
                .count();
            if expanded == 0 {
                break;
            }
        }
    }

    fn subst(&mut self, ty: TypeId, substitution: &Substitution) -> TypeId {
        if let Some(&replacement) = substitution.get(&ty) {
            return replacement;
        }

        match self.ty(ty).clone() {
            Type::Basic(_) | Type::Invalid(_) | Type::TypeParam(_) | Type::Opaque => ty,
            Type::Named(named) => {
                // A generic origin stands for itself instantiated with its own parameters
                let args = if named.type_args.is_empty() {
                    self.type_name(named.obj)
                        .map(|tn| tn.type_params.clone())
                        .unwrap_or_default()
                } else {
                    named.type_args
                };
                if args.is_empty() {
                    return ty;
                }
                let substituted: Vec<TypeId> = args
                    .iter()
                    .map(|&arg| self.subst(arg, substitution))
                    .collect();
                if substituted == args {
                    ty
                } else {
                    self.instantiate(named.obj, substituted)
                }
            }
            Type::Pointer(elem) => {
                let elem2 = self.subst(elem, substitution);
                self.rebuild(ty, elem == elem2, Type::Pointer(elem2))
            }
            Type::Slice(elem) => {
                let elem2 = self.subst(elem, substitution);
                self.rebuild(ty, elem == elem2, Type::Slice(elem2))
            }
            Type::Array { len, elem } => {
                let elem2 = self.subst(elem, substitution);
                self.rebuild(ty, elem == elem2, Type::Array { len, elem: elem2 })
            }
            Type::Map { key, value } => {
                let key2 = self.subst(key, substitution);
                let value2 = self.subst(value, substitution);
                self.rebuild(
                    ty,
                    key == key2 && value == value2,
                    Type::Map {
                        key: key2,
                        value: value2,
                    },
                )
            }
            Type::Chan { dir, elem } => {
                let elem2 = self.subst(elem, substitution);
                self.rebuild(ty, elem == elem2, Type::Chan { dir, elem: elem2 })
            }
            Type::Signature(sig) => {
                let params = self.subst_vars(&sig.params, substitution);
                let results = self.subst_vars(&sig.results, substitution);
                let unchanged = params == sig.params && results == sig.results;
                self.rebuild(
                    ty,
                    unchanged,
                    Type::Signature(Signature {
                        params,
                        results,
                        variadic: sig.variadic,
                    }),
                )
            }
            Type::Struct(fields) => {
                let substituted: Vec<Field> = fields
                    .iter()
                    .map(|field| Field {
                        ty: self.subst(field.ty, substitution),
                        ..field.clone()
                    })
                    .collect();
                let unchanged = substituted == fields;
                self.rebuild(ty, unchanged, Type::Struct(substituted))
            }
            Type::Interface(iface) => {
                let methods: Vec<Method> = iface
                    .methods
                    .iter()
                    .map(|method| Method {
                        signature: self.subst(method.signature, substitution),
                        ..method.clone()
                    })
                    .collect();
                let embeddeds: Vec<TypeId> = iface
                    .embeddeds
                    .iter()
                    .map(|&embedded| self.subst(embedded, substitution))
                    .collect();
                let unchanged = methods == iface.methods && embeddeds == iface.embeddeds;
                self.rebuild(
                    ty,
                    unchanged,
                    Type::Interface(Interface {
                        methods,
                        embeddeds,
                        implicit: iface.implicit,
                    }),
                )
            }
            Type::Union(terms) => {
                let substituted: Vec<Term> = terms
                    .iter()
                    .map(|term| Term {
                        tilde: term.tilde,
                        ty: self.subst(term.ty, substitution),
                    })
                    .collect();
                let unchanged = substituted == terms;
                self.rebuild(ty, unchanged, Type::Union(substituted))
            }
        }
    }

    fn subst_vars(&mut self, vars: &[Var], substitution: &Substitution) -> Vec<Var> {
        vars.iter()
            .map(|var| Var {
                ty: self.subst(var.ty, substitution),
                ..var.clone()
            })
            .collect()
    }

    fn rebuild(&mut self, original: TypeId, unchanged: bool, ty: Type) -> TypeId {
        if unchanged {
            original
        } else {
            self.alloc(ty)
        }
    }
}
