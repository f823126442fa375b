//! Package checker
//!
//! Builds the package scope from the parsed files, resolves every import
//! through an `Importer`, then resolves type declarations lazily: a named type
//! is allocated before its right-hand side is resolved, so self references
//! through pointers, slices, maps, channels and signatures simply point back at
//! it. Errors are reported as diagnostics and the offending reference becomes
//! an invalid type; checking never stops early.

use crate::env::{
    DeclRef, DiagnosticId, FileId, Object, ObjectId, ObjectKind, PackageId, PackageKind,
    Position, SourceInfo, TypeEnv, TypeName,
};
use crate::error::TypeDiagnostic;
use crate::importer::{default_package_name, Importer};
use crate::loader::ParsedFile;
use crate::types::{
    Field, Interface, Method, Named, Signature, Term, Type, TypeId, TypeParam, Var,
};
use ifacemock_parser::{
    Decl, FieldDecl, FuncType, Identifier, InterfaceElem, Span, TypeElem, TypeExpr,
    TypeExprKind, TypeSpec,
};
use miette::SourceSpan;
use std::collections::{HashMap, HashSet};

/// Names bound by a file's import declarations
#[derive(Debug, Default)]
struct FileScope {
    imports: HashMap<String, ImportBinding>,
    dot_imports: Vec<PackageId>,
    /// A dot import that failed; undefined names blame it instead of themselves
    failed_dot_import: Option<DiagnosticId>,
}

#[derive(Debug, Clone, Copy)]
enum ImportBinding {
    Package(PackageId),
    Failed(DiagnosticId),
}

/// Type parameters visible while resolving a generic declaration
type TypeParamScope = Vec<(String, TypeId)>;

pub struct Checker<'a> {
    env: &'a mut TypeEnv,
    importer: &'a mut dyn Importer,
    package: PackageId,
    scopes: HashMap<FileId, FileScope>,
    /// Declarations currently being resolved, innermost last
    resolving: Vec<ObjectId>,
}

impl<'a> Checker<'a> {
    /// Register and check one package built from already parsed files
    pub fn check_package(
        env: &'a mut TypeEnv,
        importer: &'a mut dyn Importer,
        path: &str,
        kind: PackageKind,
        files: Vec<ParsedFile>,
    ) -> PackageId {
        let name = files
            .first()
            .map(|f| f.ast.package.name.clone())
            .unwrap_or_else(|| default_package_name(path));
        let _span = tracing::debug_span!("check_package", path, name = %name).entered();

        let package = env.add_package(path, &name, kind);
        let mut checker = Checker {
            env,
            importer,
            package,
            scopes: HashMap::new(),
            resolving: Vec::new(),
        };

        let file_ids: Vec<FileId> = files
            .into_iter()
            .map(|parsed| {
                checker.env.add_file(SourceInfo {
                    name: parsed.name,
                    path: parsed.path,
                    source: parsed.source,
                    ast: parsed.ast,
                    package,
                })
            })
            .collect();

        for &file in &file_ids {
            checker.collect_objects(file);
        }
        for &file in &file_ids {
            checker.resolve_imports(file);
        }

        let objects: Vec<ObjectId> = checker.env.package(package).scope.values().copied().collect();
        for obj in objects {
            if checker.env.type_name(obj).is_some() {
                checker.object_type(obj);
            }
        }
        checker.env.expand_pending_instances();

        tracing::debug!(
            objects = checker.env.package(package).scope.len(),
            diagnostics = checker.env.package(package).diagnostics.len(),
            "package checked"
        );
        package
    }

    fn collect_objects(&mut self, file: FileId) {
        let mut entries: Vec<(Identifier, ObjectKind)> = Vec::new();
        for (index, decl) in self.env.file(file).ast.decls.iter().enumerate() {
            match decl {
                Decl::Type(spec) => entries.push((
                    spec.name.clone(),
                    ObjectKind::TypeName(TypeName {
                        ty: None,
                        type_params: Vec::new(),
                        is_alias: spec.is_alias,
                        decl: Some(DeclRef { file, index }),
                    }),
                )),
                // Methods and init functions are not package-scope names
                Decl::Func(func) if func.receiver.is_none() && func.name.name != "init" => {
                    entries.push((func.name.clone(), ObjectKind::Func))
                }
                Decl::Func(_) => {}
                Decl::Var(spec) => {
                    entries.extend(spec.names.iter().map(|n| (n.clone(), ObjectKind::Var)))
                }
                Decl::Const(spec) => {
                    entries.extend(spec.names.iter().map(|n| (n.clone(), ObjectKind::Const)))
                }
            }
        }

        for (ident, kind) in entries {
            self.declare(file, ident, kind);
        }
    }

    fn declare(&mut self, file: FileId, ident: Identifier, kind: ObjectKind) {
        if ident.is_blank() {
            return;
        }
        if self.env.package(self.package).lookup(&ident.name).is_some() {
            let (file_name, src, span) = self.context(file, ident.span);
            self.env.report(
                self.package,
                TypeDiagnostic::Redeclared {
                    name: ident.name,
                    file: file_name,
                    src,
                    span,
                },
            );
            return;
        }

        let id = self.env.add_object(Object {
            name: ident.name.clone(),
            package: Some(self.package),
            pos: Some(Position {
                file,
                offset: ident.span.start,
            }),
            kind,
        });
        self.env.package_mut(self.package).scope.insert(ident.name, id);
    }

    fn resolve_imports(&mut self, file: FileId) {
        let specs = self.env.file(file).ast.imports.clone();
        let from = self.env.package(self.package).path.clone();
        let mut scope = FileScope::default();

        for spec in specs {
            // Blank imports exist for their side effects only
            if spec.alias.as_deref() == Some("_") {
                continue;
            }

            let binding = match self.importer.import(&mut *self.env, &from, &spec.path) {
                Ok(package) => ImportBinding::Package(package),
                Err(err) => {
                    let (file_name, src, span) = self.context(file, spec.span);
                    let diagnostic = match err {
                        crate::error::ImportError::Cycle { cycle } => TypeDiagnostic::ImportCycle {
                            cycle: cycle.join(" -> "),
                            file: file_name,
                            src,
                            span,
                        },
                        crate::error::ImportError::Load(err) => TypeDiagnostic::ImportFailed {
                            path: spec.path.clone(),
                            reason: err.to_string(),
                            file: file_name,
                            src,
                            span,
                        },
                    };
                    ImportBinding::Failed(self.env.report(self.package, diagnostic))
                }
            };

            match (spec.alias.as_deref(), binding) {
                (Some("."), ImportBinding::Package(package)) => scope.dot_imports.push(package),
                (Some("."), ImportBinding::Failed(diagnostic)) => {
                    scope.failed_dot_import.get_or_insert(diagnostic);
                }
                (Some(alias), binding) => {
                    scope.imports.insert(alias.to_string(), binding);
                }
                (None, binding) => {
                    let name = match binding {
                        ImportBinding::Package(package) => self.env.package(package).name.clone(),
                        ImportBinding::Failed(_) => default_package_name(&spec.path),
                    };
                    scope.imports.insert(name, binding);
                }
            }
        }

        self.scopes.insert(file, scope);
    }

    /// Type of a type-name object, resolving its declaration on first use
    fn object_type(&mut self, obj: ObjectId) -> TypeId {
        let Some(tn) = self.env.type_name(obj).cloned() else {
            return self.env.any_type();
        };
        if let Some(ty) = tn.ty {
            return ty;
        }
        let Some(decl) = tn.decl else {
            return self.env.any_type();
        };
        let Decl::Type(spec) = self.env.file(decl.file).ast.decls[decl.index].clone() else {
            return self.env.any_type();
        };

        tracing::trace!(name = %spec.name.name, "resolving type declaration");
        if tn.is_alias {
            self.resolve_alias(obj, decl.file, &spec)
        } else {
            self.resolve_named(obj, decl.file, &spec)
        }
    }

    fn resolve_alias(&mut self, obj: ObjectId, file: FileId, spec: &TypeSpec) -> TypeId {
        if self.resolving.contains(&obj) {
            let ty = self.report_recursive(file, &spec.name);
            self.set_object_type(obj, ty);
            return ty;
        }

        self.resolving.push(obj);
        let scope = self.declare_type_params(obj, file, spec);
        let ty = self.resolve_expr(file, &spec.ty, &scope);
        self.resolving.pop();

        self.set_object_type(obj, ty);
        ty
    }

    fn resolve_named(&mut self, obj: ObjectId, file: FileId, spec: &TypeSpec) -> TypeId {
        let named = self.env.alloc(Type::Named(Named {
            obj,
            type_args: Vec::new(),
            underlying: None,
        }));
        self.set_object_type(obj, named);

        self.resolving.push(obj);
        let scope = self.declare_type_params(obj, file, spec);
        let rhs = self.resolve_expr(file, &spec.ty, &scope);
        let underlying = match self.env.ty(rhs).clone() {
            Type::Named(inner) => match inner.underlying {
                Some(underlying) => underlying,
                None => match self.env.expand_instance(rhs) {
                    Some(underlying) => underlying,
                    None => self.report_recursive(file, &spec.name),
                },
            },
            _ => rhs,
        };
        self.set_underlying(named, underlying);
        self.resolving.pop();

        if self.contains_itself(named) {
            let invalid = self.report_recursive(file, &spec.name);
            self.set_underlying(named, invalid);
        }
        named
    }

    fn set_object_type(&mut self, obj: ObjectId, ty: TypeId) {
        if let Some(tn) = self.env.type_name_mut(obj) {
            tn.ty = Some(ty);
        }
    }

    fn set_underlying(&mut self, named: TypeId, underlying: TypeId) {
        if let Type::Named(mut n) = self.env.ty(named).clone() {
            n.underlying = Some(underlying);
            self.env.replace(named, Type::Named(n));
        }
    }

    fn report_recursive(&mut self, file: FileId, name: &Identifier) -> TypeId {
        let (file_name, src, span) = self.context(file, name.span);
        let diagnostic = self.env.report(
            self.package,
            TypeDiagnostic::InvalidRecursiveType {
                name: name.name.clone(),
                file: file_name,
                src,
                span,
            },
        );
        self.env.invalid(diagnostic)
    }

    /// Whether a named type contains itself without indirection: as a struct
    /// field, an array element or an embedded interface element
    fn contains_itself(&self, named: TypeId) -> bool {
        let mut visited = HashSet::new();
        let mut work = match self.env.ty(named) {
            Type::Named(n) => n.underlying.into_iter().collect::<Vec<_>>(),
            _ => return false,
        };

        while let Some(current) = work.pop() {
            if current == named {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            match self.env.ty(current) {
                Type::Named(n) => work.extend(n.underlying),
                Type::Array { elem, .. } => work.push(*elem),
                Type::Struct(fields) => work.extend(fields.iter().map(|f| f.ty)),
                Type::Interface(iface) => work.extend(iface.embeddeds.iter().copied()),
                Type::Union(terms) => work.extend(terms.iter().map(|t| t.ty)),
                _ => {}
            }
        }
        false
    }

    fn declare_type_params(&mut self, owner: ObjectId, file: FileId, spec: &TypeSpec) -> TypeParamScope {
        let mut scope = TypeParamScope::new();
        for decl in &spec.type_params {
            for name in &decl.names {
                let placeholder = self.env.any_type();
                let param = self.env.alloc(Type::TypeParam(TypeParam {
                    name: name.name.clone(),
                    index: scope.len(),
                    constraint: placeholder,
                    owner,
                }));
                scope.push((name.name.clone(), param));
            }
        }
        if let Some(tn) = self.env.type_name_mut(owner) {
            tn.type_params = scope.iter().map(|(_, id)| *id).collect();
        }

        // Constraints may mention any parameter of the list, including their own
        let mut index = 0;
        for decl in &spec.type_params {
            let constraint = self.resolve_constraint(file, &decl.constraint, &scope);
            for _ in &decl.names {
                let param = scope[index].1;
                if let Type::TypeParam(mut tp) = self.env.ty(param).clone() {
                    tp.constraint = constraint;
                    self.env.replace(param, Type::TypeParam(tp));
                }
                index += 1;
            }
        }
        scope
    }

    fn resolve_constraint(&mut self, file: FileId, elem: &TypeElem, scope: &TypeParamScope) -> TypeId {
        match elem.single_type() {
            Some(expr) => self.resolve_expr(file, expr, scope),
            None => {
                let union = self.resolve_union(file, elem, scope);
                self.env.alloc(Type::Interface(Interface {
                    methods: Vec::new(),
                    embeddeds: vec![union],
                    implicit: true,
                }))
            }
        }
    }

    fn resolve_union(&mut self, file: FileId, elem: &TypeElem, scope: &TypeParamScope) -> TypeId {
        let mut terms = Vec::with_capacity(elem.terms.len());
        for term in &elem.terms {
            let ty = self.resolve_expr(file, &term.ty, scope);
            terms.push(Term {
                tilde: term.tilde,
                ty,
            });
        }
        self.env.alloc(Type::Union(terms))
    }

    /// Resolve a type expression written in `file`
    fn resolve_expr(&mut self, file: FileId, expr: &TypeExpr, scope: &TypeParamScope) -> TypeId {
        match &expr.kind {
            TypeExprKind::Name {
                package: None,
                name,
                type_args,
            } => self.resolve_local_name(file, name, type_args, scope, expr.span),
            TypeExprKind::Name {
                package: Some(package),
                name,
                type_args,
            } => self.resolve_qualified_name(file, package, name, type_args, scope, expr.span),
            TypeExprKind::Pointer(elem) => {
                let elem = self.resolve_expr(file, elem, scope);
                self.env.alloc(Type::Pointer(elem))
            }
            TypeExprKind::Slice(elem) => {
                let elem = self.resolve_expr(file, elem, scope);
                self.env.alloc(Type::Slice(elem))
            }
            TypeExprKind::Array { len, elem } => {
                let elem = self.resolve_expr(file, elem, scope);
                self.env.alloc(Type::Array {
                    len: len.clone(),
                    elem,
                })
            }
            TypeExprKind::Map { key, value } => {
                let key = self.resolve_expr(file, key, scope);
                let value = self.resolve_expr(file, value, scope);
                self.env.alloc(Type::Map { key, value })
            }
            TypeExprKind::Chan { dir, elem } => {
                let elem = self.resolve_expr(file, elem, scope);
                self.env.alloc(Type::Chan { dir: *dir, elem })
            }
            TypeExprKind::Func(func) => self.resolve_signature(file, func, scope),
            TypeExprKind::Struct(fields) => self.resolve_struct(file, fields, scope),
            TypeExprKind::Interface(elems) => self.resolve_interface(file, elems, scope),
            TypeExprKind::Paren(inner) => self.resolve_expr(file, inner, scope),
        }
    }

    fn resolve_local_name(
        &mut self,
        file: FileId,
        name: &Identifier,
        type_args: &[TypeExpr],
        scope: &TypeParamScope,
        span: Span,
    ) -> TypeId {
        if let Some((_, param)) = scope.iter().rev().find(|(n, _)| *n == name.name) {
            return *param;
        }

        let found = self
            .env
            .package(self.package)
            .lookup(&name.name)
            .or_else(|| self.lookup_dot_imports(file, name))
            .or_else(|| self.env.universe_lookup(&name.name));

        match found {
            Some(obj) => self.type_from_object(file, obj, &name.name, type_args, scope, span),
            None => {
                if let Some(diagnostic) = self.scopes.get(&file).and_then(|s| s.failed_dot_import) {
                    return self.env.invalid(diagnostic);
                }
                let (file_name, src, span) = self.context(file, name.span);
                let diagnostic = self.env.report(
                    self.package,
                    TypeDiagnostic::UndefinedType {
                        name: name.name.clone(),
                        file: file_name,
                        src,
                        span,
                    },
                );
                self.env.invalid(diagnostic)
            }
        }
    }

    /// Exported names of dot-imported packages. A name none of them declares is
    /// attributed to the first opaque dot import, or failing that the first stub.
    fn lookup_dot_imports(&mut self, file: FileId, name: &Identifier) -> Option<ObjectId> {
        if !name.is_exported() {
            return None;
        }
        let packages = self.scopes.get(&file)?.dot_imports.clone();

        if let Some(found) = packages
            .iter()
            .find_map(|&package| self.env.package(package).lookup(&name.name))
        {
            return Some(found);
        }
        let fallback = packages
            .iter()
            .copied()
            .find(|&package| self.env.package(package).kind == PackageKind::Opaque)
            .or_else(|| {
                packages
                    .iter()
                    .copied()
                    .find(|&package| self.env.package(package).resolves_unknown_names())
            })?;
        Some(self.opaque_type_name(fallback, &name.name))
    }

    fn resolve_qualified_name(
        &mut self,
        file: FileId,
        package: &Identifier,
        name: &Identifier,
        type_args: &[TypeExpr],
        scope: &TypeParamScope,
        span: Span,
    ) -> TypeId {
        let binding = self
            .scopes
            .get(&file)
            .and_then(|s| s.imports.get(&package.name))
            .copied();

        let imported = match binding {
            Some(ImportBinding::Package(imported)) => imported,
            Some(ImportBinding::Failed(diagnostic)) => return self.env.invalid(diagnostic),
            None => {
                let (file_name, src, span) = self.context(file, package.span);
                let diagnostic = self.env.report(
                    self.package,
                    TypeDiagnostic::UnknownPackage {
                        name: package.name.clone(),
                        file: file_name,
                        src,
                        span,
                    },
                );
                return self.env.invalid(diagnostic);
            }
        };

        let found = if name.is_exported() {
            match self.env.package(imported).lookup(&name.name) {
                Some(obj) => Some(obj),
                None if self.env.package(imported).resolves_unknown_names() => {
                    Some(self.opaque_type_name(imported, &name.name))
                }
                None => None,
            }
        } else {
            None
        };

        match found {
            Some(obj) => {
                let display = format!("{}.{}", package.name, name.name);
                self.type_from_object(file, obj, &display, type_args, scope, span)
            }
            None => {
                let (file_name, src, span) = self.context(file, name.span);
                let diagnostic = self.env.report(
                    self.package,
                    TypeDiagnostic::UndefinedQualified {
                        package: package.name.clone(),
                        name: name.name.clone(),
                        file: file_name,
                        src,
                        span,
                    },
                );
                self.env.invalid(diagnostic)
            }
        }
    }

    /// Type denoted by a resolved object, instantiating generics
    fn type_from_object(
        &mut self,
        file: FileId,
        obj: ObjectId,
        display: &str,
        type_args: &[TypeExpr],
        scope: &TypeParamScope,
        span: Span,
    ) -> TypeId {
        if self.env.type_name(obj).is_none() {
            let (file_name, src, span) = self.context(file, span);
            let diagnostic = self.env.report(
                self.package,
                TypeDiagnostic::NotAType {
                    name: display.to_string(),
                    file: file_name,
                    src,
                    span,
                },
            );
            return self.env.invalid(diagnostic);
        }

        let ty = self.object_type(obj);
        let params = self
            .env
            .type_name(obj)
            .map(|tn| tn.type_params.len())
            .unwrap_or_default();
        let opaque = matches!(self.env.ty(self.env.underlying(ty)), Type::Opaque);

        if type_args.is_empty() {
            if params == 0 {
                return ty;
            }
            let (file_name, src, span) = self.context(file, span);
            let diagnostic = self.env.report(
                self.package,
                TypeDiagnostic::GenericWithoutInstantiation {
                    name: display.to_string(),
                    file: file_name,
                    src,
                    span,
                },
            );
            return self.env.invalid(diagnostic);
        }

        // Arity of types without declarations is unknown; accept what is written
        if !opaque && type_args.len() != params {
            let (file_name, src, span) = self.context(file, span);
            let diagnostic = self.env.report(
                self.package,
                TypeDiagnostic::WrongTypeArgCount {
                    name: display.to_string(),
                    expected: params,
                    found: type_args.len(),
                    file: file_name,
                    src,
                    span,
                },
            );
            return self.env.invalid(diagnostic);
        }

        let mut args = Vec::with_capacity(type_args.len());
        for arg in type_args {
            args.push(self.resolve_expr(file, arg, scope));
        }
        self.env.instantiate(obj, args)
    }

    /// Type-name object for an exported name of a package without declarations
    fn opaque_type_name(&mut self, package: PackageId, name: &str) -> ObjectId {
        if let Some(existing) = self.env.package(package).lookup(name) {
            return existing;
        }
        tracing::trace!(package = %self.env.package(package).path, name, "opaque type");

        let opaque = self.env.alloc(Type::Opaque);
        let obj = self.env.add_object(Object {
            name: name.to_string(),
            package: Some(package),
            pos: None,
            kind: ObjectKind::TypeName(TypeName {
                ty: None,
                type_params: Vec::new(),
                is_alias: false,
                decl: None,
            }),
        });
        let named = self.env.alloc(Type::Named(Named {
            obj,
            type_args: Vec::new(),
            underlying: Some(opaque),
        }));
        self.set_object_type(obj, named);
        self.env.package_mut(package).scope.insert(name.to_string(), obj);
        obj
    }

    fn resolve_signature(&mut self, file: FileId, func: &FuncType, scope: &TypeParamScope) -> TypeId {
        let mut params = Vec::with_capacity(func.params.len());
        for param in &func.params {
            let mut ty = self.resolve_expr(file, &param.ty, scope);
            if param.variadic {
                ty = self.env.alloc(Type::Slice(ty));
            }
            params.push(Var {
                name: param.name.as_ref().map(|n| n.name.clone()).unwrap_or_default(),
                ty,
                pos: Position {
                    file,
                    offset: param.span.start,
                },
            });
        }

        let mut results = Vec::with_capacity(func.results.len());
        for result in &func.results {
            let ty = self.resolve_expr(file, &result.ty, scope);
            results.push(Var {
                name: result.name.as_ref().map(|n| n.name.clone()).unwrap_or_default(),
                ty,
                pos: Position {
                    file,
                    offset: result.span.start,
                },
            });
        }

        self.env.alloc(Type::Signature(Signature {
            params,
            results,
            variadic: func.is_variadic(),
        }))
    }

    fn resolve_struct(&mut self, file: FileId, fields: &[FieldDecl], scope: &TypeParamScope) -> TypeId {
        let mut resolved = Vec::new();
        for field in fields {
            let ty = self.resolve_expr(file, &field.ty, scope);
            if field.embedded {
                resolved.push(Field {
                    name: embedded_field_name(&field.ty),
                    ty,
                    embedded: true,
                    tag: field.tag.clone(),
                });
                continue;
            }
            for name in &field.names {
                resolved.push(Field {
                    name: name.name.clone(),
                    ty,
                    embedded: false,
                    tag: field.tag.clone(),
                });
            }
        }
        self.env.alloc(Type::Struct(resolved))
    }

    fn resolve_interface(&mut self, file: FileId, elems: &[InterfaceElem], scope: &TypeParamScope) -> TypeId {
        let mut methods: Vec<Method> = Vec::new();
        let mut embeddeds = Vec::new();
        let mut duplicate = None;

        for elem in elems {
            match elem {
                InterfaceElem::Method(method) => {
                    if methods.iter().any(|m| m.name == method.name.name) {
                        let (file_name, src, span) = self.context(file, method.name.span);
                        let diagnostic = self.env.report(
                            self.package,
                            TypeDiagnostic::DuplicateMethod {
                                name: method.name.name.clone(),
                                file: file_name,
                                src,
                                span,
                            },
                        );
                        duplicate.get_or_insert(diagnostic);
                        continue;
                    }
                    let signature = self.resolve_signature(file, &method.signature, scope);
                    methods.push(Method {
                        name: method.name.name.clone(),
                        signature,
                        pos: Position {
                            file,
                            offset: method.name.span.start,
                        },
                    });
                }
                InterfaceElem::Embedded(elem) => match elem.single_type() {
                    Some(expr) => {
                        let ty = self.resolve_expr(file, expr, scope);
                        embeddeds.push(self.check_embedding(file, expr, ty));
                    }
                    None => embeddeds.push(self.resolve_union(file, elem, scope)),
                },
            }
        }

        if let Some(diagnostic) = duplicate {
            return self.env.invalid(diagnostic);
        }
        self.env.alloc(Type::Interface(Interface {
            methods,
            embeddeds,
            implicit: false,
        }))
    }

    /// Embedding a type whose declaration is unavailable would silently drop its methods
    fn check_embedding(&mut self, file: FileId, expr: &TypeExpr, ty: TypeId) -> TypeId {
        let Type::Named(named) = self.env.ty(ty) else {
            return ty;
        };
        let Some(underlying) = named.underlying else {
            return ty;
        };
        if !matches!(self.env.ty(underlying), Type::Opaque) {
            return ty;
        }

        let name = match &expr.kind {
            TypeExprKind::Name {
                package: Some(package),
                name,
                ..
            } => format!("{}.{}", package.name, name.name),
            _ => embedded_field_name(expr),
        };
        let (file_name, src, span) = self.context(file, expr.span);
        let diagnostic = self.env.report(
            self.package,
            TypeDiagnostic::OpaqueEmbedding {
                name,
                file: file_name,
                src,
                span,
            },
        );
        self.env.invalid(diagnostic)
    }

    /// File name, source text and span for a diagnostic
    fn context(&self, file: FileId, span: Span) -> (String, String, SourceSpan) {
        let info = self.env.file(file);
        (info.name.clone(), info.source.clone(), span.to_source_span())
    }
}

/// Implicit field name of an embedded field: the type name without package or pointer
fn embedded_field_name(expr: &TypeExpr) -> String {
    match &expr.kind {
        TypeExprKind::Name { name, .. } => name.name.clone(),
        TypeExprKind::Pointer(inner) | TypeExprKind::Paren(inner) => embedded_field_name(inner),
        _ => String::new(),
    }
}
