//! Type environment
//!
//! Owns every package, object, source file, type and diagnostic produced by a
//! load. All cross references are plain indices into the arenas held here.

use crate::error::TypeDiagnostic;
use crate::types::{Interface, Type, TypeId};
use crate::universe::Universe;
use ifacemock_parser::SourceFile;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagnosticId(pub(crate) u32);

/// Source position of a declaration. Totally ordered; only meaningful as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub file: FileId,
    pub offset: usize,
}

/// Where a package's declarations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Parsed and checked from `.go` files
    Source,
    /// Built-in declaration stub of a standard-library package. Names missing
    /// from the stub resolve to opaque types.
    Stub,
    /// No declarations available; every exported name is an opaque type
    Opaque,
}

#[derive(Debug, Clone)]
pub struct Package {
    pub path: String,
    pub name: String,
    pub kind: PackageKind,
    pub scope: IndexMap<String, ObjectId>,
    pub files: Vec<FileId>,
    pub diagnostics: Vec<DiagnosticId>,
}

impl Package {
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.scope.get(name).copied()
    }

    /// Unknown exported names in this package become opaque types
    pub fn resolves_unknown_names(&self) -> bool {
        matches!(self.kind, PackageKind::Stub | PackageKind::Opaque)
    }
}

#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    /// `None` for predeclared objects
    pub package: Option<PackageId>,
    pub pos: Option<Position>,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone)]
pub enum ObjectKind {
    TypeName(TypeName),
    Func,
    Var,
    Const,
}

impl ObjectKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ObjectKind::TypeName(_) => "type",
            ObjectKind::Func => "function",
            ObjectKind::Var => "variable",
            ObjectKind::Const => "constant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeName {
    /// Resolved lazily; `None` until the declaration has been checked
    pub ty: Option<TypeId>,
    pub type_params: Vec<TypeId>,
    pub is_alias: bool,
    /// File and index into `SourceFile::decls` of the declaring spec
    pub(crate) decl: Option<DeclRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeclRef {
    pub file: FileId,
    pub index: usize,
}

/// A parsed source file together with its text
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub name: String,
    pub path: Option<PathBuf>,
    pub source: String,
    pub ast: SourceFile,
    pub package: PackageId,
}

#[derive(Debug)]
pub struct TypeEnv {
    types: Vec<Type>,
    objects: Vec<Object>,
    packages: Vec<Package>,
    files: Vec<SourceInfo>,
    diagnostics: Vec<TypeDiagnostic>,
    by_path: HashMap<String, PackageId>,
    pub(crate) universe: Universe,
    pub(crate) instances: HashMap<(ObjectId, Vec<TypeId>), TypeId>,
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv {
    pub fn new() -> Self {
        let mut env = Self {
            types: Vec::new(),
            objects: Vec::new(),
            packages: Vec::new(),
            files: Vec::new(),
            diagnostics: Vec::new(),
            by_path: HashMap::new(),
            universe: Universe::default(),
            instances: HashMap::new(),
        };
        env.install_universe();
        env
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub(crate) fn alloc(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() as u32 - 1)
    }

    pub(crate) fn replace(&mut self, id: TypeId, ty: Type) {
        self.types[id.index()] = ty;
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0 as usize]
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.0 as usize]
    }

    pub(crate) fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() as u32 - 1)
    }

    /// The type-name data of an object, if it declares a type
    pub fn type_name(&self, id: ObjectId) -> Option<&TypeName> {
        match &self.object(id).kind {
            ObjectKind::TypeName(tn) => Some(tn),
            _ => None,
        }
    }

    pub(crate) fn type_name_mut(&mut self, id: ObjectId) -> Option<&mut TypeName> {
        match &mut self.object_mut(id).kind {
            ObjectKind::TypeName(tn) => Some(tn),
            _ => None,
        }
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0 as usize]
    }

    pub(crate) fn package_mut(&mut self, id: PackageId) -> &mut Package {
        &mut self.packages[id.0 as usize]
    }

    pub fn package_by_path(&self, path: &str) -> Option<PackageId> {
        self.by_path.get(path).copied()
    }

    pub(crate) fn add_package(&mut self, path: &str, name: &str, kind: PackageKind) -> PackageId {
        self.packages.push(Package {
            path: path.to_string(),
            name: name.to_string(),
            kind,
            scope: IndexMap::new(),
            files: Vec::new(),
            diagnostics: Vec::new(),
        });
        let id = PackageId(self.packages.len() as u32 - 1);
        self.by_path.insert(path.to_string(), id);
        id
    }

    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages
            .iter()
            .enumerate()
            .map(|(i, p)| (PackageId(i as u32), p))
    }

    pub fn file(&self, id: FileId) -> &SourceInfo {
        &self.files[id.0 as usize]
    }

    pub(crate) fn add_file(&mut self, file: SourceInfo) -> FileId {
        let package = file.package;
        self.files.push(file);
        let id = FileId(self.files.len() as u32 - 1);
        self.package_mut(package).files.push(id);
        id
    }

    pub fn diagnostic(&self, id: DiagnosticId) -> &TypeDiagnostic {
        &self.diagnostics[id.0 as usize]
    }

    /// Record a type error against a package
    pub(crate) fn report(&mut self, package: PackageId, diagnostic: TypeDiagnostic) -> DiagnosticId {
        tracing::debug!(package = %self.package(package).path, "{diagnostic}");
        self.diagnostics.push(diagnostic);
        let id = DiagnosticId(self.diagnostics.len() as u32 - 1);
        self.package_mut(package).diagnostics.push(id);
        id
    }

    /// Allocate an invalid type standing for a reported error
    pub(crate) fn invalid(&mut self, diagnostic: DiagnosticId) -> TypeId {
        self.alloc(Type::Invalid(diagnostic))
    }

    /// Underlying type: named types are unwrapped, everything else is returned as is
    pub fn underlying(&self, id: TypeId) -> TypeId {
        let mut current = id;
        // Alias chains are already collapsed; a named type's underlying is never named
        while let Type::Named(named) = self.ty(current) {
            match named.underlying {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        current
    }

    /// The interface a type denotes, looking through names
    pub fn interface(&self, id: TypeId) -> Option<&Interface> {
        match self.ty(self.underlying(id)) {
            Type::Interface(iface) => Some(iface),
            _ => None,
        }
    }

    /// Package declaring the object behind a named type, if any
    pub fn named_package(&self, id: TypeId) -> Option<PackageId> {
        match self.ty(id) {
            Type::Named(named) => self.object(named.obj).package,
            _ => None,
        }
    }

    /// The predeclared `any` type
    pub fn any_type(&self) -> TypeId {
        self.universe.any
    }

    pub fn universe_lookup(&self, name: &str) -> Option<ObjectId> {
        self.universe.scope.get(name).copied()
    }
}
