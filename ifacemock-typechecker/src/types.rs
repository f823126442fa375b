//! Type graph definitions
//!
//! Every type lives in the `TypeEnv` arena and is addressed by a `TypeId`.
//! Graph edges are ids, so recursive declarations (an interface whose method
//! takes the interface itself, a struct holding a pointer to itself) are
//! ordinary cycles in the arena rather than infinite trees.

use crate::env::{DiagnosticId, ObjectId, Position};
pub use ifacemock_parser::ChanDir;

/// Arena index of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Predeclared basic types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// `byte`, kept apart from `uint8` so it prints the way it was written
    Byte,
    /// `rune`, kept apart from `int32` for the same reason
    Rune,
}

impl BasicKind {
    pub const ALL: [BasicKind; 19] = [
        BasicKind::Bool,
        BasicKind::String,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::Byte,
        BasicKind::Rune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
        }
    }
}

/// A node of the type graph
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicKind),
    /// The result of a reference that failed to resolve
    Invalid(DiagnosticId),
    Named(Named),
    TypeParam(TypeParam),
    Pointer(TypeId),
    Slice(TypeId),
    Array { len: String, elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Chan { dir: ChanDir, elem: TypeId },
    Signature(Signature),
    Struct(Vec<Field>),
    Interface(Interface),
    Union(Vec<Term>),
    /// Underlying type of a named type whose declaration is not available
    Opaque,
}

/// A declared type, or an instantiation of a generic one
#[derive(Debug, Clone, PartialEq)]
pub struct Named {
    pub obj: ObjectId,
    /// Empty for non-generic types and for the generic origin itself
    pub type_args: Vec<TypeId>,
    /// `None` only while the declaration is being resolved
    pub underlying: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub index: usize,
    pub constraint: TypeId,
    /// The generic type declaring this parameter
    pub owner: ObjectId,
}

/// A function or method signature
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    /// When set, the last parameter's type is a slice of the declared element type
    pub variadic: bool,
}

/// A parameter or result
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    /// Empty when unnamed
    pub name: String,
    pub ty: TypeId,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    pub embedded: bool,
    pub tag: Option<String>,
}

/// An interface: its explicitly declared methods plus embedded elements
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub methods: Vec<Method>,
    pub embeddeds: Vec<TypeId>,
    /// Constraint written without `interface{}`, e.g. `[T ~int | string]`
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    /// Always a `Type::Signature`
    pub signature: TypeId,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub tilde: bool,
    pub ty: TypeId,
}
