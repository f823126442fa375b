//! Error types for the type checker and package loader
//!
//! Type errors are collected as diagnostics rather than returned: the checker
//! keeps going so that callers can decide which of them matter. Loading errors
//! (unreadable directories, syntax errors) abort the load.

use ifacemock_parser::ParseError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A type error recorded while checking a package
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum TypeDiagnostic {
    #[error("undefined: {name}")]
    #[diagnostic(
        code(ifacemock::typecheck::undefined_type),
        help("Declare {name} in this package or import the package providing it")
    )]
    UndefinedType {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("not found in this scope")]
        span: SourceSpan,
    },

    #[error("undefined: {package}.{name}")]
    #[diagnostic(
        code(ifacemock::typecheck::undefined_qualified),
        help("Only exported names declared in the imported package can be referenced")
    )]
    UndefinedQualified {
        package: String,
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("no exported type named {name}")]
        span: SourceSpan,
    },

    #[error("undefined: {name}")]
    #[diagnostic(
        code(ifacemock::typecheck::unknown_package),
        help("Add an import declaration for {name} to this file")
    )]
    UnknownPackage {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("not an imported package")]
        span: SourceSpan,
    },

    #[error("{name} is not a type")]
    #[diagnostic(code(ifacemock::typecheck::not_a_type))]
    NotAType {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("used as a type here")]
        span: SourceSpan,
    },

    #[error("{name} redeclared in this block")]
    #[diagnostic(code(ifacemock::typecheck::redeclared))]
    Redeclared {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("already declared")]
        span: SourceSpan,
    },

    #[error("duplicate method {name}")]
    #[diagnostic(code(ifacemock::typecheck::duplicate_method))]
    DuplicateMethod {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("{name} is already declared in this interface")]
        span: SourceSpan,
    },

    #[error("invalid recursive type {name}")]
    #[diagnostic(
        code(ifacemock::typecheck::invalid_recursive_type),
        help("Break the cycle with a pointer, slice, map or function type")
    )]
    InvalidRecursiveType {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("{name} refers to itself")]
        span: SourceSpan,
    },

    #[error("{name} expects {expected} type arguments, found {found}")]
    #[diagnostic(code(ifacemock::typecheck::wrong_type_arg_count))]
    WrongTypeArgCount {
        name: String,
        expected: usize,
        found: usize,
        file: String,
        #[source_code]
        src: String,
        #[label("wrong number of type arguments")]
        span: SourceSpan,
    },

    #[error("cannot use generic type {name} without instantiation")]
    #[diagnostic(code(ifacemock::typecheck::generic_without_instantiation))]
    GenericWithoutInstantiation {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("missing type arguments")]
        span: SourceSpan,
    },

    #[error("could not import {path}: {reason}")]
    #[diagnostic(code(ifacemock::typecheck::import_failed))]
    ImportFailed {
        path: String,
        reason: String,
        file: String,
        #[source_code]
        src: String,
        #[label("imported here")]
        span: SourceSpan,
    },

    #[error("import cycle not allowed: {cycle}")]
    #[diagnostic(code(ifacemock::typecheck::import_cycle))]
    ImportCycle {
        cycle: String,
        file: String,
        #[source_code]
        src: String,
        #[label("this import closes the cycle")]
        span: SourceSpan,
    },

    #[error("cannot embed {name}: its method set is unknown")]
    #[diagnostic(
        code(ifacemock::typecheck::opaque_embedding),
        help("{name} is declared in a package that was not loaded from source")
    )]
    OpaqueEmbedding {
        name: String,
        file: String,
        #[source_code]
        src: String,
        #[label("embedded here")]
        span: SourceSpan,
    },
}

impl TypeDiagnostic {
    /// Name of the file the diagnostic points into
    pub fn file(&self) -> &str {
        match self {
            TypeDiagnostic::UndefinedType { file, .. }
            | TypeDiagnostic::UndefinedQualified { file, .. }
            | TypeDiagnostic::UnknownPackage { file, .. }
            | TypeDiagnostic::NotAType { file, .. }
            | TypeDiagnostic::Redeclared { file, .. }
            | TypeDiagnostic::DuplicateMethod { file, .. }
            | TypeDiagnostic::InvalidRecursiveType { file, .. }
            | TypeDiagnostic::WrongTypeArgCount { file, .. }
            | TypeDiagnostic::GenericWithoutInstantiation { file, .. }
            | TypeDiagnostic::ImportFailed { file, .. }
            | TypeDiagnostic::ImportCycle { file, .. }
            | TypeDiagnostic::OpaqueEmbedding { file, .. } => file,
        }
    }
}

/// Failure to turn a directory into parsed packages
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("failed to read {path}")]
    #[diagnostic(code(ifacemock::typecheck::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("no Go files in {dir}")]
    #[diagnostic(
        code(ifacemock::typecheck::no_go_files),
        help("Point the directory option at a Go package")
    )]
    NoGoFiles { dir: String },

    #[error("invalid go.mod at {path}: {message}")]
    #[diagnostic(code(ifacemock::typecheck::invalid_module_file))]
    InvalidModuleFile { path: String, message: String },
}

/// Failure to resolve an import path to a package
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("import cycle: {}", cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },

    #[error("{0}")]
    Load(#[from] LoadError),
}

pub type LoadResult<T> = Result<T, LoadError>;
