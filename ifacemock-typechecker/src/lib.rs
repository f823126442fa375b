//! ifacemock Type Checker
//!
//! Resolves the declarations of Go packages into a type graph. Packages are
//! loaded from a directory, imports inside the enclosing module are followed
//! from source, common standard-library interfaces come from stubs, and every
//! other import becomes an opaque package whose exported names are known to be
//! types but nothing more.
//!
//! Type errors never abort a load. They are collected per package and the
//! failing reference turns into an invalid type that remembers its diagnostic,
//! so consumers can report exactly the errors reachable from what they use.

pub mod checker;
pub mod env;
pub mod error;
pub mod importer;
mod instantiate;
pub mod loader;
pub mod module;
pub mod stdlib;
pub mod types;
pub mod typestring;
mod universe;

pub use checker::Checker;
pub use env::{
    DiagnosticId, FileId, Object, ObjectId, ObjectKind, Package, PackageId, PackageKind,
    Position, SourceInfo, TypeEnv, TypeName,
};
pub use error::{ImportError, LoadError, LoadResult, TypeDiagnostic};
pub use importer::{default_package_name, Importer, SourceImporter};
pub use loader::{parse_dir, LoadedPackages, Loader, LoaderConfig, ParsedFile};
pub use module::Module;
pub use types::{
    BasicKind, ChanDir, Field, Interface, Method, Named, Signature, Term, Type, TypeId,
    TypeParam, Var,
};
pub use typestring::{canonical_string, type_string, variadic_elem, TypeWriter};

#[cfg(test)]
mod tests;
