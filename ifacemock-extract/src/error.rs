//! Extraction errors

use ifacemock_typechecker::{LoadError, TypeDiagnostic};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error("interface not found: {name}")]
    #[diagnostic(
        code(ifacemock::extract::not_found),
        help("None of the packages {packages} declares {name} at package level")
    )]
    NotFound { name: String, packages: String },

    #[error("{name} is not a named type")]
    #[diagnostic(
        code(ifacemock::extract::not_named_type),
        help("{name} is declared as a {kind}")
    )]
    NotNamedType { name: String, kind: String },

    #[error("{name} is not an interface type")]
    #[diagnostic(
        code(ifacemock::extract::not_interface),
        help("The underlying type of {name} is {underlying}")
    )]
    NotInterface { name: String, underlying: String },

    #[error("encountered type errors in the definition of {name}")]
    #[diagnostic(code(ifacemock::extract::type_errors))]
    TypeErrors {
        name: String,
        #[related]
        errors: Vec<TypeDiagnostic>,
    },

    #[error("{method} is not a method signature")]
    #[diagnostic(code(ifacemock::extract::malformed_signature))]
    MalformedSignature { method: String },

    #[error("duplicate method {method}")]
    #[diagnostic(
        code(ifacemock::extract::duplicate_method),
        help("{first} and {second} declare {method} with different signatures")
    )]
    DuplicateMethod {
        method: String,
        first: String,
        second: String,
    },
}

pub type ExtractResult<T> = Result<T, ExtractError>;
