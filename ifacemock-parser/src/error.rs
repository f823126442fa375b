// ifacemock Parser Error Handling
// Error reporting with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum ParseError {
    #[error("Parse error in {file}")]
    #[diagnostic(
        code(ifacemock::parse::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        file: String,
        #[source_code]
        src: String,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unexpected token in {file}")]
    #[diagnostic(
        code(ifacemock::parse::unexpected_token),
        help("Expected {expected}")
    )]
    UnexpectedToken {
        file: String,
        #[source_code]
        src: String,
        #[label("found this")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Mixed named and unnamed parameters in {file}")]
    #[diagnostic(
        code(ifacemock::parse::mixed_parameters),
        help("Either every parameter in a list has a name or none does")
    )]
    MixedParameters {
        file: String,
        #[source_code]
        src: String,
        #[label("this parameter has no name")]
        span: SourceSpan,
    },

    #[error("Invalid import path {found} in {file}")]
    #[diagnostic(
        code(ifacemock::parse::invalid_import_path),
        help("Import paths are non-empty string literals")
    )]
    InvalidImportPath {
        file: String,
        #[source_code]
        src: String,
        #[label("invalid import path")]
        span: SourceSpan,
        found: String,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String, file: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 0),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<&str> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("expected {}", expected.join(", or "))
            }
            pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError {
            file,
            src,
            span,
            message,
        }
    }

    /// Name of the file the error was reported in
    pub fn file(&self) -> &str {
        match self {
            ParseError::PestError { file, .. }
            | ParseError::UnexpectedToken { file, .. }
            | ParseError::MixedParameters { file, .. }
            | ParseError::InvalidImportPath { file, .. } => file,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::identifier | Rule::qualified_ident => "an identifier",
        Rule::keyword_package | Rule::package_clause => "a package clause",
        Rule::keyword_import | Rule::import_decl => "an import declaration",
        Rule::import_spec | Rule::string_lit => "an import path string",
        Rule::type_decl | Rule::func_decl | Rule::var_decl | Rule::const_decl => {
            "a top-level declaration"
        }
        Rule::type_expr | Rule::type_name => "a type",
        Rule::type_params => "a type parameter list",
        Rule::parameters | Rule::parameter_decl => "a parameter list",
        Rule::method_elem | Rule::type_elem => "an interface element",
        Rule::field_decl => "a struct field",
        Rule::block => "a function body",
        Rule::EOI => "end of file",
        _ => "valid Go syntax",
    }
}
