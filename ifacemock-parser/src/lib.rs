// ifacemock Parser Library
// Pest-based parser for the declarations of Go source files

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::GoParser;

// Re-export parser rule for manual testing
pub use parser::Rule;

// Main parsing functions
pub fn parse_source_file(input: &str) -> Result<SourceFile, ParseError> {
    parser::GoParser::parse_source_file(input)
}

pub fn parse_source_file_with_name(
    input: &str,
    source_file: Option<String>,
) -> Result<SourceFile, ParseError> {
    parser::GoParser::parse_source_file_with_name(input, source_file)
}

pub fn parse_type_expr(input: &str) -> Result<TypeExpr, ParseError> {
    parser::GoParser::parse_type_expr(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
