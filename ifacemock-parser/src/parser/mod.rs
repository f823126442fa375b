// ifacemock Parser
// Pest-driven parser turning Go source text into the declaration AST

mod decls;
mod types;

use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct GoParser;

impl GoParser {
    /// Parse a complete source file
    pub fn parse_source_file(input: &str) -> ParseResult<SourceFile> {
        Self::parse_source_file_with_name(input, None)
    }

    /// Parse a complete source file, recording its name for diagnostics
    pub fn parse_source_file_with_name(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<SourceFile> {
        let file = source_file
            .clone()
            .unwrap_or_else(|| "<input>".to_string());

        let mut pairs = <GoParser as Parser<Rule>>::parse(Rule::source_file, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string(), file.clone()))?;

        let root = pairs.next().ok_or_else(|| ParseError::UnexpectedToken {
            file: file.clone(),
            src: input.to_string(),
            span: (0, 0).into(),
            expected: "a package clause".to_string(),
        })?;

        Self::build_source_file(root, source_file).map_err(|e| e.with_file(&file))
    }

    /// Parse a single type expression, e.g. `map[string][]*pkg.T`
    pub fn parse_type_expr(input: &str) -> ParseResult<TypeExpr> {
        let file = "<input>".to_string();
        let mut pairs = <GoParser as Parser<Rule>>::parse(Rule::type_expr_input, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string(), file.clone()))?;

        let root = pairs.next().ok_or_else(|| ParseError::UnexpectedToken {
            file: file.clone(),
            src: input.to_string(),
            span: (0, 0).into(),
            expected: "a type".to_string(),
        })?;
        let expr = Self::next_pair(&mut root.clone().into_inner(), &root, "a type")?;
        Self::parse_type(expr)
    }

    /// Build a span from a Pest pair
    pub(crate) fn span_from_pair(pair: &Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }

    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> ParseResult<Identifier> {
        if pair.as_rule() != Rule::identifier && pair.as_rule() != Rule::import_alias {
            return Err(Self::unexpected_token_from_pair(&pair, "an identifier"));
        }
        Ok(Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        })
    }

    /// Take the next pair of a sequence the grammar guarantees to be present
    pub(crate) fn next_pair<'i>(
        pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
        parent: &Pair<'i, Rule>,
        expected: &str,
    ) -> ParseResult<Pair<'i, Rule>> {
        pairs
            .next()
            .ok_or_else(|| Self::unexpected_token_from_pair(parent, expected))
    }

    pub(crate) fn unexpected_token_from_pair(pair: &Pair<Rule>, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            file: String::new(),
            src: pair.get_input().to_string(),
            span: Self::span_from_pair(pair).to_source_span(),
            expected: expected.to_string(),
        }
    }
}

impl ParseError {
    /// Attach the file name to an error raised while walking the parse tree
    pub(crate) fn with_file(mut self, name: &str) -> Self {
        match &mut self {
            ParseError::PestError { file, .. }
            | ParseError::UnexpectedToken { file, .. }
            | ParseError::MixedParameters { file, .. }
            | ParseError::InvalidImportPath { file, .. } => {
                if file.is_empty() {
                    *file = name.to_string();
                }
            }
        }
        self
    }
}

/// Decode a Go string literal: raw strings verbatim, interpreted strings with
/// the common escapes resolved
pub(crate) fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}
