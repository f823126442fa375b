// Declaration parsing module
// Handles the package clause, imports and top-level declarations

use super::unquote;
use crate::ast::*;
use crate::error::*;
use crate::parser::{GoParser, Rule};
use pest::iterators::Pair;

impl GoParser {
    pub(crate) fn build_source_file(
        pair: Pair<Rule>,
        source_file: Option<String>,
    ) -> ParseResult<SourceFile> {
        let span = Self::span_from_pair(&pair);
        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::package_clause => {
                    package = Some(Self::parse_package_clause(inner)?);
                }
                Rule::import_decl => {
                    imports.extend(Self::parse_import_decl(inner)?);
                }
                Rule::type_decl => {
                    decls.extend(Self::parse_type_decl(inner)?.into_iter().map(Decl::Type));
                }
                Rule::func_decl => {
                    decls.push(Decl::Func(Self::parse_func_decl(inner)?));
                }
                Rule::var_decl => {
                    decls.extend(Self::parse_value_decl(inner)?.into_iter().map(Decl::Var));
                }
                Rule::const_decl => {
                    decls.extend(Self::parse_value_decl(inner)?.into_iter().map(Decl::Const));
                }
                Rule::EOI => {}
                _ => {
                    return Err(Self::unexpected_token_from_pair(
                        &inner,
                        "a top-level declaration",
                    ))
                }
            }
        }

        let package = package.ok_or_else(|| ParseError::UnexpectedToken {
            file: String::new(),
            src: String::new(),
            span: span.to_source_span(),
            expected: "a package clause".to_string(),
        })?;

        Ok(SourceFile {
            package,
            imports,
            decls,
            debug_info: DebugInfo::with_source_file(source_file),
            span,
        })
    }

    fn parse_package_clause(pair: Pair<Rule>) -> ParseResult<Identifier> {
        let parent = pair.clone();
        let name = pair
            .into_inner()
            .find(|p| p.as_rule() == Rule::identifier)
            .ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a package name"))?;
        Self::parse_identifier(name)
    }

    /// Parse `import "x"` or a grouped `import ( ... )`
    pub(crate) fn parse_import_decl(pair: Pair<Rule>) -> ParseResult<Vec<ImportSpec>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::import_spec)
            .map(Self::parse_import_spec)
            .collect()
    }

    fn parse_import_spec(pair: Pair<Rule>) -> ParseResult<ImportSpec> {
        let span = Self::span_from_pair(&pair);
        let mut alias = None;
        let mut path = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::import_alias => alias = Some(inner.as_str().to_string()),
                Rule::string_lit => {
                    let decoded = unquote(inner.as_str()).filter(|p| !p.is_empty());
                    match decoded {
                        Some(decoded) => path = Some(decoded),
                        None => {
                            return Err(ParseError::InvalidImportPath {
                                file: String::new(),
                                src: inner.get_input().to_string(),
                                span: Self::span_from_pair(&inner).to_source_span(),
                                found: inner.as_str().to_string(),
                            })
                        }
                    }
                }
                _ => {}
            }
        }

        let path = path.ok_or_else(|| ParseError::InvalidImportPath {
            file: String::new(),
            src: String::new(),
            span: span.to_source_span(),
            found: String::new(),
        })?;

        Ok(ImportSpec { alias, path, span })
    }

    /// Parse `type X ...` or a grouped `type ( ... )`
    pub(crate) fn parse_type_decl(pair: Pair<Rule>) -> ParseResult<Vec<TypeSpec>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::type_spec)
            .map(Self::parse_type_spec)
            .collect()
    }

    fn parse_type_spec(pair: Pair<Rule>) -> ParseResult<TypeSpec> {
        let span = Self::span_from_pair(&pair);
        let parent = pair.clone();
        let mut inner_pairs = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner_pairs, &parent, "a type name")?)?;
        let mut type_params = Vec::new();
        let mut is_alias = false;
        let mut ty = None;

        for inner in inner_pairs {
            match inner.as_rule() {
                Rule::type_params => type_params = Self::parse_type_params(inner)?,
                Rule::alias_marker => is_alias = true,
                Rule::type_expr => ty = Some(Self::parse_type(inner)?),
                _ => {}
            }
        }

        let ty = ty.ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a type"))?;

        Ok(TypeSpec {
            name,
            type_params,
            is_alias,
            ty,
            span,
        })
    }

    /// Parse a type parameter list such as `[K comparable, V any]`
    pub(crate) fn parse_type_params(pair: Pair<Rule>) -> ParseResult<Vec<TypeParamDecl>> {
        let mut decls = Vec::new();

        for decl_pair in pair.into_inner() {
            if decl_pair.as_rule() != Rule::type_param_decl {
                continue;
            }
            let span = Self::span_from_pair(&decl_pair);
            let parent = decl_pair.clone();
            let mut inner_pairs = decl_pair.into_inner();

            let names = Self::parse_identifier_list(Self::next_pair(
                &mut inner_pairs,
                &parent,
                "type parameter names",
            )?)?;
            let constraint =
                Self::parse_type_elem(Self::next_pair(&mut inner_pairs, &parent, "a constraint")?)?;

            decls.push(TypeParamDecl {
                names,
                constraint,
                span,
            });
        }

        Ok(decls)
    }

    pub(crate) fn parse_identifier_list(pair: Pair<Rule>) -> ParseResult<Vec<Identifier>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::identifier)
            .map(Self::parse_identifier)
            .collect()
    }

    /// Functions and methods only contribute their name and receiver; bodies are skipped
    fn parse_func_decl(pair: Pair<Rule>) -> ParseResult<FuncDecl> {
        let span = Self::span_from_pair(&pair);
        let parent = pair.clone();
        let mut name = None;
        let mut receiver = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::receiver => {
                    let params_pair = inner
                        .into_inner()
                        .next()
                        .ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a receiver"))?;
                    receiver = Self::parse_parameters(params_pair)?.into_iter().next();
                }
                Rule::identifier if name.is_none() => {
                    name = Some(Self::parse_identifier(inner)?);
                }
                _ => {}
            }
        }

        let name = name.ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a function name"))?;

        Ok(FuncDecl {
            name,
            receiver,
            span,
        })
    }

    /// `var`/`const` declarations contribute the declared names only
    fn parse_value_decl(pair: Pair<Rule>) -> ParseResult<Vec<ValueSpec>> {
        let mut specs = Vec::new();

        for spec_pair in pair.into_inner() {
            if spec_pair.as_rule() != Rule::value_spec {
                continue;
            }
            let span = Self::span_from_pair(&spec_pair);
            let parent = spec_pair.clone();
            let names_pair = spec_pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::identifier_list)
                .ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a name"))?;

            specs.push(ValueSpec {
                names: Self::parse_identifier_list(names_pair)?,
                span,
            });
        }

        Ok(specs)
    }
}
