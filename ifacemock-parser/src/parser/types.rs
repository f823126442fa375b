// Type expression parsing module
// Handles type names, composite types, signatures, structs and interfaces

use super::unquote;
use crate::ast::*;
use crate::error::*;
use crate::parser::{GoParser, Rule};
use pest::iterators::Pair;

impl GoParser {
    /// Parse a `type_expr` pair
    pub(crate) fn parse_type(pair: Pair<Rule>) -> ParseResult<TypeExpr> {
        let span = Self::span_from_pair(&pair);
        let parent = pair.clone();
        let inner = if pair.as_rule() == Rule::type_expr {
            Self::next_pair(&mut pair.into_inner(), &parent, "a type")?
        } else {
            pair
        };

        let kind = match inner.as_rule() {
            Rule::type_name => return Self::parse_type_name(inner),
            Rule::paren_type => TypeExprKind::Paren(Box::new(Self::parse_only_type(inner)?)),
            Rule::pointer_type => TypeExprKind::Pointer(Box::new(Self::parse_only_type(inner)?)),
            Rule::slice_type => TypeExprKind::Slice(Box::new(Self::parse_only_type(inner)?)),
            Rule::array_type => {
                let mut len = String::new();
                let mut elem = None;
                for part in inner.clone().into_inner() {
                    match part.as_rule() {
                        Rule::array_len => len = part.as_str().trim().to_string(),
                        Rule::type_expr => elem = Some(Self::parse_type(part)?),
                        _ => {}
                    }
                }
                let elem =
                    elem.ok_or_else(|| Self::unexpected_token_from_pair(&inner, "an element type"))?;
                TypeExprKind::Array {
                    len,
                    elem: Box::new(elem),
                }
            }
            Rule::map_type => {
                let mut types = inner
                    .clone()
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::type_expr);
                let key = Self::parse_type(Self::next_pair(&mut types, &inner, "a key type")?)?;
                let value = Self::parse_type(Self::next_pair(&mut types, &inner, "a value type")?)?;
                TypeExprKind::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            Rule::chan_type => {
                let mut dir = ChanDir::Both;
                let mut elem = None;
                for part in inner.clone().into_inner() {
                    match part.as_rule() {
                        Rule::recv_arrow => dir = ChanDir::Recv,
                        Rule::send_arrow => dir = ChanDir::Send,
                        Rule::type_expr => elem = Some(Self::parse_type(part)?),
                        _ => {}
                    }
                }
                let elem =
                    elem.ok_or_else(|| Self::unexpected_token_from_pair(&inner, "an element type"))?;
                TypeExprKind::Chan {
                    dir,
                    elem: Box::new(elem),
                }
            }
            Rule::func_type => {
                let signature = inner
                    .clone()
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::signature)
                    .ok_or_else(|| Self::unexpected_token_from_pair(&inner, "a signature"))?;
                TypeExprKind::Func(Self::parse_signature(signature)?)
            }
            Rule::struct_type => TypeExprKind::Struct(Self::parse_struct_fields(inner)?),
            Rule::interface_type => TypeExprKind::Interface(Self::parse_interface_elems(inner)?),
            _ => return Err(Self::unexpected_token_from_pair(&inner, "a type")),
        };

        Ok(TypeExpr { kind, span })
    }

    /// Parse the single nested `type_expr` of a wrapper rule
    fn parse_only_type(pair: Pair<Rule>) -> ParseResult<TypeExpr> {
        let parent = pair.clone();
        let inner = pair
            .into_inner()
            .find(|p| p.as_rule() == Rule::type_expr)
            .ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a type"))?;
        Self::parse_type(inner)
    }

    /// Parse `Name`, `pkg.Name`, optionally followed by type arguments
    pub(crate) fn parse_type_name(pair: Pair<Rule>) -> ParseResult<TypeExpr> {
        let span = Self::span_from_pair(&pair);
        let parent = pair.clone();
        let mut inner_pairs = pair.into_inner();

        let ident_pair = Self::next_pair(&mut inner_pairs, &parent, "a type name")?;
        let mut idents = ident_pair
            .into_inner()
            .map(Self::parse_identifier)
            .collect::<ParseResult<Vec<_>>>()?;

        let (package, name) = match idents.len() {
            1 => (None, idents.remove(0)),
            2 => {
                let name = idents.remove(1);
                (Some(idents.remove(0)), name)
            }
            _ => return Err(Self::unexpected_token_from_pair(&parent, "a type name")),
        };

        let mut type_args = Vec::new();
        if let Some(args_pair) = inner_pairs.next() {
            if args_pair.as_rule() == Rule::type_args {
                for arg in args_pair.into_inner() {
                    if arg.as_rule() == Rule::type_expr {
                        type_args.push(Self::parse_type(arg)?);
                    }
                }
            }
        }

        Ok(TypeExpr {
            kind: TypeExprKind::Name {
                package,
                name,
                type_args,
            },
            span,
        })
    }

    /// Parse a signature: parameters plus an optional result
    pub(crate) fn parse_signature(pair: Pair<Rule>) -> ParseResult<FuncType> {
        let span = Self::span_from_pair(&pair);
        let mut params = Vec::new();
        let mut results = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::parameters => params = Self::parse_parameters(inner)?,
                Rule::result => {
                    let parent = inner.clone();
                    let result = Self::next_pair(&mut inner.into_inner(), &parent, "a result")?;
                    results = match result.as_rule() {
                        Rule::parameters => Self::parse_parameters(result)?,
                        _ => {
                            let ty = Self::parse_type(result)?;
                            vec![Parameter {
                                name: None,
                                span: ty.span,
                                ty,
                                variadic: false,
                            }]
                        }
                    };
                    if let Some(bad) = results.iter().find(|r| r.variadic) {
                        return Err(ParseError::UnexpectedToken {
                            file: String::new(),
                            src: parent.get_input().to_string(),
                            span: bad.span.to_source_span(),
                            expected: "a result type without ...".to_string(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(FuncType {
            params,
            results,
            span,
        })
    }

    /// Parse a parenthesized parameter list, applying Go's grouping rule:
    /// in `(a, b int)` the bare names take the type of the next named entry.
    pub(crate) fn parse_parameters(pair: Pair<Rule>) -> ParseResult<Vec<Parameter>> {
        let src = pair.get_input();
        let mut entries = Vec::new();

        for decl in pair.clone().into_inner() {
            if decl.as_rule() != Rule::parameter_decl {
                continue;
            }
            let parent = decl.clone();
            let entry = Self::next_pair(&mut decl.into_inner(), &parent, "a parameter")?;
            let span = Self::span_from_pair(&entry);
            let mut name = None;
            let mut variadic = false;
            let mut ty = None;

            for part in entry.into_inner() {
                match part.as_rule() {
                    Rule::identifier => name = Some(Self::parse_identifier(part)?),
                    Rule::variadic => variadic = true,
                    Rule::type_expr => ty = Some(Self::parse_type(part)?),
                    _ => {}
                }
            }

            let ty = ty.ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a type"))?;
            entries.push(Parameter {
                name,
                ty,
                variadic,
                span,
            });
        }

        let params = if entries.iter().any(|e| e.name.is_some()) {
            Self::group_named_parameters(entries, src)?
        } else {
            entries
        };

        if let Some(bad) = params
            .iter()
            .rev()
            .skip(1)
            .find(|param| param.variadic)
        {
            return Err(ParseError::UnexpectedToken {
                file: String::new(),
                src: src.to_string(),
                span: bad.span.to_source_span(),
                expected: "... only on the final parameter".to_string(),
            });
        }

        Ok(params)
    }

    fn group_named_parameters(entries: Vec<Parameter>, src: &str) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::with_capacity(entries.len());
        let mut pending: Vec<Identifier> = Vec::new();

        for entry in entries {
            if entry.name.is_some() {
                if entry.variadic && !pending.is_empty() {
                    return Err(ParseError::UnexpectedToken {
                        file: String::new(),
                        src: src.to_string(),
                        span: entry.span.to_source_span(),
                        expected: "... only on the final parameter".to_string(),
                    });
                }
                for name in pending.drain(..) {
                    params.push(Parameter {
                        span: name.span,
                        name: Some(name),
                        ty: entry.ty.clone(),
                        variadic: false,
                    });
                }
                params.push(entry);
                continue;
            }

            match &entry.ty.kind {
                TypeExprKind::Name {
                    package: None,
                    name,
                    type_args,
                } if type_args.is_empty() && !entry.variadic => pending.push(name.clone()),
                _ => {
                    return Err(ParseError::MixedParameters {
                        file: String::new(),
                        src: src.to_string(),
                        span: entry.span.to_source_span(),
                    })
                }
            }
        }

        if let Some(dangling) = pending.first() {
            return Err(ParseError::MixedParameters {
                file: String::new(),
                src: src.to_string(),
                span: dangling.span.to_source_span(),
            });
        }

        Ok(params)
    }

    /// Parse struct fields, expanding `a, b int` into one declaration with two names
    pub(crate) fn parse_struct_fields(pair: Pair<Rule>) -> ParseResult<Vec<FieldDecl>> {
        let mut fields = Vec::new();

        for field_pair in pair.into_inner() {
            if field_pair.as_rule() != Rule::field_decl {
                continue;
            }
            let span = Self::span_from_pair(&field_pair);
            let parent = field_pair.clone();
            let mut names = Vec::new();
            let mut ty = None;
            let mut embedded = false;
            let mut tag = None;

            for part in field_pair.into_inner() {
                match part.as_rule() {
                    Rule::named_fields => {
                        for item in part.into_inner() {
                            match item.as_rule() {
                                Rule::identifier_list => names = Self::parse_identifier_list(item)?,
                                Rule::type_expr => ty = Some(Self::parse_type(item)?),
                                _ => {}
                            }
                        }
                    }
                    Rule::embedded_field => {
                        embedded = true;
                        let embedded_span = Self::span_from_pair(&part);
                        let mut pointer = false;
                        for item in part.into_inner() {
                            match item.as_rule() {
                                Rule::pointer_marker => pointer = true,
                                Rule::type_name => {
                                    let name = Self::parse_type_name(item)?;
                                    ty = Some(if pointer {
                                        TypeExpr {
                                            kind: TypeExprKind::Pointer(Box::new(name)),
                                            span: embedded_span,
                                        }
                                    } else {
                                        name
                                    });
                                }
                                _ => {}
                            }
                        }
                    }
                    Rule::field_tag => {
                        tag = part.into_inner().next().and_then(|lit| unquote(lit.as_str()));
                    }
                    _ => {}
                }
            }

            let ty = ty.ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a field type"))?;
            fields.push(FieldDecl {
                names,
                ty,
                embedded,
                tag,
                span,
            });
        }

        Ok(fields)
    }

    /// Parse interface elements: method specs and embedded type elements
    pub(crate) fn parse_interface_elems(pair: Pair<Rule>) -> ParseResult<Vec<InterfaceElem>> {
        let mut elems = Vec::new();

        for elem in pair.into_inner() {
            match elem.as_rule() {
                Rule::method_elem => {
                    let span = Self::span_from_pair(&elem);
                    let parent = elem.clone();
                    let mut inner_pairs = elem.into_inner();
                    let name = Self::parse_identifier(Self::next_pair(
                        &mut inner_pairs,
                        &parent,
                        "a method name",
                    )?)?;
                    let signature = Self::parse_signature(Self::next_pair(
                        &mut inner_pairs,
                        &parent,
                        "a method signature",
                    )?)?;
                    elems.push(InterfaceElem::Method(MethodSpec {
                        name,
                        signature,
                        span,
                    }));
                }
                Rule::type_elem => elems.push(InterfaceElem::Embedded(Self::parse_type_elem(elem)?)),
                _ => {}
            }
        }

        Ok(elems)
    }

    /// Parse a union of type terms
    pub(crate) fn parse_type_elem(pair: Pair<Rule>) -> ParseResult<TypeElem> {
        let span = Self::span_from_pair(&pair);
        let mut terms = Vec::new();

        for term in pair.into_inner() {
            if term.as_rule() != Rule::type_term {
                continue;
            }
            let term_span = Self::span_from_pair(&term);
            let parent = term.clone();
            let mut tilde = false;
            let mut ty = None;
            for part in term.into_inner() {
                match part.as_rule() {
                    Rule::tilde => tilde = true,
                    Rule::type_expr => ty = Some(Self::parse_type(part)?),
                    _ => {}
                }
            }
            let ty = ty.ok_or_else(|| Self::unexpected_token_from_pair(&parent, "a type"))?;
            terms.push(TypeTerm {
                tilde,
                ty,
                span: term_span,
            });
        }

        Ok(TypeElem { terms, span })
    }
}
