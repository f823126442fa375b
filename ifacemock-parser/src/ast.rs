// ifacemock AST Definitions
// Declaration-level syntax tree for Go source files

/// Source position information for AST nodes (byte offsets into the file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a miette span for diagnostics
    pub fn to_source_span(&self) -> miette::SourceSpan {
        (self.start, self.len()).into()
    }
}

/// Debug information for source preservation and tooling
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugInfo {
    pub source_file: Option<String>,
}

impl DebugInfo {
    pub fn with_source_file(source_file: Option<String>) -> Self {
        Self { source_file }
    }
}

/// A parsed `.go` file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub package: Identifier,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
    pub debug_info: DebugInfo,
    pub span: Span,
}

impl SourceFile {
    /// Iterate over the type specs declared at the top level, in source order
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Type(spec) => Some(spec),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }

    /// Exported identifiers start with an upper-case letter
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// One import spec, e.g. `renamed "text/template"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// `None` when not renamed; `Some("_")` for blank and `Some(".")` for dot imports
    pub alias: Option<String>,
    pub path: String,
    pub span: Span,
}

/// Top-level declarations. Only type declarations are kept in full.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Type(TypeSpec),
    Func(FuncDecl),
    Var(ValueSpec),
    Const(ValueSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Identifier,
    pub type_params: Vec<TypeParamDecl>,
    /// `type A = B`
    pub is_alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

/// A group of type parameters sharing one constraint, e.g. `K, V comparable`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDecl {
    pub names: Vec<Identifier>,
    pub constraint: TypeElem,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Identifier,
    /// Present for methods
    pub receiver: Option<Parameter>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Identifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    /// `Name`, `pkg.Name` or either with type arguments
    Name {
        package: Option<Identifier>,
        name: Identifier,
        type_args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// The length is kept as written
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(FuncType),
    Struct(Vec<FieldDecl>),
    Interface(Vec<InterfaceElem>),
    Paren(Box<TypeExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A function signature; parameter groups are already expanded one entry per name
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<Parameter>,
    pub results: Vec<Parameter>,
    pub span: Span,
}

impl FuncType {
    /// The last parameter is declared `...T`
    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|param| param.variadic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Option<Identifier>,
    /// For a variadic parameter this is the element type as written after `...`
    pub ty: TypeExpr,
    pub variadic: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Empty for an embedded field
    pub names: Vec<Identifier>,
    pub ty: TypeExpr,
    pub embedded: bool,
    pub tag: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    Method(MethodSpec),
    Embedded(TypeElem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: Identifier,
    pub signature: FuncType,
    pub span: Span,
}

/// A union of type terms, e.g. `~int | string`, or a single embedded type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeElem {
    pub terms: Vec<TypeTerm>,
    pub span: Span,
}

impl TypeElem {
    /// A lone non-tilde term, i.e. a plain embedded type
    pub fn single_type(&self) -> Option<&TypeExpr> {
        match self.terms.as_slice() {
            [term] if !term.tilde => Some(&term.ty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTerm {
    pub tilde: bool,
    pub ty: TypeExpr,
    pub span: Span,
}
