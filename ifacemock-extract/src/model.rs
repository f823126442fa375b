//! Extracted contract model
//!
//! Everything a mock generator needs, with every type already rendered as it
//! must be written in the file that declares the contract.

use ifacemock_typechecker::Position;
use serde::Serialize;
use std::fmt;

/// A resolved interface with its method set flattened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDescription {
    pub name: String,
    /// Empty unless the interface is generic
    pub type_params: Vec<TypeParamDescription>,
    /// Name of the declaring package
    pub package: String,
    /// Imports the rendered types refer to, in order of first use
    pub imports: Vec<Import>,
    pub methods: Vec<MethodDescription>,
    /// Imports that the declaring file does not have but the rendered types need
    pub synthesized_imports: Vec<SynthesizedImport>,
}

impl ContractDescription {
    /// Type parameter list as declared, e.g. `[K comparable, V any]`
    pub fn type_params_decl(&self) -> String {
        bracketed(self.type_params.iter().map(|tp| format!("{} {}", tp.name, tp.constraint)))
    }

    /// Type parameter names as used in an instantiation, e.g. `[K, V]`
    pub fn type_param_names(&self) -> String {
        bracketed(self.type_params.iter().map(|tp| tp.name.clone()))
    }

    /// Whether any synthesized import clashes with a name of the declaring file
    pub fn has_import_collision(&self) -> bool {
        self.synthesized_imports.iter().any(|s| s.collision.is_some())
    }
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("[{}]", items.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParamDescription {
    pub name: String,
    pub constraint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescription {
    pub name: String,
    /// Canonical identity of the interface declaring the method
    pub source_contract: String,
    #[serde(skip)]
    pub position: Position,
    pub params: Vec<ParamDescription>,
    pub results: Vec<ResultDescription>,
}

impl MethodDescription {
    /// Parameters as declared, e.g. `ctx context.Context, _ int, opts ...Option`
    pub fn params_string(&self) -> String {
        self.params
            .iter()
            .map(|p| {
                if p.name.is_empty() {
                    p.declared_type()
                } else {
                    format!("{} {}", p.name, p.declared_type())
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameters with unnamed and blank ones named `paramN`
    pub fn named_params_string(&self) -> String {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}", p.binding(i), p.declared_type()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Arguments forwarding every parameter of `named_params_string`
    pub fn args_string(&self) -> String {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if p.variadic {
                    format!("{}...", p.binding(i))
                } else {
                    p.binding(i)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Results as written after the parameter list; parenthesized when there is
    /// more than one or any is named
    pub fn results_string(&self) -> String {
        let named = self.results.iter().any(|r| !r.name.is_empty());
        let rendered: Vec<String> = self
            .results
            .iter()
            .map(|r| {
                if r.name.is_empty() {
                    r.type_string.clone()
                } else {
                    format!("{} {}", r.name, r.type_string)
                }
            })
            .collect();
        if rendered.len() > 1 || named {
            format!("({})", rendered.join(", "))
        } else {
            rendered.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescription {
    /// Empty when unnamed
    pub name: String,
    /// Element type for a variadic parameter
    pub type_string: String,
    pub variadic: bool,
}

impl ParamDescription {
    /// Type as written in a parameter list
    pub fn declared_type(&self) -> String {
        if self.variadic {
            format!("...{}", self.type_string)
        } else {
            self.type_string.clone()
        }
    }

    /// Name usable as a local variable; `index` is zero-based
    pub fn binding(&self, index: usize) -> String {
        if self.name.is_empty() || self.name == "_" {
            format!("param{}", index + 1)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultDescription {
    pub name: String,
    pub type_string: String,
}

/// One import spec. `alias` is empty when not renamed, `_` for blank and `.`
/// for dot imports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    pub alias: String,
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: String::new(),
            path: path.into(),
        }
    }

    pub fn with_alias(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alias.is_empty() {
            write!(f, "\"{}\"", self.path)
        } else {
            write!(f, "{} \"{}\"", self.alias, self.path)
        }
    }
}

/// An import added because no import of the declaring file could qualify a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedImport {
    pub path: String,
    /// Name the rendered types use for the package
    pub name: String,
    /// What else the name already refers to in the declaring file, if anything
    pub collision: Option<String>,
}

impl fmt::Display for SynthesizedImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "added import \"{}\" as {}", self.path, self.name)?;
        if let Some(collision) = &self.collision {
            write!(f, ", but {} is already {}", self.name, collision)?;
        }
        Ok(())
    }
}
