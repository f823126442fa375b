//! Mock source emission
//!
//! Renders a `<Name>Mock` struct holding a stub function and a call counter
//! per method, a compile-time assertion that the mock satisfies the interface
//! and one forwarding method per contract method.

use ifacemock_extract::{ContractDescription, Import, MethodDescription};
use std::fmt::{self, Write};

const ATOMIC_PATH: &str = "sync/atomic";
const TESTING_PATH: &str = "testing";

/// Go source of the mock for `contract`, laid out the way gofmt would
pub fn render_mock(contract: &ContractDescription) -> Result<String, fmt::Error> {
    let mut imports = contract.imports.clone();
    let atomic = runtime_package(&mut imports, ATOMIC_PATH);
    let testing = runtime_package(&mut imports, TESTING_PATH);

    let mock = format!("{}Mock", contract.name);
    let params = contract.type_param_names();
    let mut out = String::new();

    writeln!(out, "package {}", contract.package)?;
    writeln!(out)?;
    write_imports(&mut out, &imports)?;

    writeln!(out, "// {mock} is a mock implementation of the {}", contract.name)?;
    writeln!(out, "// interface.")?;
    writeln!(out, "type {mock}{} struct {{", contract.type_params_decl())?;
    write_fields(&mut out, contract, &testing)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "// Verify that *{mock} implements {}.", contract.name)?;
    if contract.type_params.is_empty() {
        writeln!(out, "var _ {} = &{mock}{{}}", contract.name)?;
    } else {
        writeln!(out, "func _{}() {{", contract.type_params_decl())?;
        writeln!(out, "\tvar _ {}{params} = &{mock}{params}{{}}", contract.name)?;
        writeln!(out, "}}")?;
    }

    for method in &contract.methods {
        writeln!(out)?;
        write_method(&mut out, contract, method, &atomic)?;
    }
    Ok(out)
}

/// Name the mock uses for a runtime package, adding an import when no usable one exists
fn runtime_package(imports: &mut Vec<Import>, path: &str) -> String {
    let existing = imports
        .iter()
        .find(|import| import.path == path && import.alias != "." && import.alias != "_");
    match existing {
        Some(import) if !import.alias.is_empty() => import.alias.clone(),
        Some(_) => default_name(path).to_string(),
        None => {
            imports.push(Import::new(path));
            default_name(path).to_string()
        }
    }
}

fn default_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Standard-library paths have no dot in their first element
fn is_standard(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| !first.contains('.'))
}

fn write_imports(out: &mut String, imports: &[Import]) -> fmt::Result {
    let (mut standard, mut others): (Vec<&Import>, Vec<&Import>) =
        imports.iter().partition(|import| is_standard(&import.path));
    standard.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.alias.cmp(&b.alias)));
    others.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.alias.cmp(&b.alias)));

    writeln!(out, "import (")?;
    for import in &standard {
        writeln!(out, "\t{import}")?;
    }
    if !standard.is_empty() && !others.is_empty() {
        writeln!(out)?;
    }
    for import in &others {
        writeln!(out, "\t{import}")?;
    }
    writeln!(out, ")")?;
    writeln!(out)
}

fn write_fields(out: &mut String, contract: &ContractDescription, testing: &str) -> fmt::Result {
    let mut fields = vec![("T".to_string(), format!("*{testing}.T"))];
    for method in &contract.methods {
        fields.push((format!("{}Stub", method.name), stub_type(method)));
        fields.push((format!("{}Called", method.name), "int32".to_string()));
    }

    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or_default();
    for (name, ty) in &fields {
        writeln!(out, "\t{name:<width$} {ty}")?;
    }
    Ok(())
}

fn stub_type(method: &MethodDescription) -> String {
    let results = method.results_string();
    if results.is_empty() {
        format!("func({})", method.params_string())
    } else {
        format!("func({}) {results}", method.params_string())
    }
}

fn write_method(
    out: &mut String,
    contract: &ContractDescription,
    method: &MethodDescription,
    atomic: &str,
) -> fmt::Result {
    let name = &method.name;
    let results = method.results_string();
    let results = if results.is_empty() { results } else { format!(" {results}") };

    writeln!(out, "// {name} is a stub for the {}.{name}", contract.name)?;
    writeln!(out, "// method that records the number of times it has been called.")?;
    let m = receiver_name(contract, method, atomic);
    writeln!(
        out,
        "func ({m} *{}Mock{}) {name}({}){results} {{",
        contract.name,
        contract.type_param_names(),
        method.named_params_string()
    )?;
    writeln!(out, "\t{atomic}.AddInt32(&{m}.{name}Called, 1)")?;
    writeln!(out, "\tif {m}.{name}Stub == nil {{")?;
    writeln!(out, "\t\tif {m}.T != nil {{")?;
    writeln!(out, "\t\t\t{m}.T.Error(\"{name}Stub is nil\")")?;
    writeln!(out, "\t\t}}")?;
    writeln!(out, "\t\tpanic(\"{name} unimplemented\")")?;
    writeln!(out, "\t}}")?;
    if method.results.is_empty() {
        writeln!(out, "\t{m}.{name}Stub({})", method.args_string())?;
    } else {
        writeln!(out, "\treturn {m}.{name}Stub({})", method.args_string())?;
    }
    writeln!(out, "}}")
}

/// Receiver name that no parameter, result or type parameter of the method shadows
fn receiver_name(contract: &ContractDescription, method: &MethodDescription, atomic: &str) -> String {
    let taken: Vec<String> = method
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| p.binding(i))
        .chain(method.results.iter().map(|r| r.name.clone()))
        .chain(contract.type_params.iter().map(|tp| tp.name.clone()))
        .chain(std::iter::once(atomic.to_string()))
        .collect();

    ["m", "mock"]
        .into_iter()
        .map(str::to_string)
        .chain((1..).map(|n| format!("m{n}")))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_default()
}
