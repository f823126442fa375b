// Parser unit tests, grouped by language area

mod test_interfaces;
mod test_parameters;

use crate::ast::*;

/// Compact rendering of a type expression, used to keep assertions readable
pub(crate) fn render(ty: &TypeExpr) -> String {
    match &ty.kind {
        TypeExprKind::Name {
            package,
            name,
            type_args,
        } => {
            let mut out = match package {
                Some(pkg) => format!("{}.{}", pkg.name, name.name),
                None => name.name.clone(),
            };
            if !type_args.is_empty() {
                let args: Vec<String> = type_args.iter().map(render).collect();
                out.push_str(&format!("[{}]", args.join(", ")));
            }
            out
        }
        TypeExprKind::Pointer(elem) => format!("*{}", render(elem)),
        TypeExprKind::Slice(elem) => format!("[]{}", render(elem)),
        TypeExprKind::Array { len, elem } => format!("[{}]{}", len, render(elem)),
        TypeExprKind::Map { key, value } => format!("map[{}]{}", render(key), render(value)),
        TypeExprKind::Chan { dir, elem } => match dir {
            ChanDir::Both => format!("chan {}", render(elem)),
            ChanDir::Send => format!("chan<- {}", render(elem)),
            ChanDir::Recv => format!("<-chan {}", render(elem)),
        },
        TypeExprKind::Func(func) => format!("func{}", render_signature(func)),
        TypeExprKind::Struct(fields) => format!("struct{{{} fields}}", fields.len()),
        TypeExprKind::Interface(elems) => format!("interface{{{} elems}}", elems.len()),
        TypeExprKind::Paren(inner) => format!("({})", render(inner)),
    }
}

pub(crate) fn render_signature(func: &FuncType) -> String {
    let params: Vec<String> = func.params.iter().map(render_param).collect();
    let results: Vec<String> = func.results.iter().map(render_param).collect();
    match results.len() {
        0 => format!("({})", params.join(", ")),
        _ => format!("({}) ({})", params.join(", "), results.join(", ")),
    }
}

fn render_param(param: &Parameter) -> String {
    let ty = if param.variadic {
        format!("...{}", render(&param.ty))
    } else {
        render(&param.ty)
    };
    match &param.name {
        Some(name) => format!("{} {}", name.name, ty),
        None => ty,
    }
}
