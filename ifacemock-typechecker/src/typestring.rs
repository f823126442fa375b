//! Type strings
//!
//! Renders types as Go source text. Package-level names are prefixed by
//! whatever the qualifier callback returns for their package (nothing when it
//! returns an empty string); predeclared names are never qualified.

use crate::env::{Package, PackageId, TypeEnv};
use crate::types::{ChanDir, Signature, Type, TypeId, Var};

pub struct TypeWriter<'e, Q>
where
    Q: FnMut(PackageId, &Package) -> String,
{
    env: &'e TypeEnv,
    qualifier: Q,
    buf: String,
}

/// Render `ty`, qualifying package-level names through `qualifier`
pub fn type_string<Q>(env: &TypeEnv, ty: TypeId, qualifier: Q) -> String
where
    Q: FnMut(PackageId, &Package) -> String,
{
    let mut writer = TypeWriter::new(env, qualifier);
    writer.write_type(ty);
    writer.finish()
}

/// Canonical identity of a type: its rendering with full package paths
pub fn canonical_string(env: &TypeEnv, ty: TypeId) -> String {
    type_string(env, ty, |_, package| package.path.clone())
}

impl<'e, Q> TypeWriter<'e, Q>
where
    Q: FnMut(PackageId, &Package) -> String,
{
    pub fn new(env: &'e TypeEnv, qualifier: Q) -> Self {
        Self {
            env,
            qualifier,
            buf: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    pub fn write_type(&mut self, ty: TypeId) {
        let env = self.env;
        if ty == env.any_type() {
            self.buf.push_str("any");
            return;
        }

        match env.ty(ty) {
            Type::Basic(kind) => self.buf.push_str(kind.name()),
            Type::Invalid(_) => self.buf.push_str("invalid type"),
            Type::Named(named) => {
                let object = env.object(named.obj);
                if let Some(package) = object.package {
                    let prefix = (self.qualifier)(package, env.package(package));
                    if !prefix.is_empty() {
                        self.buf.push_str(&prefix);
                        self.buf.push('.');
                    }
                }
                self.buf.push_str(&object.name);
                // The generic origin is written with its own parameters
                let args = if named.type_args.is_empty() {
                    env.type_name(named.obj)
                        .map(|tn| tn.type_params.as_slice())
                        .unwrap_or_default()
                } else {
                    named.type_args.as_slice()
                };
                if !args.is_empty() {
                    self.buf.push('[');
                    self.write_list(args, ", ");
                    self.buf.push(']');
                }
            }
            Type::TypeParam(param) => self.buf.push_str(&param.name),
            Type::Pointer(elem) => {
                self.buf.push('*');
                self.write_type(*elem);
            }
            Type::Slice(elem) => {
                self.buf.push_str("[]");
                self.write_type(*elem);
            }
            Type::Array { len, elem } => {
                self.buf.push('[');
                self.buf.push_str(len);
                self.buf.push(']');
                self.write_type(*elem);
            }
            Type::Map { key, value } => {
                self.buf.push_str("map[");
                self.write_type(*key);
                self.buf.push(']');
                self.write_type(*value);
            }
            Type::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                };
                // `chan (<-chan T)` needs parentheses to keep its meaning
                let parens = *dir == ChanDir::Both
                    && matches!(env.ty(*elem), Type::Chan { dir: ChanDir::Recv, .. });
                self.buf.push_str(prefix);
                if parens {
                    self.buf.push('(');
                }
                self.write_type(*elem);
                if parens {
                    self.buf.push(')');
                }
            }
            Type::Signature(sig) => {
                self.buf.push_str("func");
                self.write_signature(sig);
            }
            Type::Struct(fields) => {
                self.buf.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str("; ");
                    }
                    if !field.embedded {
                        self.buf.push_str(&field.name);
                        self.buf.push(' ');
                    }
                    self.write_type(field.ty);
                    if let Some(tag) = &field.tag {
                        self.buf.push(' ');
                        self.buf.push_str(&quote(tag));
                    }
                }
                self.buf.push('}');
            }
            Type::Interface(iface) => {
                if iface.implicit && iface.methods.is_empty() && iface.embeddeds.len() == 1 {
                    self.write_type(iface.embeddeds[0]);
                    return;
                }
                self.buf.push_str("interface{");
                for (i, method) in iface.methods.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str("; ");
                    }
                    self.buf.push_str(&method.name);
                    if let Type::Signature(sig) = env.ty(method.signature) {
                        self.write_signature(sig);
                    }
                }
                for (i, embedded) in iface.embeddeds.iter().enumerate() {
                    if i > 0 || !iface.methods.is_empty() {
                        self.buf.push_str("; ");
                    }
                    self.write_type(*embedded);
                }
                self.buf.push('}');
            }
            Type::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(" | ");
                    }
                    if term.tilde {
                        self.buf.push('~');
                    }
                    self.write_type(term.ty);
                }
            }
            Type::Opaque => self.buf.push_str("opaque type"),
        }
    }

    /// Parameters and results, without the leading `func`
    pub fn write_signature(&mut self, sig: &Signature) {
        self.buf.push('(');
        self.write_vars(&sig.params, sig.variadic);
        self.buf.push(')');

        match sig.results.as_slice() {
            [] => {}
            [single] if single.name.is_empty() => {
                self.buf.push(' ');
                self.write_type(single.ty);
            }
            results => {
                self.buf.push_str(" (");
                self.write_vars(results, false);
                self.buf.push(')');
            }
        }
    }

    fn write_vars(&mut self, vars: &[Var], variadic: bool) {
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            if !var.name.is_empty() {
                self.buf.push_str(&var.name);
                self.buf.push(' ');
            }
            if variadic && i == vars.len() - 1 {
                self.buf.push_str("...");
                self.write_type(variadic_elem(self.env, var.ty));
            } else {
                self.write_type(var.ty);
            }
        }
    }

    fn write_list(&mut self, types: &[TypeId], separator: &str) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(separator);
            }
            self.write_type(*ty);
        }
    }
}

/// Element type of a variadic parameter, whose recorded type is `[]elem`
pub fn variadic_elem(env: &TypeEnv, ty: TypeId) -> TypeId {
    match env.ty(ty) {
        Type::Slice(elem) => *elem,
        _ => ty,
    }
}

/// Go-style double-quoted string literal
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
