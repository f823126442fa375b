//! Predeclared identifiers

use crate::env::{Object, ObjectId, ObjectKind, Position, TypeEnv, TypeName};
use crate::types::{BasicKind, Interface, Method, Named, Signature, Type, TypeId, Var};
use indexmap::IndexMap;
use std::collections::HashMap;

/// The universe scope: basic types, `error`, `any`, `comparable` and the
/// predeclared constants and functions that are not types
#[derive(Debug, Clone)]
pub(crate) struct Universe {
    pub scope: IndexMap<String, ObjectId>,
    pub basics: HashMap<BasicKind, TypeId>,
    pub any: TypeId,
    pub error: TypeId,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            scope: IndexMap::new(),
            basics: HashMap::new(),
            any: TypeId(0),
            error: TypeId(0),
        }
    }
}

const CONSTANTS: [&str; 4] = ["true", "false", "iota", "nil"];

const BUILTINS: [&str; 18] = [
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

impl TypeEnv {
    pub(crate) fn install_universe(&mut self) {
        for kind in BasicKind::ALL {
            let ty = self.alloc(Type::Basic(kind));
            self.universe.basics.insert(kind, ty);
            self.declare_universe_type(kind.name(), ty, false);
        }

        // any is an alias for the empty interface but prints as `any`
        let any = self.alloc(Type::Interface(Interface {
            methods: Vec::new(),
            embeddeds: Vec::new(),
            implicit: false,
        }));
        self.universe.any = any;
        self.declare_universe_type("any", any, true);

        let string = self.universe.basics[&BasicKind::String];
        let error_obj = self.declare_universe_type("error", string, false);
        let signature = self.alloc(Type::Signature(Signature {
            params: Vec::new(),
            results: vec![Var {
                name: String::new(),
                ty: string,
                pos: universe_position(),
            }],
            variadic: false,
        }));
        let error_iface = self.alloc(Type::Interface(Interface {
            methods: vec![Method {
                name: "Error".to_string(),
                signature,
                pos: universe_position(),
            }],
            embeddeds: Vec::new(),
            implicit: false,
        }));
        let error = self.alloc(Type::Named(Named {
            obj: error_obj,
            type_args: Vec::new(),
            underlying: Some(error_iface),
        }));
        self.universe.error = error;
        if let Some(tn) = self.type_name_mut(error_obj) {
            tn.ty = Some(error);
        }

        let comparable_obj = self.declare_universe_type("comparable", string, false);
        let comparable_iface = self.alloc(Type::Interface(Interface {
            methods: Vec::new(),
            embeddeds: Vec::new(),
            implicit: false,
        }));
        let comparable = self.alloc(Type::Named(Named {
            obj: comparable_obj,
            type_args: Vec::new(),
            underlying: Some(comparable_iface),
        }));
        if let Some(tn) = self.type_name_mut(comparable_obj) {
            tn.ty = Some(comparable);
        }

        for name in CONSTANTS {
            self.declare_universe_object(name, ObjectKind::Const);
        }
        for name in BUILTINS {
            self.declare_universe_object(name, ObjectKind::Func);
        }
    }

    fn declare_universe_type(&mut self, name: &str, ty: TypeId, is_alias: bool) -> ObjectId {
        self.declare_universe_object(
            name,
            ObjectKind::TypeName(TypeName {
                ty: Some(ty),
                type_params: Vec::new(),
                is_alias,
                decl: None,
            }),
        )
    }

    fn declare_universe_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let id = self.add_object(Object {
            name: name.to_string(),
            package: None,
            pos: None,
            kind,
        });
        self.universe.scope.insert(name.to_string(), id);
        id
    }

    /// Arena id of a predeclared basic type
    pub fn basic(&self, kind: BasicKind) -> TypeId {
        self.universe.basics[&kind]
    }

    /// The predeclared `error` type
    pub fn error_type(&self) -> TypeId {
        self.universe.error
    }
}

/// Predeclared methods have no source file; they sort after everything else
fn universe_position() -> Position {
    Position {
        file: crate::env::FileId(u32::MAX),
        offset: 0,
    }
}
