use super::{render, render_signature};
use crate::{parse_source_file, InterfaceElem, TypeExprKind, TypeSpec};
use pretty_assertions::assert_eq;

/// Helper function to extract the single type spec of a file
fn extract_type_spec(input: &str) -> TypeSpec {
    let file = parse_source_file(input).expect("Failed to parse");
    let spec = file.type_specs().next().cloned();
    spec.expect("Expected a type declaration")
}

fn interface_elems(spec: &TypeSpec) -> &[InterfaceElem] {
    match &spec.ty.kind {
        TypeExprKind::Interface(elems) => elems,
        _ => panic!("Expected interface type"),
    }
}

#[test]
fn test_interface_methods() {
    let input = r#"package example

// MyInterface is documented
type MyInterface interface {
	// Method1 has a comment
	Method1(ctx context.Context) error
	Method2(a, b int) (string, error) // trailing comment
	Method3()
}
"#;
    let spec = extract_type_spec(input);
    assert_eq!(spec.name.name, "MyInterface");

    let methods: Vec<(String, String)> = interface_elems(&spec)
        .iter()
        .map(|elem| match elem {
            InterfaceElem::Method(m) => (m.name.name.clone(), render_signature(&m.signature)),
            InterfaceElem::Embedded(_) => panic!("Expected only methods"),
        })
        .collect();

    assert_eq!(
        methods,
        vec![
            ("Method1".to_string(), "(ctx context.Context) (error)".to_string()),
            ("Method2".to_string(), "(a int, b int) (string, error)".to_string()),
            ("Method3".to_string(), "()".to_string()),
        ]
    );
}

#[test]
fn test_embedded_interfaces() {
    let input = "package a\ntype ReadStringer interface {\n\tio.Reader\n\tfmt.Stringer\n\tLocal\n}\n";
    let spec = extract_type_spec(input);

    let embedded: Vec<String> = interface_elems(&spec)
        .iter()
        .map(|elem| match elem {
            InterfaceElem::Embedded(te) => render(te.single_type().expect("Expected plain type")),
            InterfaceElem::Method(_) => panic!("Expected only embeddings"),
        })
        .collect();

    assert_eq!(embedded, vec!["io.Reader", "fmt.Stringer", "Local"]);
}

#[test]
fn test_union_constraint_elements() {
    let input = "package a\ntype Number interface {\n\t~int | ~int64 | float64\n}\n";
    let spec = extract_type_spec(input);

    match &interface_elems(&spec)[0] {
        InterfaceElem::Embedded(te) => {
            let tildes: Vec<bool> = te.terms.iter().map(|t| t.tilde).collect();
            assert_eq!(tildes, vec![true, true, false]);
            assert!(te.single_type().is_none());
        }
        InterfaceElem::Method(_) => panic!("Expected a type element"),
    }
}

#[test]
fn test_single_line_interface() {
    let spec = extract_type_spec("package a\ntype I interface{ A(); B() int }");

    assert_eq!(interface_elems(&spec).len(), 2);
}

#[test]
fn test_empty_interface() {
    let spec = extract_type_spec("package a\ntype Any interface{}\n");

    assert!(interface_elems(&spec).is_empty());
}

#[test]
fn test_generic_interface() {
    let input = "package a\ntype Store[K comparable, V any] interface {\n\tGet(key K) (V, bool)\n\tPut(key K, value V)\n}\n";
    let spec = extract_type_spec(input);

    let params: Vec<(String, String)> = spec
        .type_params
        .iter()
        .flat_map(|decl| {
            let constraint = render(decl.constraint.single_type().expect("plain constraint"));
            decl.names
                .iter()
                .map(move |n| (n.name.clone(), constraint.clone()))
        })
        .collect();

    assert_eq!(
        params,
        vec![
            ("K".to_string(), "comparable".to_string()),
            ("V".to_string(), "any".to_string()),
        ]
    );
    assert_eq!(interface_elems(&spec).len(), 2);
}

#[test]
fn test_method_with_generic_parameter_types() {
    let input = "package a\ntype Mapper interface {\n\tMap(in List[int], f func(int) string) List[string]\n}\n";
    let spec = extract_type_spec(input);

    match &interface_elems(&spec)[0] {
        InterfaceElem::Method(m) => assert_eq!(
            render_signature(&m.signature),
            "(in List[int], f func(int) (string)) (List[string])"
        ),
        InterfaceElem::Embedded(_) => panic!("Expected a method"),
    }
}
