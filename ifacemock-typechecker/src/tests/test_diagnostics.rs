use super::*;
use crate::{TypeDiagnostic, Type};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_undefined_type_becomes_invalid_with_its_diagnostic() {
    let (env, package) = check(indoc! {r#"
        package test

        type Holder struct {
            value Missing
        }
    "#});

    assert_eq!(diagnostics(&env, package), vec!["undefined: Missing".to_string()]);

    let Type::Struct(fields) = env.ty(env.underlying(lookup(&env, package, "Holder"))) else {
        panic!("Holder should be a struct");
    };
    let Type::Invalid(diagnostic) = env.ty(fields[0].ty) else {
        panic!("field type should be invalid");
    };
    assert!(matches!(
        env.diagnostic(*diagnostic),
        TypeDiagnostic::UndefinedType { name, .. } if name == "Missing"
    ));
}

#[test]
fn test_diagnostic_points_at_the_reference() {
    let source = "package test\n\ntype T []Missing\n";
    let (env, package) = check(source);

    let id = env.package(package).diagnostics[0];
    let TypeDiagnostic::UndefinedType { span, file, .. } = env.diagnostic(id) else {
        panic!("expected an undefined type diagnostic");
    };
    assert_eq!(file, "test.go");
    assert_eq!(span.offset(), source.find("Missing").expect("source names Missing"));
    assert_eq!(span.len(), "Missing".len());
}

#[test]
fn test_redeclared_names() {
    let (env, package) = check_files(&[
        ("a.go", "package test\n\ntype Config struct{}\n"),
        ("b.go", "package test\n\nvar Config int\n"),
    ]);

    assert_eq!(
        diagnostics(&env, package),
        vec!["Config redeclared in this block".to_string()]
    );
    // The first declaration wins
    assert!(env.type_name(env.package(package).lookup("Config").expect("declared")).is_some());
}

#[test]
fn test_blank_methods_and_init_are_not_declared() {
    let (env, package) = check(indoc! {r#"
        package test

        type _ int
        type _ string

        type Counter int

        func (c Counter) String() string { return "" }
        func (c *Counter) Inc() { *c++ }

        func init() {}
        func init() {}
    "#});

    assert!(diagnostics(&env, package).is_empty());
    assert_eq!(
        env.package(package).scope.keys().cloned().collect::<Vec<_>>(),
        vec!["Counter".to_string()]
    );
}

#[test]
fn test_values_are_not_types() {
    let (env, package) = check(indoc! {r#"
        package test

        var Default = 1

        func Make() {}

        type A Default
        type B []Make
    "#});

    assert_eq!(
        diagnostics(&env, package),
        vec!["Default is not a type".to_string(), "Make is not a type".to_string()]
    );
}

#[test]
fn test_checking_continues_after_errors() {
    let (env, package) = check(indoc! {r#"
        package test

        type Broken interface {
            Do(x Unknown) error
        }

        type Fine interface {
            Do(x int) error
        }
    "#});

    assert_eq!(diagnostics(&env, package).len(), 1);
    assert_eq!(underlying(&env, package, "Fine"), "interface{Do(x int) error}");
    assert_eq!(
        underlying(&env, package, "Broken"),
        "interface{Do(x invalid type) error}"
    );
}

#[test]
fn test_method_declared_twice_in_one_interface() {
    let source = indoc! {r#"
        package test

        type Twice interface {
            F()
            F()
        }

        type Once interface {
            F()
        }
    "#};
    let (env, package) = check(source);

    assert_eq!(diagnostics(&env, package), vec!["duplicate method F".to_string()]);
    let Type::Invalid(diagnostic) = env.ty(env.underlying(lookup(&env, package, "Twice"))) else {
        panic!("Twice should be invalid");
    };
    let TypeDiagnostic::DuplicateMethod { span, .. } = env.diagnostic(*diagnostic) else {
        panic!("expected a duplicate method diagnostic");
    };
    assert_eq!(span.offset(), source.rfind("F()\n}\n\ntype Once").expect("second F"));
    assert!(env.interface(lookup(&env, package, "Once")).is_some());
}
