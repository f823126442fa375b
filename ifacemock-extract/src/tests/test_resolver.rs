use super::{resolve_files, resolve_source, signatures, TEST_PATH};
use crate::{ExtractError, Import, ParamDescription, TypeParamDescription};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_single_method_interface() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type MyInterface interface {
                M(s string) error
            }
        "#},
        "MyInterface",
    )
    .expect("should resolve");

    assert_eq!(contract.name, "MyInterface");
    assert_eq!(contract.package, "example");
    assert!(contract.type_params.is_empty());
    assert!(contract.imports.is_empty());
    assert_eq!(signatures(&contract), vec!["M(s string) error"]);
    assert_eq!(
        contract.methods[0].source_contract,
        format!("{TEST_PATH}.MyInterface")
    );
}

#[test]
fn test_variadic_parameter_uses_the_element_type() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Summer interface {
                V(nums ...int)
                F(format string, args ...any) (n int, err error)
            }
        "#},
        "Summer",
    )
    .expect("should resolve");

    let v = &contract.methods[0];
    assert_eq!(
        v.params,
        vec![ParamDescription {
            name: "nums".to_string(),
            type_string: "int".to_string(),
            variadic: true,
        }]
    );

    let f = &contract.methods[1];
    let variadic: Vec<bool> = f.params.iter().map(|p| p.variadic).collect();
    assert_eq!(variadic, vec![false, true]);
    assert_eq!(f.params[1].type_string, "any");
    assert_eq!(f.results_string(), "(n int, err error)");
}

#[test]
fn test_unnamed_and_blank_parameters_keep_their_names() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Sink interface {
                Put(string, int) bool
                Drop(_ string, n int)
            }
        "#},
        "Sink",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Put(string, int) bool", "Drop(_ string, n int)"]);
}

#[test]
fn test_diamond_embedding_yields_each_method_once() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Base interface {
                Close() error
            }

            type Left interface {
                Base
                Read() []byte
            }

            type Right interface {
                Base
                Write(p []byte)
            }

            type Both interface {
                Left
                Right
            }
        "#},
        "Both",
    )
    .expect("should resolve");

    assert_eq!(
        signatures(&contract),
        vec!["Close() error", "Read() []byte", "Write(p []byte)"]
    );
    let contracts: Vec<&str> = contract.methods.iter().map(|m| m.source_contract.as_str()).collect();
    assert_eq!(
        contracts,
        vec![
            "example.com/test.Base",
            "example.com/test.Left",
            "example.com/test.Right"
        ]
    );
}

#[test]
fn test_identical_methods_from_two_interfaces_merge() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type A interface {
                Do(x int) error
            }

            type B interface {
                Do(y int) error
            }

            type C interface {
                A
                B
            }
        "#},
        "C",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Do(x int) error"]);
    assert_eq!(contract.methods[0].source_contract, "example.com/test.A");
}

#[test]
fn test_conflicting_methods_are_rejected() {
    let err = resolve_source(
        indoc! {r#"
            package example

            type A interface {
                Do(x int) error
            }

            type B interface {
                Do(x string) error
            }

            type C interface {
                A
                B
            }
        "#},
        "C",
    )
    .expect_err("should fail");

    match err {
        ExtractError::DuplicateMethod { method, first, second } => {
            assert_eq!(method, "Do");
            assert_eq!(first, "example.com/test.A");
            assert_eq!(second, "example.com/test.B");
        }
        other => panic!("expected a duplicate method error, got {other:?}"),
    }
}

#[test]
fn test_embedded_error_and_union_terms() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Coded interface {
                error
                Code() int
            }

            type Label interface {
                ~string
                String() string
            }
        "#},
        "Coded",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Error() string", "Code() int"]);
    assert_eq!(contract.methods[0].source_contract, "error");

    let label = resolve_source(
        indoc! {r#"
            package example

            type Label interface {
                ~string
                String() string
            }
        "#},
        "Label",
    )
    .expect("should resolve");
    assert_eq!(signatures(&label), vec!["String() string"]);
}

#[test]
fn test_generic_interface() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Store[K comparable, V any] interface {
                Get(key K) (V, bool)
                Put(key K, value V)
                Batch() []Store[K, V]
            }
        "#},
        "Store",
    )
    .expect("should resolve");

    assert_eq!(
        contract.type_params,
        vec![
            TypeParamDescription {
                name: "K".to_string(),
                constraint: "comparable".to_string(),
            },
            TypeParamDescription {
                name: "V".to_string(),
                constraint: "any".to_string(),
            },
        ]
    );
    assert_eq!(
        signatures(&contract),
        vec!["Get(key K) (V, bool)", "Put(key K, value V)", "Batch() []Store[K, V]"]
    );
}

#[test]
fn test_union_constraints_render_as_written() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Adder[T ~int | ~float64] interface {
                Add(a, b T) T
            }
        "#},
        "Adder",
    )
    .expect("should resolve");

    assert_eq!(contract.type_params[0].constraint, "~int | ~float64");
    assert_eq!(signatures(&contract), vec!["Add(a T, b T) T"]);
}

#[test]
fn test_embedded_generic_instance_is_substituted() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Getter[T any] interface {
                Get() T
            }

            type Names interface {
                Getter[[]string]
                Count() int
            }
        "#},
        "Names",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Get() []string", "Count() int"]);
    assert_eq!(
        contract.methods[0].source_contract,
        "example.com/test.Getter[[]string]"
    );
}

#[test]
fn test_only_used_imports_are_listed() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            import (
                "context"
                "fmt"
                stdio "io"
                "sort"
            )

            type Fetcher interface {
                Fetch(ctx context.Context, w stdio.Writer) error
                Describe(s fmt.Stringer)
                Again(ctx context.Context)
            }
        "#},
        "Fetcher",
    )
    .expect("should resolve");

    assert_eq!(
        contract.imports,
        vec![
            Import::new("context"),
            Import::with_alias("stdio", "io"),
            Import::new("fmt"),
        ]
    );
    assert_eq!(
        signatures(&contract)[0],
        "Fetch(ctx context.Context, w stdio.Writer) error"
    );
    assert!(contract.synthesized_imports.is_empty());
}

#[test]
fn test_dot_imported_types_are_unqualified() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            import . "io"

            type Copier interface {
                Copy(dst Writer, src Reader) (int64, error)
            }
        "#},
        "Copier",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Copy(dst Writer, src Reader) (int64, error)"]);
    assert_eq!(contract.imports, vec![Import::with_alias(".", "io")]);
}

#[test]
fn test_types_needing_an_import_the_file_lacks() {
    let contract = resolve_files(
        &[
            ("a.go", "package example\n\ntype Target interface {\n\tHelper\n}\n"),
            (
                "b.go",
                "package example\n\nimport \"io\"\n\ntype Helper interface {\n\tSource() io.Reader\n}\n",
            ),
        ],
        "Target",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["Source() io.Reader"]);
    assert_eq!(contract.imports, vec![Import::new("io")]);
    assert_eq!(contract.synthesized_imports.len(), 1);
    assert_eq!(contract.synthesized_imports[0].collision, None);
    assert!(!contract.has_import_collision());
}

#[test]
fn test_synthesized_import_collision_is_recorded() {
    let contract = resolve_files(
        &[
            (
                "a.go",
                "package example\n\nvar io = 0\n\ntype Target interface {\n\tHelper\n}\n",
            ),
            (
                "b.go",
                "package example\n\nimport \"io\"\n\ntype Helper interface {\n\tSource() io.Reader\n}\n",
            ),
        ],
        "Target",
    )
    .expect("should resolve");

    assert!(contract.has_import_collision());
    assert_eq!(
        contract.synthesized_imports[0].collision.as_deref(),
        Some("declared in package example")
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let source = indoc! {r#"
        package example

        import "io"

        type Z interface {
            Zed() io.Reader
        }

        type A interface {
            Alpha(w io.Writer)
        }

        type All interface {
            Z
            A
            Own()
        }
    "#};

    let first = resolve_source(source, "All").expect("should resolve");
    let second = resolve_source(source, "All").expect("should resolve");

    assert_eq!(first, second);
    assert_eq!(signatures(&first), vec!["Alpha(w io.Writer)", "Own()", "Zed() io.Reader"]);
}

#[test]
fn test_not_found() {
    let err = resolve_source("package example\n", "Missing").expect_err("should fail");
    assert_eq!(err.to_string(), "interface not found: Missing");
}

#[test]
fn test_not_a_named_type() {
    let err = resolve_source("package example\n\nvar Thing = 1\n", "Thing").expect_err("should fail");
    assert!(matches!(err, ExtractError::NotNamedType { ref kind, .. } if kind == "variable"));
    assert_eq!(err.to_string(), "Thing is not a named type");
}

#[test]
fn test_not_an_interface() {
    let err = resolve_source("package example\n\ntype Point struct{ X, Y int }\n", "Point")
        .expect_err("should fail");

    match err {
        ExtractError::NotInterface { name, underlying } => {
            assert_eq!(name, "Point");
            assert_eq!(underlying, "struct{X int; Y int}");
        }
        other => panic!("expected not an interface, got {other:?}"),
    }
}

#[test]
fn test_reachable_type_errors_fail_the_extraction() {
    let err = resolve_source(
        indoc! {r#"
            package example

            type Broken interface {
                Load(id ID) (*Record, error)
            }

            type Record struct {
                owner Owner
            }

            type Unrelated interface {
                Other() Nowhere
            }
        "#},
        "Broken",
    )
    .expect_err("should fail");

    match err {
        ExtractError::TypeErrors { name, errors } => {
            assert_eq!(name, "Broken");
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            assert_eq!(
                messages,
                vec!["undefined: ID".to_string(), "undefined: Owner".to_string()]
            );
        }
        other => panic!("expected type errors, got {other:?}"),
    }
}

#[test]
fn test_unrelated_type_errors_are_ignored() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            type Fine interface {
                Ok() bool
            }

            type Broken struct {
                x Missing
            }
        "#},
        "Fine",
    )
    .expect("unrelated errors should not matter");

    assert_eq!(signatures(&contract), vec!["Ok() bool"]);
}

#[test]
fn test_embedding_an_opaque_interface_fails_closed() {
    let err = resolve_source(
        indoc! {r#"
            package example

            import "github.com/acme/widgets"

            type Gadget interface {
                widgets.Widget
                Spin()
            }
        "#},
        "Gadget",
    )
    .expect_err("should fail");

    assert!(matches!(err, ExtractError::TypeErrors { .. }));
}

#[test]
fn test_alias_to_an_interface() {
    let contract = resolve_source(
        indoc! {r#"
            package example

            import "io"

            type Reader = io.Reader
        "#},
        "Reader",
    )
    .expect("should resolve");

    assert_eq!(contract.name, "Reader");
    assert_eq!(signatures(&contract), vec!["Read(p []byte) (n int, err error)"]);
    assert_eq!(contract.methods[0].source_contract, "io.Reader");
    assert!(contract.imports.is_empty());
}

#[test]
fn test_embedded_interface_from_a_file_with_a_dot_import() {
    let contract = resolve_files(
        &[
            ("a.go", "package example\n\ntype C interface {\n\tD\n}\n"),
            (
                "b.go",
                "package example\n\nimport . \"io\"\n\ntype D interface {\n\tN() int\n\tR() Reader\n}\n",
            ),
        ],
        "C",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["N() int", "R() io.Reader"]);
    assert_eq!(contract.methods[0].source_contract, "example.com/test.D");
    // a.go has no import of io, so it is added rather than taken from b.go
    assert_eq!(contract.imports, vec![Import::new("io")]);
    assert_eq!(contract.synthesized_imports.len(), 1);
}

#[test]
fn test_embedded_interface_imports_do_not_leak() {
    let contract = resolve_files(
        &[
            ("a.go", "package example\n\ntype C interface {\n\tD\n}\n"),
            (
                "b.go",
                "package example\n\nimport . \"io\"\n\ntype D interface {\n\tN() int\n}\n",
            ),
        ],
        "C",
    )
    .expect("should resolve");

    assert_eq!(signatures(&contract), vec!["N() int"]);
    assert_eq!(contract.methods[0].source_contract, "example.com/test.D");
    assert!(contract.imports.is_empty());
    assert!(contract.synthesized_imports.is_empty());
}

#[test]
fn test_method_declared_twice_is_a_type_error() {
    let err = resolve_source(
        indoc! {r#"
            package example

            type F interface {
                F()
                F()
            }
        "#},
        "F",
    )
    .expect_err("should fail");

    match err {
        ExtractError::TypeErrors { name, errors } => {
            assert_eq!(name, "F");
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            assert_eq!(messages, vec!["duplicate method F".to_string()]);
        }
        other => panic!("expected type errors, got {other:?}"),
    }
}

#[test]
fn test_embedding_cycle_reports_the_recursive_type() {
    let err = resolve_source(
        indoc! {r#"
            package example

            type E interface {
                E2
            }

            type E2 interface {
                E
            }
        "#},
        "E",
    )
    .expect_err("should fail");

    match err {
        ExtractError::TypeErrors { errors, .. } => {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            assert!(
                messages.iter().any(|m| m.starts_with("invalid recursive type")),
                "{messages:?}"
            );
        }
        other => panic!("expected type errors, got {other:?}"),
    }
}
