use super::render_signature;
use crate::{parse_type_expr, ParseError, TypeExprKind};
use pretty_assertions::assert_eq;

fn signature(input: &str) -> String {
    match parse_type_expr(input).expect("Failed to parse signature").kind {
        TypeExprKind::Func(func) => render_signature(&func),
        _ => panic!("Expected function type"),
    }
}

#[test]
fn test_grouped_names_share_a_type() {
    assert_eq!(signature("func(a, b int, c string)"), "(a int, b int, c string)");
}

#[test]
fn test_unnamed_parameters() {
    assert_eq!(signature("func(int, string)"), "(int, string)");
    assert_eq!(signature("func(pkg.T, []byte)"), "(pkg.T, []byte)");
}

#[test]
fn test_blank_parameter_names_are_kept() {
    assert_eq!(signature("func(_ int, s string)"), "(_ int, s string)");
}

#[test]
fn test_variadic_parameter_stores_element_type() {
    let func = match parse_type_expr("func(format string, args ...interface{})")
        .expect("Failed to parse signature")
        .kind
    {
        TypeExprKind::Func(func) => func,
        _ => panic!("Expected function type"),
    };

    assert!(func.is_variadic());
    let last = func.params.last().expect("Expected parameters");
    assert!(last.variadic);
    assert!(matches!(last.ty.kind, TypeExprKind::Interface(_)));
}

#[test]
fn test_named_results() {
    assert_eq!(
        signature("func(x int) (n int, err error)"),
        "(x int) (n int, err error)"
    );
}

#[test]
fn test_multiline_parameter_list() {
    assert_eq!(
        signature("func(\n\ta int,\n\tb string,\n) error"),
        "(a int, b string) (error)"
    );
}

#[test]
fn test_mixed_named_and_unnamed_is_rejected() {
    let result = parse_type_expr("func(a int, []string)");

    assert!(matches!(result, Err(ParseError::MixedParameters { .. })));
}

#[test]
fn test_variadic_must_be_last() {
    let result = parse_type_expr("func(a ...int, b string)");

    assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
}

#[test]
fn test_variadic_result_is_rejected() {
    assert!(parse_type_expr("func() (...int)").is_err());
}
