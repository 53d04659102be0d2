//! Failure paths from grammar source to compiled grammar, through the
//! public entry point.

use cmb2parse_lib::{CompileErrorKind, DescriptionError, GrammarError, load_grammar};

#[test]
fn broken_grammar_syntax_reports_location() {
    let err = load_grammar("expr [0-9]+\n").expect_err("missing equals");
    let GrammarError::Meta(meta) = err else {
        panic!("expected a meta error, got {err:?}");
    };
    assert_eq!((meta.line, meta.column), (1, 6));
    let rendered = meta.render("expr [0-9]+\n", "demo.grammar");
    assert!(rendered.contains("demo.grammar:1:6"), "rendered: {rendered}");
    assert!(rendered.contains("failed to parse grammar"));
}

#[test]
fn missing_root_is_a_description_error() {
    let err = load_grammar("a = 'x'\n").expect_err("no root directive");
    assert!(matches!(
        err,
        GrammarError::Description(DescriptionError::MissingRoot)
    ));
}

#[test]
fn conflicting_directives_are_description_errors() {
    let err = load_grammar("a = 'x'\nroot! a\ntoken! a\ngroup! a\n").expect_err("conflict");
    assert!(matches!(
        err,
        GrammarError::Description(DescriptionError::TokenGroupConflict(ref name)) if name == "a"
    ));
}

#[test]
fn inverted_range_is_a_compile_error() {
    let err = load_grammar("root! a\na = [9-0]\n").expect_err("inverted range");
    let GrammarError::Compile(compile) = err else {
        panic!("expected a compile error, got {err:?}");
    };
    assert_eq!(compile.rule, "a");
    assert!(matches!(compile.kind, CompileErrorKind::InvalidRange(_)));
    assert!(compile.to_string().contains("failed to compile rule a"));
}

#[test]
fn grammar_errors_format_for_humans() {
    let err = load_grammar("a = 'x'\n").expect_err("no root directive");
    assert_eq!(err.to_string(), "no root definition");
}
