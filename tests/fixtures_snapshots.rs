use insta::assert_snapshot;
use ts_clippy::create_default_engine;

fn format_diags(diags: &[ts_clippy::diagnostics::Diagnostic]) -> String {
    let mut lines: Vec<String> = diags
        .iter()
        .map(|d| {
            format!(
                "{}:{}:{}: {}: {}",
                d.lint.name,
                d.span.start.row,
                d.span.start.column,
                d.level.as_str(),
                d.message
            )
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

#[test]
fn result_handling_scenario() {
    let engine = create_default_engine().expect("default engine");
    let src = include_str!("fixtures/result_handling/scenario.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###"
    non_primitive_eq:41:7: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    result_handling:34:3: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    "###);
}

#[test]
fn result_handling_handled_patterns() {
    let engine = create_default_engine().expect("default engine");
    let src = include_str!("fixtures/result_handling/handled.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###""###);
}

#[test]
fn result_handling_unhandled_patterns() {
    let engine = create_default_engine().expect("default engine");
    let src = include_str!("fixtures/result_handling/unhandled.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###"
    result_handling:34:3: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:38:13: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:43:13: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:52:13: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:60:20: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:65:3: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    result_handling:68:23: warning: All Result-typed outcomes must be unwrapped, discriminant-checked, or propagated via return.
    "###);
}

#[test]
fn non_primitive_eq_positive() {
    let engine = create_default_engine().expect("default engine");
    let src = include_str!("fixtures/non_primitive_eq/positive.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###"
    non_primitive_eq:13:5: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:18:19: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:21:15: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:25:16: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:29:19: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:31:19: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    non_primitive_eq:34:10: warning: Avoid equality comparison between non-primitive values; compare primitive fields or identity-safe representations instead.
    "###);
}

#[test]
fn non_primitive_eq_negative() {
    let engine = create_default_engine().expect("default engine");
    let src = include_str!("fixtures/non_primitive_eq/negative.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###""###);
}

#[test]
fn no_types_skips_every_type_based_lint() {
    let engine = create_default_engine()
        .expect("default engine")
        .without_types();
    let src = include_str!("fixtures/result_handling/scenario.ts");

    let diags = engine.lint_source(src).expect("linting should succeed");
    assert_snapshot!(format_diags(&diags), @r###""###);
}
