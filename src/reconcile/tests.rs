use super::*;
use crate::codegen::CodegenErrorKind;
use crate::error::LexErrorKind;
use crate::scanner::{scan, PlaceholderTable};

fn scanned(source: &str) -> ScanOutput {
    let config = TranspileConfig::default();
    scan(source, &config.placeholder).expect("scan should succeed")
}

fn reconcile_with(config: &TranspileConfig, scanned: ScanOutput) -> Result<Reconciled> {
    Reconciler::new(config).reconcile(scanned)
}

fn splice(source: &str) -> String {
    reconcile_with(&TranspileConfig::default(), scanned(source))
        .expect("reconcile should succeed")
        .source
}

fn reconcile_error(scanned: ScanOutput) -> ReconcileError {
    match reconcile_with(&TranspileConfig::default(), scanned) {
        Err(Error::Reconcile(err)) => err,
        other => panic!("expected reconcile error, got {other:?}"),
    }
}

#[test]
fn test_splice_keeps_surrounding_text() {
    let source = "fn view(name: &str) -> Node {\n    // greeting card\n    let title = <h1>{s:name}</h1>;\n    <div class=\"card\">{title}</div>\n}\n";
    assert_eq!(
        splice(source),
        "fn view(name: &str) -> Node {\n    // greeting card\n    let title = elem::heading1(\n        vecty::text(name),\n    );\n    elem::div(\n        vecty::markup(\n            vecty::class(\"card\"),\n        ),\n        title,\n    )\n}\n"
    );
}

#[test]
fn test_match_arms() {
    let source = "fn f(x: bool) -> Node {\n    match x {\n        true => <br/>,\n        false => <p>{y}</p>,\n    }\n}\n";
    assert_eq!(
        splice(source),
        "fn f(x: bool) -> Node {\n    match x {\n        true => elem::line_break(),\n        false => elem::paragraph(y),\n    }\n}\n"
    );
}

#[test]
fn test_closure_body() {
    assert_eq!(
        splice("fn f() { let g = |x| <p>{x}</p>; }"),
        "fn f() { let g = |x| elem::paragraph(x); }"
    );
}

#[test]
fn test_macro_arguments() {
    assert_eq!(
        splice("fn f() -> Vec<Node> { vec![<hr/>, <p>{a}</p>] }"),
        "fn f() -> Vec<Node> { vec![elem::horizontal_rule(), elem::paragraph(a)] }"
    );
}

#[test]
fn test_function_argument_and_return() {
    assert_eq!(
        splice("fn f() -> Node { mount(<b>{x}</b>); return <span/>; }"),
        "fn f() -> Node { mount(elem::bold(x)); return elem::span(); }"
    );
}

#[test]
fn test_columns_count_characters() {
    assert_eq!(
        splice("fn f() { let s = \"héllo ✓\"; let v = <p/>; }"),
        "fn f() { let s = \"héllo ✓\"; let v = elem::paragraph(); }"
    );
}

#[test]
fn test_byte_order_mark_is_kept() {
    assert_eq!(
        splice("\u{feff}fn f() { let v = <br/>; }"),
        "\u{feff}fn f() { let v = elem::line_break(); }"
    );
}

#[test]
fn test_source_without_markup_is_unchanged() {
    let source = "use std::fmt;\n\n/// Docs stay.\nfn f() -> bool { 1 < 2 }\n";
    assert_eq!(splice(source), source);
}

#[test]
fn test_tree_holds_generated_calls() {
    let reconciled =
        reconcile_with(&TranspileConfig::default(), scanned("fn f() { let v = <p>{x}</p>; }"))
            .unwrap();
    let printed = prettyplease::unparse(&reconciled.file);
    assert!(printed.contains("let v = elem::paragraph(x);"));
    assert!(!printed.contains("tagsplice"));
}

#[test]
fn test_pretty_emit() {
    let config = TranspileConfig::default().with_emit(Emit::Pretty);
    let reconciled = reconcile_with(
        &config,
        scanned("fn f()   {   let v = vec![<p>{x}</p>];   }"),
    )
    .unwrap();
    assert!(reconciled.source.starts_with("fn f() {\n"));
    assert!(reconciled.source.contains("let v = vec![elem::paragraph(x)];"));
}

#[test]
fn test_unknown_id() {
    let err = reconcile_error(ScanOutput {
        source: "fn f() { let v = tagsplice::html(7, r#\"<p/>\"#); }".to_string(),
        table: PlaceholderTable::new(),
    });
    assert_eq!(err.kind, ReconcileErrorKind::UnknownId);
    assert_eq!(err.id, Some(7));
    assert!(err.to_message().contains("referenced html id not found"));
}

#[test]
fn test_malformed_placeholder() {
    for source in [
        "fn f() { tagsplice::html(\"x\"); }",
        "fn f() { tagsplice::html(one, \"x\"); }",
        "fn f() { tagsplice::html(1, 2); }",
    ] {
        let err = reconcile_error(ScanOutput {
            source: source.to_string(),
            table: PlaceholderTable::new(),
        });
        assert_eq!(err.kind, ReconcileErrorKind::MalformedPlaceholder, "{source}");
    }
}

#[test]
fn test_other_paths_are_left_alone() {
    let source = "fn f() { other::html(1, \"x\"); html(2); }";
    assert_eq!(splice(source), source);
}

#[test]
fn test_unplaced_region() {
    let err = reconcile_error(scanned("fn f() { my_macro! { = <p/> } }"));
    assert_eq!(err.kind, ReconcileErrorKind::UnplacedRegion);
    assert_eq!(err.id, Some(1));
    assert_eq!(err.position, Some(23));
    assert_eq!(err.snippet, "<p/>");
}

#[test]
fn test_host_parse_error() {
    match reconcile_with(
        &TranspileConfig::default(),
        scanned("fn f() { let x = <div>a</div> +; }"),
    ) {
        Err(Error::HostParse(err)) => assert_eq!(err.line, 1),
        other => panic!("expected host parse error, got {other:?}"),
    }
}

#[test]
fn test_codegen_error_points_at_region() {
    match reconcile_with(
        &TranspileConfig::default(),
        scanned("fn f() {\n    let v = <p>{1 +}</p>;\n}"),
    ) {
        Err(Error::Codegen(err)) => {
            assert_eq!(err.kind, CodegenErrorKind::InvalidExpression);
            assert_eq!(err.position, Some(21));
        }
        other => panic!("expected codegen error, got {other:?}"),
    }
}

#[test]
fn test_segment_error_points_at_region() {
    match reconcile_with(
        &TranspileConfig::default(),
        scanned("fn f() { let v = <p>{x:y}</p>; }"),
    ) {
        Err(Error::Lex(err)) => {
            assert_eq!(err.kind, LexErrorKind::InvalidModifier);
            assert_eq!(err.position, 17);
            assert_eq!(err.opened_at, None);
        }
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn test_hand_written_placeholder_call_is_rejected() {
    let err = reconcile_error(scanned(
        "fn f() { tagsplice::html(1, \"x\"); let v = <p/>; }",
    ));
    assert_eq!(err.kind, ReconcileErrorKind::ForeignPlaceholder);
    assert_eq!(err.id, Some(1));
}

#[test]
fn test_region_is_spliced_once() {
    let err = reconcile_error(scanned(
        "fn f() { tagsplice::html(1, r#\"<p/>\"#); let v = <p/>; }",
    ));
    assert_eq!(err.kind, ReconcileErrorKind::ForeignPlaceholder);
}

#[test]
fn test_crlf_source_keeps_crlf() {
    assert_eq!(
        splice("fn f() {\r\n    let v = <p>a</p>;\r\n}\r\n"),
        "fn f() {\r\n    let v = elem::paragraph(\r\n        vecty::text(\"a\"),\r\n    );\r\n}\r\n"
    );
}
