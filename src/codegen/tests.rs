use super::*;
use crate::error::{Error, LexErrorKind};
use crate::markup::parse_markup;
use quote::ToTokens;
use syn::{parse_quote, Expr, Path};

fn generate_with(config: &TranspileConfig, markup: &str) -> Result<GeneratedExpr> {
    let captured = parse_markup(markup)
        .expect("markup should parse")
        .expect("markup should open a region");
    Codegen::new(config).generate(&captured.root)
}

fn render(markup: &str) -> String {
    generate_with(&TranspileConfig::default(), markup)
        .expect("codegen should succeed")
        .render("")
}

fn codegen_error(markup: &str) -> CodegenError {
    match generate_with(&TranspileConfig::default(), markup) {
        Err(Error::Codegen(err)) => err,
        other => panic!("expected codegen error, got {other:?}"),
    }
}

#[test]
fn test_class_list_and_text() {
    let expr = generate_with(
        &TranspileConfig::default(),
        r#"<div class="a b {c} d">text</div>"#,
    )
    .unwrap();

    let expected: Path = parse_quote!(elem::div);
    assert_eq!(expr.callee(), Some(&expected));
    assert_eq!(expr.args().len(), 2);
    let markup = &expr.args()[0];
    assert_eq!(markup.args().len(), 1);
    assert_eq!(markup.args()[0].args().len(), 4);

    assert_eq!(
        render(r#"<div class="a b {c} d">text</div>"#),
        "elem::div(\n    vecty::markup(\n        vecty::class(\"a\", \"b\", c, \"d\"),\n    ),\n    vecty::text(\"text\"),\n)"
    );
}

#[test]
fn test_text_segments_in_order() {
    assert_eq!(
        render("<p>{first} and {second}</p>"),
        "elem::paragraph(\n    first,\n    vecty::text(\"and\"),\n    second,\n)"
    );
}

#[test]
fn test_text_modifier_wraps_expression() {
    assert_eq!(render("<h1>{s:title}</h1>"), "elem::heading1(\n    vecty::text(title),\n)");
}

#[test]
fn test_single_host_child_stays_inline() {
    assert_eq!(render("<p>{count}</p>"), "elem::paragraph(count)");
}

#[test]
fn test_empty_element_is_bare_call() {
    assert_eq!(render("<hr/>"), "elem::horizontal_rule()");
    assert_eq!(render("<div></div>"), "elem::div()");
}

#[test]
fn test_special_tag_names() {
    let cases = [
        ("<a></a>", "elem::anchor()"),
        ("<img/>", "elem::image()"),
        ("<nav></nav>", "elem::navigation()"),
        ("<cite></cite>", "elem::citation()"),
        ("<h6></h6>", "elem::heading6()"),
        ("<li></li>", "elem::list_item()"),
    ];
    for (markup, expected) in cases {
        assert_eq!(render(markup), expected);
    }
}

#[test]
fn test_unknown_tag_falls_back_to_raw_tag() {
    assert_eq!(
        render(r#"<customtag class="someclass">{s:"text"}</customtag>"#),
        "vecty::tag(\n    \"customtag\",\n    vecty::markup(\n        vecty::class(\"someclass\"),\n    ),\n    vecty::text(\"text\"),\n)"
    );
}

#[test]
fn test_generic_attribute_is_one_argument() {
    assert_eq!(
        render(r#"<div data-ducks="this is all one argument"></div>"#),
        "elem::div(\n    vecty::markup(\n        vecty::attribute(\"data-ducks\", \"this is all one argument\"),\n    ),\n)"
    );
}

#[test]
fn test_attribute_with_embedded_value() {
    assert_eq!(
        render(r#"<input value="{state.name}"/>"#),
        "elem::input(\n    vecty::markup(\n        vecty::attribute(\"value\", state.name),\n    ),\n)"
    );
}

#[test]
fn test_click_handler() {
    let expected = "elem::button(\n    vecty::markup(\n        event::click(on_click),\n    ),\n    vecty::text(\"Go\"),\n)";
    assert_eq!(render(r#"<button click="on_click">Go</button>"#), expected);
    assert_eq!(render(r#"<button click="{on_click}">Go</button>"#), expected);
}

#[test]
fn test_click_handler_closure() {
    assert_eq!(
        render(r#"<button click="|_| count.set(0)"></button>"#),
        "elem::button(\n    vecty::markup(\n        event::click(|_| count.set(0)),\n    ),\n)"
    );
}

#[test]
fn test_spread_attribute() {
    assert_eq!(
        render(r#"<div markup="{extra}"></div>"#),
        "elem::div(\n    vecty::markup(extra),\n)"
    );
}

#[test]
fn test_empty_class_is_empty_call() {
    assert_eq!(
        render(r#"<div class=""></div>"#),
        "elem::div(\n    vecty::markup(\n        vecty::class(),\n    ),\n)"
    );
}

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(
        render(r#"<p>say "hi" \ now</p>"#),
        "elem::paragraph(\n    vecty::text(\"say \\\"hi\\\" \\\\ now\"),\n)"
    );
}

#[test]
fn test_nested_elements_indent() {
    assert_eq!(
        render("<ul><li>{a}</li><li>b</li></ul>"),
        "elem::unordered_list(\n    elem::list_item(a),\n    elem::list_item(\n        vecty::text(\"b\"),\n    ),\n)"
    );
}

#[test]
fn test_base_indent_applies_to_continuation_lines() {
    let expr = generate_with(&TranspileConfig::default(), "<p>x</p>").unwrap();
    assert_eq!(
        expr.render("        "),
        "elem::paragraph(\n            vecty::text(\"x\"),\n        )"
    );
}

#[test]
fn test_render_with_crlf() {
    let expr = generate_with(&TranspileConfig::default(), "<ul><li>x</li></ul>").unwrap();
    assert_eq!(
        expr.render_with_newline("  ", "\r\n"),
        "elem::unordered_list(\r\n      elem::list_item(\r\n          vecty::text(\"x\"),\r\n      ),\r\n  )"
    );
}

#[test]
fn test_custom_configuration() {
    let mut tags = TagTable::empty();
    tags.insert("card", parse_quote!(ui::card));
    let config = TranspileConfig::default()
        .with_tags(tags)
        .with_event_handler("input", parse_quote!(ui::on_input));
    let expr = generate_with(&config, r#"<card input="update"><p/></card>"#).unwrap();
    assert_eq!(
        expr.render(""),
        "ui::card(\n    vecty::markup(\n        ui::on_input(update),\n    ),\n    vecty::tag(\"p\"),\n)"
    );
}

#[test]
fn test_to_expr_matches_render() {
    let expr = generate_with(&TranspileConfig::default(), r#"<a href="/home">{s:label}</a>"#).unwrap();
    let from_tree = expr.to_expr().to_token_stream().to_string();
    let from_text = syn::parse_str::<Expr>(&expr.render(""))
        .unwrap()
        .to_token_stream()
        .to_string();
    // Rendered text carries trailing commas
    assert_eq!(from_tree, from_text.replace(" ,)", ")"));
}

#[test]
fn test_too_many_segments() {
    let err = codegen_error(r#"<div title="{a}{b}"></div>"#);
    assert_eq!(err.kind, CodegenErrorKind::TooManySegments);
    assert_eq!(err.found, "{a}{b}");
    assert!(err.context.contains("title"));
}

#[test]
fn test_class_token_with_two_segments() {
    let err = codegen_error(r#"<div class="btn-{kind}"></div>"#);
    assert_eq!(err.kind, CodegenErrorKind::TooManySegments);
}

#[test]
fn test_spread_must_be_embedded() {
    let err = codegen_error(r#"<div markup="plain"></div>"#);
    assert_eq!(err.kind, CodegenErrorKind::SpreadNotEmbedded);
}

#[test]
fn test_invalid_embedded_expression() {
    let err = codegen_error("<p>{1 +}</p>");
    assert_eq!(err.kind, CodegenErrorKind::InvalidExpression);
    assert_eq!(err.found, "1 +");
    assert!(err.detail.is_some());
}

#[test]
fn test_lex_errors_propagate() {
    match generate_with(&TranspileConfig::default(), "<p>{x:y}</p>") {
        Err(Error::Lex(err)) => assert_eq!(err.kind, LexErrorKind::InvalidModifier),
        other => panic!("expected lex error, got {other:?}"),
    }
}
