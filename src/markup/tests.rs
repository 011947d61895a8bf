use super::*;

fn parse(input: &str) -> Captured {
    parse_markup(input)
        .expect("markup should parse")
        .expect("input should open a region")
}

fn text(content: &str) -> TagTree {
    Text::new(content).into()
}

#[test]
fn test_simple_element_with_text() {
    let captured = parse("<p>hello</p>");
    assert_eq!(captured.root.name, "p");
    assert_eq!(captured.root.children, vec![text("hello")]);
    assert_eq!(captured.len, "<p>hello</p>".len());
}

#[test]
fn test_span_stops_at_outermost_close() {
    let input = "<div><span>a</span></div>; let rest = 1;";
    let captured = parse(input);
    assert_eq!(captured.span(input), "<div><span>a</span></div>");
}

#[test]
fn test_self_closing_root() {
    let input = "<br/>, next";
    let captured = parse(input);
    assert_eq!(captured.root.name, "br");
    assert!(captured.root.children.is_empty());
    assert_eq!(captured.span(input), "<br/>");
}

#[test]
fn test_self_closing_child() {
    let captured = parse("<div><hr /><img src=\"a.png\"/></div>");
    let names: Vec<_> = captured
        .root
        .children
        .iter()
        .filter_map(TagTree::as_element)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["hr", "img"]);
}

#[test]
fn test_children_in_source_order() {
    let captured = parse("<ul>\n  <li>one</li>\n  two\n  <li>three</li>\n</ul>");
    let children = &captured.root.children;
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].as_element().map(|e| e.name.as_str()), Some("li"));
    assert_eq!(children[1], text("two"));
    assert_eq!(
        children[2].as_element().map(|e| e.children.clone()),
        Some(vec![text("three")])
    );
}

#[test]
fn test_whitespace_only_text_is_dropped() {
    let captured = parse("<div>\n    \n</div>");
    assert!(captured.root.children.is_empty());
}

#[test]
fn test_attributes_keep_order_and_duplicates() {
    let captured = parse(r#"<a href="/x" class='big' data-x=raw hidden class="again">t</a>"#);
    let attrs: Vec<_> = captured
        .root
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        attrs,
        [
            ("href", "/x"),
            ("class", "big"),
            ("data-x", "raw"),
            ("hidden", ""),
            ("class", "again"),
        ]
    );
    assert_eq!(captured.root.attribute("class"), Some("big"));
}

#[test]
fn test_names_are_lowercased() {
    let captured = parse(r#"<div onClick="{handler}"></DIV>"#);
    assert_eq!(captured.root.name, "div");
    assert_eq!(captured.root.attributes[0].name, "onclick");
}

#[test]
fn test_attribute_value_with_markup_characters() {
    let captured = parse(r#"<p title="a > b / c">x</p>"#);
    assert_eq!(captured.root.attribute("title"), Some("a > b / c"));
}

#[test]
fn test_character_references_are_decoded() {
    let captured = parse(r#"<p title="&quot;q&quot;">fish &amp; chips &lt;3 &#x41;&#66; &bogus;</p>"#);
    assert_eq!(captured.root.attribute("title"), Some("\"q\""));
    assert_eq!(captured.root.children, vec![text("fish & chips <3 AB &bogus;")]);
}

#[test]
fn test_markup_comments_are_skipped() {
    let captured = parse("<div><!-- <span> not parsed --><b>x</b></div>");
    assert_eq!(captured.root.children.len(), 1);
    assert_eq!(captured.root.children[0].as_element().map(|e| e.name.as_str()), Some("b"));
}

#[test]
fn test_less_than_inside_text() {
    let captured = parse("<p>{a} < {b}</p>");
    assert_eq!(captured.root.children, vec![text("{a} < {b}")]);
}

#[test]
fn test_not_markup_returns_none() {
    for input in ["< b", "<< 2", "<3", "<T as Default>::default()", "<", ""] {
        assert_eq!(parse_markup(input).unwrap(), None, "input: {input:?}");
    }
}

#[test]
fn test_tag_mismatch_names_both_tags() {
    let err = parse_markup("<div></span>").unwrap_err();
    assert_eq!(err.kind, MarkupErrorKind::TagMismatch);
    assert_eq!(err.expected.as_deref(), Some("div"));
    assert_eq!(err.found.as_deref(), Some("span"));
    assert_eq!(err.position, 5);
    let msg = err.to_string();
    assert!(msg.contains("'div'"));
    assert!(msg.contains("'span'"));
}

#[test]
fn test_unexpected_eof_names_innermost_tag() {
    let err = parse_markup("<div><p>text").unwrap_err();
    assert_eq!(err.kind, MarkupErrorKind::UnexpectedEof);
    assert_eq!(err.expected.as_deref(), Some("p"));
    assert!(err
        .to_string()
        .contains("unexpected end of input, expected closing tag 'p'"));
}

#[test]
fn test_trailing_content_before_close() {
    let err = parse_markup("<div><span>a</span>;\nlet x = 1;").unwrap_err();
    assert_eq!(err.kind, MarkupErrorKind::TrailingContent);
    assert_eq!(err.expected.as_deref(), Some("div"));
    assert!(err.snippet.starts_with(';'));
}

#[test]
fn test_stray_closing_tag() {
    let err = parse_markup("</div>").unwrap_err();
    assert_eq!(err.kind, MarkupErrorKind::StrayClosingTag);
    assert_eq!(err.found.as_deref(), Some("div"));
}

#[test]
fn test_unterminated_constructs() {
    let cases = [
        ("<div class=\"x\"", MarkupErrorKind::UnterminatedTag),
        ("<div class=\"x>text</div>", MarkupErrorKind::UnterminatedAttributeValue),
        ("<div><!-- open", MarkupErrorKind::UnterminatedComment),
        ("<div></div", MarkupErrorKind::UnterminatedTag),
    ];
    for (input, kind) in cases {
        let err = parse_markup(input).unwrap_err();
        assert_eq!(err.kind, kind, "input: {input:?}");
    }
}

#[test]
fn test_embedded_code_flag() {
    assert!(Text::new("{value}").is_embedded_code());
    assert!(Text::new("  {s:value} ").is_embedded_code());
    assert!(!Text::new("{a} and {b}").is_embedded_code());
    assert!(!Text::new("plain").is_embedded_code());
    assert!(!Text::new("{").is_embedded_code());
}

#[test]
fn test_debug_string_outline() {
    let captured = parse("<div class=\"box\"><h1>{title}</h1>body</div>");
    let tree = TagTree::from(captured.root);
    assert_eq!(
        tree.debug_string(),
        "div class=\"box\"\n  h1\n    embed:{title}\n  body\n"
    );
}

#[test]
fn test_serialization_is_idempotent() {
    let inputs = [
        "<div class=\"a b {c}\"><p>fish &amp; chips</p><br/></div>",
        "<ul><li title='say \"hi\"'>{item}</li><li/></ul>",
        "<section>\n  <h2>Title</h2>\n  <!-- gone -->\n  <p>1 &lt; 2</p>\n</section>",
    ];
    for input in inputs {
        let first = TagTree::from(parse(input).root);
        let markup = first.to_markup();
        let second = TagTree::from(parse(&markup).root);
        assert_eq!(first, second, "serialized as {markup:?}");
    }
}

#[test]
fn test_to_markup_escapes() {
    let tree = TagTree::from(parse(r#"<p title="&quot;">a &lt; b</p>"#).root);
    assert_eq!(tree.to_markup(), r#"<p title="&quot;">a &lt; b</p>"#);
}
