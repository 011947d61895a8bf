use super::*;

fn literal(text: &str) -> Segment {
    Segment::Literal(text.to_string())
}

fn code(code: &str) -> Segment {
    Segment::Embedded {
        code: code.to_string(),
        modifier: None,
    }
}

#[test]
fn test_empty_input_is_one_empty_literal() {
    assert_eq!(tokenize_segments("").unwrap(), vec![literal("")]);
    assert_eq!(tokenize_segments("   \n  ").unwrap(), vec![literal("")]);
}

#[test]
fn test_plain_literal_is_trimmed() {
    assert_eq!(tokenize_segments("  hello world ").unwrap(), vec![literal("hello world")]);
}

#[test]
fn test_mixed_segments() {
    assert_eq!(
        tokenize_segments("{first} and {second}").unwrap(),
        vec![code("first"), literal("and"), code("second")]
    );
}

#[test]
fn test_embedded_code_is_not_trimmed() {
    assert_eq!(tokenize_segments("{ spaced }").unwrap(), vec![code(" spaced ")]);
}

#[test]
fn test_empty_embedded_block_is_dropped() {
    assert_eq!(tokenize_segments("a{}b").unwrap(), vec![literal("a"), literal("b")]);
}

#[test]
fn test_newline_splits_literals() {
    assert_eq!(
        tokenize_segments("line one\n  line two").unwrap(),
        vec![literal("line one"), literal("line two")]
    );
}

#[test]
fn test_text_modifier() {
    assert_eq!(
        tokenize_segments("{s:count}").unwrap(),
        vec![Segment::Embedded {
            code: "count".to_string(),
            modifier: Some(Modifier::Text),
        }]
    );
}

#[test]
fn test_path_is_not_a_modifier() {
    assert_eq!(tokenize_segments("{a::b}").unwrap(), vec![code("a::b")]);
    assert_eq!(tokenize_segments("{s::new()}").unwrap(), vec![code("s::new()")]);
}

#[test]
fn test_invalid_modifier() {
    let err = tokenize_segments("{x:value}").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidModifier);
    assert_eq!(err.snippet, "x:value");
}

#[test]
fn test_nested_block_is_rejected() {
    let err = tokenize_segments("{a {b}}").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::NestedEmbeddedCode);
    assert_eq!(err.position, 3);
    assert_eq!(err.opened_at, Some(0));
}

#[test]
fn test_newline_in_block_is_rejected() {
    let err = tokenize_segments("{a\n}").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::NewlineInEmbeddedCode);
    assert_eq!(err.snippet, "{a\n}");
}

#[test]
fn test_unexpected_close_brace() {
    let err = tokenize_segments("a}").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCloseBrace);
    assert_eq!(err.position, 1);
}

#[test]
fn test_unterminated_block() {
    let err = tokenize_segments("text {open").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedEmbeddedCode);
    assert_eq!(err.opened_at, Some(5));
}

#[test]
fn test_segments_reconstruct_input() {
    for input in ["{first} and {second}", "Hello {s:name}!", "{a}{b}", "just text"] {
        let rebuilt: String = tokenize_segments(input)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        let squash = |s: &str| s.split_whitespace().collect::<String>();
        assert_eq!(squash(&rebuilt), squash(input), "input: {input:?}");
    }
}
