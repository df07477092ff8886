//! Integration tests for the rule-driven parser

use std::borrow::Cow;

use pretty_assertions::assert_eq;
use rstest::rstest;
use ruledown_core::rules::{self, CENTER, EM, IMAGE, LINK, SPOILER, STRONG, TEXT, VIDEO};
use ruledown_core::{
    Capture, Document, Element, GrammarError, MatchResult, NestedParser, NestedRenderer, Node,
    NodeBody, ParseOptions, ParseState, Parser, Registry, RenderError, RenderState, Rule, Span,
    MAX_DEPTH_CEILING,
};

fn parse(input: &str) -> Document<'_> {
    Parser::new(Registry::standard()).parse(input).unwrap()
}

fn parse_inline(input: &str) -> Document<'_> {
    Parser::new(Registry::standard())
        .inline(true)
        .parse(input)
        .unwrap()
}

fn text(s: &str, span: Span) -> Node<'_> {
    Node {
        type_id: TEXT,
        body: NodeBody::Text {
            text: Cow::Borrowed(s),
        },
        span,
    }
}

/// Shape of a tree as `type(children)` for compact comparisons.
fn outline(nodes: &[Node<'_>]) -> String {
    nodes
        .iter()
        .map(|node| match node.text() {
            Some(text) => format!("{}:{:?}", node.type_id, text),
            None if node.children().is_empty() => node.type_id.to_string(),
            None => format!("{}({})", node.type_id, outline(node.children())),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_line_bold_keeps_rest_opaque() {
    let doc = parse("__hi__ there\n");

    assert_eq!(doc.nodes.len(), 1);
    let node = &doc.nodes[0];
    assert_eq!(node.type_id, STRONG);
    assert_eq!(node.span, Span::new(0, 13));
    assert_eq!(
        node.body,
        NodeBody::Strong {
            content: vec![text("hi", Span::new(2, 4))],
            rest: Cow::Borrowed(" there"),
        }
    );
}

#[test]
fn test_spoiler_wraps_nested_content() {
    let doc = parse("~!secret!~");
    assert_eq!(outline(&doc.nodes), r#"spoiler(text:"secret")"#);
    assert_eq!(doc.nodes[0].children()[0].span, Span::new(2, 8));
}

#[test]
fn test_long_unrecognized_run_is_one_node() {
    let input = "x".repeat(10_000);
    let mut state = ParseState::new(&ParseOptions::default());
    let doc = Parser::new(Registry::standard())
        .parse_with_state(&input, &mut state)
        .unwrap();

    assert_eq!(doc.nodes, vec![text(&input, Span::new(0, 10_000))]);
    assert!(state.steps() <= input.len());
}

#[test]
fn test_sized_image_without_width() {
    let doc = parse("img(https://x/y.png)");
    assert_eq!(doc.nodes.len(), 1);
    assert_eq!(doc.nodes[0].type_id, IMAGE);
    assert_eq!(
        doc.nodes[0].body,
        NodeBody::Image {
            link: Cow::Borrowed("https://x/y.png"),
            alt: None,
            width: None,
        }
    );
}

#[test]
fn test_center_in_block_mode() {
    let doc = parse("~~~center me~~~");
    assert_eq!(outline(&doc.nodes), r#"center(text:"center me")"#);
}

#[test]
fn test_unterminated_spoiler_is_literal() {
    let doc = parse("~!oops");
    assert_eq!(doc.nodes, vec![text("~!oops", Span::new(0, 6))]);
}

// ============================================================================
// Rule Coverage
// ============================================================================

#[rstest]
#[case("*soft*", r#"em(text:"soft")"#)]
#[case("[home](https://example.org)", r#"link(text:"home")"#)]
#[case("img220(a.png)", "image")]
#[case("-youtube(https://youtube.com/watch?v=abc)", "youtube")]
#[case("~!a *b*!~", r#"spoiler(text:"a " em(text:"b"))"#)]
#[case("**bold** rest", r#"strong(text:"bold")"#)]
#[case("~~~line one\nline two~~~", r#"center(text:"line one\nline two")"#)]
fn test_single_construct(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(outline(&parse(input).nodes), expected);
}

#[test]
fn test_link_body() {
    let doc = parse("[a *b*](https://x.org/p?q=1) after");
    let NodeBody::Link { content, href } = &doc.nodes[0].body else {
        panic!("expected a link, got {:?}", doc.nodes[0]);
    };
    assert_eq!(href, "https://x.org/p?q=1");
    assert_eq!(outline(content), r#"text:"a " em(text:"b")"#);
    assert_eq!(doc.nodes[1].text(), Some(" after"));
}

#[test]
fn test_sized_image_width() {
    let doc = parse("img320(a.png)");
    let NodeBody::Image { width, .. } = doc.nodes[0].body else {
        panic!("expected an image");
    };
    assert_eq!(width, Some(320));
}

#[test]
fn test_oversized_width_falls_back_to_none() {
    let doc = parse("img99999999999(a.png)");
    let NodeBody::Image { width, .. } = doc.nodes[0].body else {
        panic!("expected an image");
    };
    assert_eq!(width, None);
}

#[test]
fn test_markdown_image_in_base_grammar() {
    let registry = Registry::build(&rules::base(), &[]).unwrap();
    let doc = Parser::new(&registry).parse("![a cat](c.png)").unwrap();
    assert_eq!(
        doc.nodes[0].body,
        NodeBody::Image {
            link: Cow::Borrowed("c.png"),
            alt: Some(Cow::Borrowed("a cat")),
            width: None,
        }
    );
}

#[test]
fn test_video_body() {
    let doc = parse("-youtube(https://www.youtube.com/watch?v=dQw4w9WgXcQ)");
    assert_eq!(doc.nodes[0].type_id, VIDEO);
    assert_eq!(
        doc.nodes[0].body,
        NodeBody::Video {
            link: Cow::Borrowed("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            id: Cow::Borrowed("dQw4w9WgXcQ"),
        }
    );
}

#[test]
fn test_video_without_id_is_text() {
    let doc = parse("-youtube(https://youtu.be/x)");
    assert!(doc.nodes.iter().all(|node| node.type_id != VIDEO));
}

// ============================================================================
// Precedence and Modes
// ============================================================================

#[test]
fn test_line_bold_wins_over_delimited() {
    // The base rule would stop at the first `__`; the dialect rule takes the
    // last one on the line.
    let doc = parse("__a__ b __c__ d\nnext");
    assert_eq!(doc.nodes.len(), 2);
    let NodeBody::Strong { content, rest } = &doc.nodes[0].body else {
        panic!("expected line bold");
    };
    // Inside the content the dialect rule applies again.
    assert_eq!(outline(content), r#"text:"a" strong(text:" b ")"#);
    assert_eq!(rest, " d");
    assert_eq!(doc.nodes[1].text(), Some("next"));
}

#[test]
fn test_base_grammar_uses_delimited_bold() {
    let registry = Registry::build(&rules::base(), &[]).unwrap();
    let doc = Parser::new(&registry).parse("**a** b").unwrap();
    assert_eq!(outline(&doc.nodes), r#"strong(text:"a") text:" b""#);
    assert!(matches!(doc.nodes[0].body, NodeBody::Container { .. }));
}

#[test]
fn test_inline_mode_skips_center() {
    let doc = parse_inline("~~~center me~~~");
    assert_eq!(doc.nodes, vec![text("~~~center me~~~", Span::new(0, 15))]);
}

#[test]
fn test_inline_mode_reaches_nested_content() {
    let doc = parse_inline("~!~~~x~~~!~");
    assert_eq!(outline(&doc.nodes), r#"spoiler(text:"~~~x~~~")"#);
}

#[test]
fn test_spoiler_does_not_span_lines() {
    let doc = parse("~!a\nb!~");
    assert!(doc.nodes.iter().all(|node| node.type_id != SPOILER));
    assert_eq!(doc.nodes.len(), 1);
}

#[test]
fn test_spoiler_closes_at_first_marker() {
    let doc = parse("~!a!~ and ~!b!~");
    assert_eq!(
        outline(&doc.nodes),
        r#"spoiler(text:"a") text:" and " spoiler(text:"b")"#
    );
}

#[test]
fn test_center_containing_inline_constructs() {
    let doc = parse("~~~*hey* [x](y)~~~");
    assert_eq!(doc.nodes[0].type_id, CENTER);
    let kinds: Vec<_> = doc.nodes[0].children().iter().map(|n| n.type_id).collect();
    assert_eq!(kinds, vec![EM, TEXT, LINK]);
}

// ============================================================================
// Text Merging and Spans
// ============================================================================

#[rstest]
#[case("plain words only")]
#[case("punctuation, like this! (and this)")]
#[case("snake_case and 2*3")]
#[case("日本語 テキスト")]
#[case("[not a link] (nope)")]
fn test_unmatched_input_is_single_text(#[case] input: &str) {
    let doc = parse(input);
    assert_eq!(doc.nodes, vec![text(input, Span::new(0, input.len()))]);
}

#[test]
fn test_top_level_spans_tile_input() {
    let input = "a *b* ~!c!~ img(d) [e](f) __g__ h";
    let doc = parse(input);
    let mut cursor = 0;
    for node in &doc.nodes {
        assert_eq!(node.span.start, cursor);
        cursor = node.span.end;
    }
    assert_eq!(cursor, input.len());
    assert_eq!(doc.span, Span::new(0, input.len()));
}

#[test]
fn test_text_borrows_from_input() {
    let doc = parse("hello world");
    let NodeBody::Text { text } = &doc.nodes[0].body else {
        panic!("expected text");
    };
    // Merged runs own their text; a single run stays borrowed.
    assert_eq!(text, "hello world");

    let doc = parse("hello");
    assert!(matches!(
        &doc.nodes[0].body,
        NodeBody::Text {
            text: Cow::Borrowed(_)
        }
    ));
}

#[test]
fn test_empty_input() {
    let doc = parse("");
    assert!(doc.is_empty());
    assert_eq!(doc.span, Span::new(0, 0));
}

// ============================================================================
// Depth Limit
// ============================================================================

#[test]
fn test_depth_limit_degrades_to_text() {
    let options = ParseOptions {
        max_depth: 1,
        ..ParseOptions::default()
    };
    let doc = Parser::new(Registry::standard())
        .with_options(options)
        .parse("[~!*y*!~](u)")
        .unwrap();

    assert_eq!(outline(&doc.nodes), r#"link(spoiler(text:"*y*"))"#);
}

#[test]
fn test_nesting_within_default_limit() {
    let doc = parse("[~!*y*!~](u)");
    assert_eq!(outline(&doc.nodes), r#"link(spoiler(em(text:"y")))"#);
    assert_eq!(doc.depth(), 4);
    assert_eq!(doc.node_count(), 4);
}

#[test]
fn test_depth_is_restored_after_parse() {
    let mut state = ParseState::new(&ParseOptions::default());
    Parser::new(Registry::standard())
        .parse_with_state("~!*a*!~ b", &mut state)
        .unwrap();
    assert_eq!(state.depth(), 0);
    assert!(state.steps() > 0);
}

#[test]
fn test_configured_depth_is_capped() {
    let options = ParseOptions {
        max_depth: usize::MAX,
        ..ParseOptions::default()
    };
    let input = "__".repeat(2_000);
    let doc = Parser::new(Registry::standard())
        .with_options(options)
        .parse(&input)
        .unwrap();

    assert_eq!(doc.depth(), MAX_DEPTH_CEILING + 2);
}

// ============================================================================
// Grammar Defects
// ============================================================================

/// Matches `%` without consuming it, which `Registry::build` never sees.
fn stall_on_percent(source: &str) -> Option<MatchResult> {
    source.starts_with('%').then(|| MatchResult::new(0))
}

fn no_body<'a>(
    _capture: &Capture<'a>,
    _nested: &NestedParser<'_>,
    _state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Container {
        content: Vec::new(),
    })
}

fn blank(
    _node: &Node<'_>,
    key: u64,
    _nested: &NestedRenderer<'_>,
    _state: &mut RenderState,
) -> Result<Element, RenderError> {
    Ok(Element::literal(key, ""))
}

fn stalling_registry() -> Registry {
    let stall = Rule::new("stall", 1.0, stall_on_percent, no_body, blank);
    Registry::build(&rules::base(), &[stall]).unwrap()
}

#[test]
fn test_zero_length_match_halts_at_offset() {
    let registry = stalling_registry();
    let err = Parser::new(&registry).parse("ab %c").unwrap_err();
    assert_eq!(
        err,
        GrammarError::EmptyMatch {
            type_id: "stall",
            offset: 3
        }
    );
}

#[test]
fn test_zero_length_match_inside_nested_content() {
    let registry = stalling_registry();
    let err = Parser::new(&registry).parse("x [y%](z)").unwrap_err();
    assert_eq!(
        err,
        GrammarError::EmptyMatch {
            type_id: "stall",
            offset: 4
        }
    );
}
