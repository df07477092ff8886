//! Integration tests for rendering parsed documents into elements

use std::borrow::Cow;

use pretty_assertions::assert_eq;
use rstest::rstest;
use ruledown_core::{
    Dimension, Document, Element, ElementKind, Engine, ImageSource, Layout, Node, NodeBody,
    Parser, Registry, RenderError, RenderOptions, RenderState, Renderer, Span, TextStyle,
};

fn render(input: &str) -> Vec<Element> {
    let registry = Registry::standard();
    let doc = Parser::new(registry).parse(input).unwrap();
    Renderer::new(registry).render(&doc.nodes).unwrap()
}

fn kinds(elements: &[Element]) -> Vec<ElementKind> {
    elements.iter().map(|e| e.kind.clone()).collect()
}

// ============================================================================
// Plain Text
// ============================================================================

#[rstest]
#[case("hello", "hello")]
#[case("  padded words  ", "padded words")]
#[case("line one\nline two\n", "line one\nline two")]
fn test_plain_text_renders_trimmed(#[case] input: &str, #[case] expected: &str) {
    let elements = render(input);
    assert_eq!(kinds(&elements), vec![ElementKind::Literal(expected.into())]);
}

#[test]
fn test_base_text_is_not_trimmed() {
    let registry = Registry::build(&ruledown_core::rules::base(), &[]).unwrap();
    let doc = Parser::new(&registry).parse(" a ").unwrap();
    let elements = Renderer::new(&registry).render(&doc.nodes).unwrap();
    assert_eq!(elements[0].kind, ElementKind::Literal(" a ".into()));
}

// ============================================================================
// Constructs
// ============================================================================

#[test]
fn test_line_bold_renders_row() {
    let elements = render("__hi__ there\n");
    assert_eq!(elements.len(), 1);

    let row = &elements[0];
    assert_eq!(row.kind, ElementKind::View(Layout::Row));
    assert_eq!(
        kinds(&row.children),
        vec![
            ElementKind::Styled(TextStyle::Bold),
            ElementKind::Literal("there".into()),
        ]
    );
    assert_eq!(row.children[0].plain_text(), "hi");
}

#[test]
fn test_spoiler_renders_like_its_content() {
    let spoiler = render("~!secret!~");
    let alone = render("secret");

    assert_eq!(spoiler.len(), 1);
    assert_eq!(spoiler[0].kind, ElementKind::Spoiler);
    assert_eq!(spoiler[0].children.len(), alone.len());
    for (inner, plain) in spoiler[0].children.iter().zip(&alone) {
        assert!(inner.same_shape(plain));
    }
}

#[test]
fn test_sized_image_uses_default_size() {
    let elements = render("img(https://x/y.png)");
    assert_eq!(
        elements[0].kind,
        ElementKind::Image(ImageSource {
            uri: "https://x/y.png".into(),
            width: Dimension::Points(200),
            height: 200,
            radius: 0,
            href: None,
        })
    );
}

#[test]
fn test_sized_image_uses_given_width() {
    let elements = render("img64(a.png)");
    let ElementKind::Image(image) = &elements[0].kind else {
        panic!("expected an image, got {:?}", elements[0].kind);
    };
    assert_eq!(image.width, Dimension::Points(64));
    assert_eq!(image.height, 64);
}

#[test]
fn test_video_renders_linked_thumbnail() {
    let elements = render("-youtube(https://www.youtube.com/watch?v=abc123)");
    assert_eq!(
        elements[0].kind,
        ElementKind::Image(ImageSource {
            uri: "https://img.youtube.com/vi/abc123/0.jpg".into(),
            width: Dimension::Percent(100),
            height: 200,
            radius: 4,
            href: Some("https://www.youtube.com/watch?v=abc123".into()),
        })
    );
}

#[test]
fn test_center_renders_centered_view() {
    let elements = render("~~~*hey*~~~");
    assert_eq!(elements[0].kind, ElementKind::View(Layout::Centered));
    assert_eq!(
        elements[0].children[0].kind,
        ElementKind::Styled(TextStyle::Italic)
    );
}

#[test]
fn test_link_wraps_label() {
    let elements = render("[go](https://example.org)");
    assert_eq!(
        elements[0].kind,
        ElementKind::Link("https://example.org".into())
    );
    assert_eq!(elements[0].plain_text(), "go");
}

#[test]
fn test_render_options_apply() {
    let registry = Registry::standard();
    let doc = Parser::new(registry)
        .parse("-youtube(https://youtube.com/watch?v=v1) img(a.png)")
        .unwrap();
    let options = RenderOptions {
        image_size: 48,
        video_height: 90,
        corner_radius: 12,
    };
    let elements = Renderer::new(registry)
        .with_options(options)
        .render(&doc.nodes)
        .unwrap();

    let images: Vec<&ImageSource> = elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Image(image) => Some(image),
            _ => None,
        })
        .collect();
    assert_eq!(images.len(), 2);
    assert_eq!((images[0].height, images[0].radius), (90, 12));
    assert_eq!(images[1].width, Dimension::Points(48));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_keys_unique_and_one_per_node() {
    let registry = Registry::standard();
    let doc = Parser::new(registry)
        .parse("a *b* ~!c [d](e)!~ img(f) ~~~g~~~")
        .unwrap();
    let mut state = RenderState::default();
    let renderer = Renderer::new(registry);
    let elements: Vec<Element> = doc
        .nodes
        .iter()
        .map(|node| renderer.render_node(node, &mut state).unwrap())
        .collect();

    let mut keys: Vec<u64> = elements.iter().flat_map(Element::keys).collect();
    assert_eq!(keys.len(), doc.node_count());
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), doc.node_count());
    assert_eq!(state.keys_issued(), doc.node_count() as u64);
}

#[test]
fn test_shared_state_continues_keys_across_passes() {
    let registry = Registry::standard();
    let parser = Parser::new(registry);
    let renderer = Renderer::new(registry);
    let deep = parser.parse("~!*a [b](c)*!~").unwrap();
    let flat = parser.parse("d").unwrap();

    let mut state = RenderState::default();
    let first = renderer.render_document_with_state(&deep, &mut state).unwrap();
    let issued = state.keys_issued();
    let second = renderer.render_document_with_state(&flat, &mut state).unwrap();

    assert_eq!(issued, first.element_count() as u64);
    assert_eq!(second.key, issued);
    assert!(first.keys().iter().all(|key| !second.keys().contains(key)));
}

#[test]
fn test_line_bold_wrapper_keys_are_unique() {
    let registry = Registry::standard();
    let doc = Parser::new(registry).parse("__a__ b\n__c__ d").unwrap();
    let root = Renderer::new(registry).render_document(&doc).unwrap();

    let mut keys = root.keys();
    let total = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), total);
    assert_eq!(root.element_count(), total);
}

#[test]
fn test_rendering_twice_gives_same_shape() {
    let registry = Registry::standard();
    let doc = Parser::new(registry)
        .parse("__t__ r\n~!s *e*!~ img(x) [l](h)")
        .unwrap();
    let renderer = Renderer::new(registry);

    let first = renderer.render_document(&doc).unwrap();
    let mut state = RenderState::default();
    state.next_key();
    state.next_key();
    let second = renderer.render_document_with_state(&doc, &mut state).unwrap();

    assert!(first.same_shape(&second));
    assert_ne!(first.keys(), second.keys());
}

#[test]
fn test_document_root_is_column() {
    let root = Engine::standard().render_str("a").unwrap();
    assert_eq!(root.kind, ElementKind::View(Layout::Column));
    assert_eq!(root.key, 0);
    assert_eq!(root.children[0].key, 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_rule_is_an_error() {
    let doc = Document {
        nodes: vec![Node {
            type_id: "gallery",
            body: NodeBody::Container { content: vec![] },
            span: Span::new(0, 1),
        }],
        span: Span::new(0, 1),
    };
    let err = Renderer::new(Registry::standard())
        .render_document(&doc)
        .unwrap_err();
    assert_eq!(
        err,
        RenderError::UnknownRule {
            type_id: "gallery".into()
        }
    );
}

#[test]
fn test_body_mismatch_is_an_error() {
    let node = Node {
        type_id: "spoiler",
        body: NodeBody::Text {
            text: Cow::Borrowed("x"),
        },
        span: Span::new(0, 1),
    };
    let err = Renderer::new(Registry::standard())
        .render(&[node])
        .unwrap_err();
    assert!(matches!(err, RenderError::BodyMismatch { shape: "text", .. }));
}
