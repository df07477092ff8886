//! Human-readable and JSON printing of trees and statistics.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use ruledown_core::{Dimension, Document, Element, ElementKind, Layout, Node, NodeBody, TextStyle};
use serde::Serialize;

const PREVIEW_CHARS: usize = 40;

// =============================================================================
// Node Tree
// =============================================================================

pub fn document_summary(doc: &Document<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Nodes: {} ({} total, depth {})",
        doc.len(),
        doc.node_count(),
        doc.depth()
    );
    for (i, node) in doc.nodes.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, describe_node(node));
    }
    out
}

pub fn document_verbose(doc: &Document<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Ruledown Tree ===");
    let _ = writeln!(out, "Span: {}..{}", doc.span.start, doc.span.end);
    for (i, node) in doc.nodes.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "[{}] {} @ {}..{}",
            i + 1,
            describe_node(node),
            node.span.start,
            node.span.end
        );
        write_children(&mut out, node.children(), 1);
    }
    out
}

fn write_children(out: &mut String, nodes: &[Node<'_>], indent: usize) {
    let prefix = "  ".repeat(indent);
    for node in nodes {
        let _ = writeln!(
            out,
            "{}{} @ {}..{}",
            prefix,
            describe_node(node),
            node.span.start,
            node.span.end
        );
        write_children(out, node.children(), indent + 1);
    }
}

fn describe_node(node: &Node<'_>) -> String {
    match &node.body {
        NodeBody::Text { text } => format!("{} {}", node.type_id, preview(text)),
        NodeBody::Container { content } => {
            format!("{} ({} children)", node.type_id, content.len())
        }
        NodeBody::Strong { content, rest } => format!(
            "{} ({} children, rest {})",
            node.type_id,
            content.len(),
            preview(rest)
        ),
        NodeBody::Link { content, href } => {
            format!("{} -> {} ({} children)", node.type_id, href, content.len())
        }
        NodeBody::Image { link, width, .. } => match width {
            Some(width) => format!("{} {} (width {})", node.type_id, link, width),
            None => format!("{} {}", node.type_id, link),
        },
        NodeBody::Video { id, .. } => format!("{} {}", node.type_id, id),
    }
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if text.chars().count() > PREVIEW_CHARS {
        "..."
    } else {
        ""
    };
    format!("{:?}{}", head, ellipsis)
}

// =============================================================================
// Element Tree
// =============================================================================

pub fn element_tree(root: &Element, verbose: bool) -> String {
    let mut out = String::new();
    write_element(&mut out, root, 0, verbose);
    out
}

fn write_element(out: &mut String, element: &Element, indent: usize, verbose: bool) {
    let prefix = "  ".repeat(indent);
    let _ = writeln!(
        out,
        "{}#{} {}",
        prefix,
        element.key,
        describe_element(&element.kind, verbose)
    );
    for child in &element.children {
        write_element(out, child, indent + 1, verbose);
    }
}

fn describe_element(kind: &ElementKind, verbose: bool) -> String {
    match kind {
        ElementKind::View(layout) => format!(
            "view({})",
            match layout {
                Layout::Column => "column",
                Layout::Row => "row",
                Layout::Centered => "centered",
            }
        ),
        ElementKind::Styled(TextStyle::Bold) => "bold".to_string(),
        ElementKind::Styled(TextStyle::Italic) => "italic".to_string(),
        ElementKind::Literal(text) => format!("literal {}", preview(text)),
        ElementKind::Image(image) if verbose => {
            let width = match image.width {
                Dimension::Points(points) => points.to_string(),
                Dimension::Percent(percent) => format!("{percent}%"),
            };
            let mut line = format!(
                "image {} {}x{} radius {}",
                image.uri, width, image.height, image.radius
            );
            if let Some(href) = &image.href {
                let _ = write!(line, " -> {href}");
            }
            line
        }
        ElementKind::Image(image) => format!("image {}", image.uri),
        ElementKind::Spoiler => "spoiler".to_string(),
        ElementKind::Link(href) => format!("link -> {href}"),
    }
}

// =============================================================================
// Statistics
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Stats {
    pub top_level: usize,
    pub nodes: usize,
    pub depth: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    pub elements: usize,
    pub keys: usize,
    pub bytes: usize,
    pub lines: usize,
}

impl Stats {
    pub fn collect(doc: &Document<'_>, root: &Element, input: &str) -> Self {
        let mut by_type = BTreeMap::new();
        count_types(&doc.nodes, &mut by_type);
        let mut keys = root.keys();
        keys.sort_unstable();
        keys.dedup();
        Self {
            top_level: doc.len(),
            nodes: doc.node_count(),
            depth: doc.depth(),
            by_type,
            elements: root.element_count(),
            keys: keys.len(),
            bytes: input.len(),
            lines: input.lines().count(),
        }
    }

    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Document Statistics");
        let _ = writeln!(out, "-------------------");
        let _ = writeln!(out, "Nodes:");
        let _ = writeln!(out, "  Top-level:      {}", self.top_level);
        let _ = writeln!(out, "  Total:          {}", self.nodes);
        let _ = writeln!(out, "  Depth:          {}", self.depth);
        for (type_id, count) in &self.by_type {
            let _ = writeln!(out, "  {:<15} {}", format!("{type_id}:"), count);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Rendering:");
        let _ = writeln!(out, "  Elements:       {}", self.elements);
        let _ = writeln!(out, "  Unique keys:    {}", self.keys);
        let _ = writeln!(out);
        let _ = writeln!(out, "Size:");
        let _ = writeln!(out, "  Bytes:          {}", self.bytes);
        let _ = writeln!(out, "  Lines:          {}", self.lines);
        out
    }
}

fn count_types(nodes: &[Node<'_>], counts: &mut BTreeMap<&'static str, usize>) {
    for node in nodes {
        *counts.entry(node.type_id).or_default() += 1;
        count_types(node.children(), counts);
    }
}
