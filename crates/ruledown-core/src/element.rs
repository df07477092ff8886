//! Output tree produced by the renderer.
//!
//! Elements mirror the primitives of a native UI toolkit: layout views, text
//! runs, images and a tap-to-reveal spoiler wrapper. Every element carries a
//! key unique within one render pass so a reconciler can track identity.

/// One keyed unit of rendered output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    pub key: u64,
    pub kind: ElementKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    /// Layout container.
    View(Layout),
    /// Styled text run wrapping its children.
    Styled(TextStyle),
    /// Literal text leaf.
    Literal(String),
    Image(ImageSource),
    /// Content hidden until the reader interacts with it.
    Spoiler,
    /// Pressable link to the given target.
    Link(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    Column,
    Row,
    /// Children centered on the cross axis.
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextStyle {
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageSource {
    pub uri: String,
    pub width: Dimension,
    pub height: u32,
    pub radius: u32,
    /// Where pressing the image leads, for link-backed previews.
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dimension {
    Points(u32),
    Percent(u8),
}

impl Element {
    pub fn new(key: u64, kind: ElementKind) -> Self {
        Self {
            key,
            kind,
            children: Vec::new(),
        }
    }

    pub fn literal(key: u64, text: impl Into<String>) -> Self {
        Self::new(key, ElementKind::Literal(text.into()))
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Concatenated literal text of this subtree, in order.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let ElementKind::Literal(text) = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Keys of this subtree in pre-order.
    pub fn keys(&self) -> Vec<u64> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<u64>) {
        keys.push(self.key);
        for child in &self.children {
            child.collect_keys(keys);
        }
    }

    /// Number of elements in this subtree.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(Element::element_count).sum::<usize>()
    }

    /// Structural equality ignoring keys.
    pub fn same_shape(&self, other: &Element) -> bool {
        self.kind == other.kind
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }
}
