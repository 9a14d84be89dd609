//! Tag tables for JATS body content.
//!
//! Dispatch is a pure function of the tag name: every tag in content
//! position is either parsed into a node kind, unwrapped as emphasis,
//! skipped as unsupported, or rejected as schema drift.

use super::types::{NodeKind, TagClass};

/// Inline formatting tags whose text is kept and whose markup is dropped.
pub const EMPHASIS_TAGS: [&str; 11] = [
    "bold",
    "italic",
    "monospace",
    "overline",
    "roman",
    "sans-serif",
    "sc",
    "strike",
    "underline",
    "sup",
    "sub",
];

/// Tags that are recognised but not parsed. Their content is dropped with
/// a warning.
pub const UNSUPPORTED_TAGS: [&str; 6] = [
    "ref-list",
    "def-list",
    "verse-group",
    "array",
    "inline-formula",
    "email",
];

/// Map a tag to the node kind it is parsed into.
#[must_use]
pub fn node_kind(tag: &str) -> Option<NodeKind> {
    let kind = match tag {
        "sec" => NodeKind::Section,
        "p" => NodeKind::Paragraph,
        "fig" => NodeKind::Figure,

        // Links, media and formulas
        "graphic" | "media" | "disp-formula" | "xref" | "ext-link" | "inline-graphic" | "uri"
        | "related-article" | "inline-supplementary-material" => NodeKind::ReferencedContent,

        // Tables
        "table" => NodeKind::Table,
        "table-wrap" => NodeKind::TableWrap,
        "table-wrap-group" => NodeKind::TableGroup,

        // Generic containers
        "supplementary-material" | "disp-quote" | "statement" | "fn" | "fn-group" => {
            NodeKind::NestedContainer
        }
        "boxed-text" | "named-content" | "speech" => NodeKind::SeparatedContent,

        "speaker" => NodeKind::Speaker,
        "list" => NodeKind::List,
        _ => return None,
    };
    Some(kind)
}

/// Classify a tag found in content position.
///
/// Returns `None` for tags outside every known set.
///
/// # Examples
/// ```
/// use jats_article::registry::{classify, NodeKind, TagClass};
///
/// assert_eq!(classify("sec"), Some(TagClass::Node(NodeKind::Section)));
/// assert_eq!(classify("italic"), Some(TagClass::Emphasis));
/// assert_eq!(classify("def-list"), Some(TagClass::Unsupported));
/// assert_eq!(classify("blink"), None);
/// ```
#[must_use]
pub fn classify(tag: &str) -> Option<TagClass> {
    if EMPHASIS_TAGS.contains(&tag) {
        return Some(TagClass::Emphasis);
    }
    if UNSUPPORTED_TAGS.contains(&tag) {
        return Some(TagClass::Unsupported);
    }
    node_kind(tag).map(TagClass::Node)
}

/// Check whether a tag is a label/caption/title child.
#[must_use]
pub fn is_descriptive(tag: &str) -> bool {
    matches!(tag, "label" | "caption" | "title")
}
