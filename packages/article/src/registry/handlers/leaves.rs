//! Leaf constructors: figures, lists, references and speakers.

use roxmltree::Node;

use crate::config::XLINK_NAMESPACE;
use crate::model::{Figure, List, ReferencedContent, Text};
use crate::registry::descriptive::Descriptive;
use crate::registry::types::{NodeKind, ParseContext};
use crate::xml::{collapse_whitespace, get_text, itertext, itertext_excluding};

/// Build a figure from everything outside its label, caption and title.
///
/// Structured children (tables, paragraphs) are not parsed; their text
/// ends up in [`Figure::text`].
pub fn figure(node: Node<'_, '_>, ctx: &mut ParseContext) -> Figure {
    let descriptive = Descriptive::extract(node, ctx);
    Figure {
        title: descriptive.compose_title(NodeKind::Figure.name()),
        label: descriptive.label.clone(),
        caption: descriptive.caption.clone(),
        text: collapse_whitespace(&itertext_excluding(node, descriptive.consumed())),
    }
}

/// Build a list from the text of every `list-item` descendant.
///
/// Nested lists are flattened: a nested item appears both inside its
/// parent's text and as an element of its own.
pub fn list(node: Node<'_, '_>, ctx: &mut ParseContext) -> List {
    let descriptive = Descriptive::extract(node, ctx);
    let elements = node
        .descendants()
        .filter(|n| n.has_tag_name("list-item"))
        .map(|item| collapse_whitespace(&itertext(item)))
        .collect();

    List {
        title: descriptive.compose_title(NodeKind::List.name()),
        elements,
    }
}

/// Build a link or embedded-media reference.
pub fn referenced_content(node: Node<'_, '_>, ctx: &mut ParseContext) -> ReferencedContent {
    let descriptive = Descriptive::extract(node, ctx);
    let href = node
        .attribute((XLINK_NAMESPACE, "href"))
        .or_else(|| node.attribute("href"))
        .map(str::to_string);

    ReferencedContent {
        title: descriptive.compose_title(NodeKind::ReferencedContent.name()),
        href,
        text: get_text(node),
    }
}

/// The speaker of a `<speech>`, kept as plain text.
pub fn speaker(node: Node<'_, '_>) -> Text {
    Text::new(collapse_whitespace(&itertext(node)))
}
