//! Recursive container constructors.
//!
//! Sections, paragraphs and the generic containers all share one shape:
//! descriptive children become the title, everything else is parsed
//! recursively into the content sequence.

use roxmltree::Node;

use crate::error::Result;
use crate::model::Container;
use crate::registry::descriptive::Descriptive;
use crate::registry::engine::ParseEngine;
use crate::registry::types::{NodeKind, ParseContext};

/// Build a titled container, falling back to the kind name as title.
///
/// # Errors
/// Propagates `SchemaDrift` from the children.
pub fn container(
    node: Node<'_, '_>,
    kind: NodeKind,
    ctx: &mut ParseContext,
    engine: &ParseEngine,
) -> Result<Container> {
    let descriptive = Descriptive::extract(node, ctx);
    let title = descriptive.compose_title(kind.name());
    let content = engine.parse_children(node, descriptive.consumed(), ctx)?;
    Ok(Container::new(title, content))
}

/// Build a paragraph titled `ParagraphN`.
///
/// The number is taken before the children are parsed, so nested
/// paragraphs are numbered after their parent.
///
/// # Errors
/// Propagates `SchemaDrift` from the children.
pub fn paragraph(
    node: Node<'_, '_>,
    ctx: &mut ParseContext,
    engine: &ParseEngine,
) -> Result<Container> {
    let title = ctx.next_paragraph_title();
    let descriptive = Descriptive::extract(node, ctx);
    let content = engine.parse_children(node, descriptive.consumed(), ctx)?;
    Ok(Container::new(title, content))
}
