//! Constructors for each content node kind.

mod containers;
mod leaves;
mod tables;

pub use containers::*;
pub use leaves::*;
pub use tables::*;

use roxmltree::Node;

use super::engine::ParseEngine;
use super::types::{NodeKind, ParseContext};
use crate::error::Result;
use crate::model::ContentNode;

/// Build the content node for an element of the given kind.
///
/// # Errors
/// Propagates `SchemaDrift` from container children.
pub fn build(
    kind: NodeKind,
    node: Node<'_, '_>,
    ctx: &mut ParseContext,
    engine: &ParseEngine,
) -> Result<ContentNode> {
    let built = match kind {
        NodeKind::Section => ContentNode::Section(container(node, kind, ctx, engine)?),
        NodeKind::Paragraph => ContentNode::Paragraph(paragraph(node, ctx, engine)?),
        NodeKind::NestedContainer => {
            ContentNode::NestedContainer(container(node, kind, ctx, engine)?)
        }
        NodeKind::SeparatedContent => {
            ContentNode::SeparatedContent(container(node, kind, ctx, engine)?)
        }
        NodeKind::TableGroup => ContentNode::TableGroup(container(node, kind, ctx, engine)?),
        NodeKind::TableWrap => ContentNode::TableWrap(table_wrap(node, ctx)),
        NodeKind::Table => ContentNode::Table(table(node, ctx)),
        NodeKind::Figure => ContentNode::Figure(figure(node, ctx)),
        NodeKind::List => ContentNode::List(list(node, ctx)),
        NodeKind::ReferencedContent => ContentNode::ReferencedContent(referenced_content(node, ctx)),
        NodeKind::Speaker => ContentNode::Text(speaker(node)),
    };
    Ok(built)
}
