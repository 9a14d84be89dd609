//! Recursive descent from body elements to content nodes.

use roxmltree::{Node, NodeId};

use super::config::classify;
use super::handlers;
use super::types::{ParseContext, TagClass};
use crate::error::{ArticleError, ParseWarning, Result};
use crate::model::{ContentNode, Text};
use crate::xml::{describe, element_children, get_tag_name, itertext};

/// Engine that turns element trees into content nodes.
///
/// Each element in content position is classified by tag and dispatched
/// to its constructor, which recurses back into the engine for its
/// children. An element whose tag is in no known set aborts the parse
/// with [`ArticleError::SchemaDrift`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseEngine;

impl ParseEngine {
    /// Create a new engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse the children of `node` in document order.
    ///
    /// Direct text before the first child becomes a `Text` node, every
    /// child not listed in `skip` is dispatched, and each child's tail
    /// text follows it as another `Text` node. Whitespace-only runs are
    /// dropped.
    ///
    /// # Errors
    /// Returns `SchemaDrift` if any descendant has an unknown tag.
    pub fn parse_children(
        &self,
        node: Node<'_, '_>,
        skip: &[NodeId],
        ctx: &mut ParseContext,
    ) -> Result<Vec<ContentNode>> {
        let mut content = Vec::new();
        push_text(&mut content, node.text());

        for child in element_children(node) {
            if !skip.contains(&child.id()) {
                if let Some(parsed) = self.parse(child, ctx)? {
                    content.push(parsed);
                }
            }
            push_text(&mut content, child.tail());
        }

        Ok(content)
    }

    /// Parse a single element in content position.
    ///
    /// Returns `None` for elements that produce no node: unsupported tags
    /// and emphasis without any text.
    ///
    /// # Errors
    /// Returns `SchemaDrift` if the element or any descendant has an
    /// unknown tag.
    pub fn parse(&self, node: Node<'_, '_>, ctx: &mut ParseContext) -> Result<Option<ContentNode>> {
        let tag_name = get_tag_name(node);

        match classify(tag_name) {
            Some(TagClass::Node(kind)) => handlers::build(kind, node, ctx, self).map(Some),
            Some(TagClass::Emphasis) => Ok(text_node(&itertext(node))),
            Some(TagClass::Unsupported) => {
                ctx.warn(ParseWarning::UnsupportedTag {
                    tag_name: tag_name.to_string(),
                    context: node.parent_element().map(describe),
                });
                Ok(None)
            }
            None => Err(ArticleError::SchemaDrift {
                tag_name: tag_name.to_string(),
                context: node.parent_element().map(describe),
            }),
        }
    }
}

fn text_node(text: &str) -> Option<ContentNode> {
    if text.trim().is_empty() {
        None
    } else {
        Some(ContentNode::Text(Text::new(text)))
    }
}

fn push_text(content: &mut Vec<ContentNode>, text: Option<&str>) {
    if let Some(node) = text.and_then(text_node) {
        content.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn parse_children(xml: &str) -> (Result<Vec<ContentNode>>, ParseContext) {
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();
        let result = ParseEngine::new().parse_children(doc.root_element(), &[], &mut ctx);
        (result, ctx)
    }

    fn kinds(content: &[ContentNode]) -> Vec<&'static str> {
        content.iter().map(ContentNode::kind_name).collect()
    }

    #[test]
    fn test_text_and_tail_order() {
        let (result, _) = parse_children(
            r##"<p>See <xref rid="f1">Figure 1</xref> and <ext-link>site</ext-link> here.</p>"##,
        );
        let content = result.unwrap();
        assert_eq!(
            kinds(&content),
            vec![
                "Text",
                "ReferencedContent",
                "Text",
                "ReferencedContent",
                "Text"
            ]
        );
        assert_eq!(content[0].text_content(), "See ");
        assert_eq!(content[4].text_content(), " here.");
    }

    #[test]
    fn test_emphasis_is_unwrapped() {
        let (result, _) = parse_children("<p>A <bold>very <italic>bold</italic></bold> claim</p>");
        let content = result.unwrap();
        let texts: Vec<_> = content.iter().map(ContentNode::text_content).collect();
        assert_eq!(texts, vec!["A ", "very bold", " claim"]);
    }

    #[test]
    fn test_whitespace_runs_are_dropped() {
        let (result, _) = parse_children("<sec>\n  <p>one</p>\n  <p>two</p>\n</sec>");
        assert_eq!(kinds(&result.unwrap()), vec!["Paragraph", "Paragraph"]);
    }

    #[test]
    fn test_unsupported_tag_warns_and_skips() {
        let (result, ctx) = parse_children("<sec><def-list><def-item/></def-list><p>kept</p></sec>");
        assert_eq!(kinds(&result.unwrap()), vec!["Paragraph"]);
        assert_eq!(
            ctx.warnings(),
            &[ParseWarning::UnsupportedTag {
                tag_name: "def-list".to_string(),
                context: Some("<sec>".to_string()),
            }]
        );
    }

    #[test]
    fn test_unknown_tag_is_schema_drift() {
        let (result, _) = parse_children("<sec><p>ok</p><p><blink>no</blink></p></sec>");
        match result {
            Err(ArticleError::SchemaDrift { tag_name, context }) => {
                assert_eq!(tag_name, "blink");
                assert_eq!(context.as_deref(), Some("<p>"));
            }
            other => panic!("expected SchemaDrift, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_list_is_honoured() {
        let doc = Document::parse("<sec><title>T</title><p>x</p></sec>").unwrap();
        let root = doc.root_element();
        let title = root.first_element_child().unwrap();
        let mut ctx = ParseContext::new();

        let content = ParseEngine::new()
            .parse_children(root, &[title.id()], &mut ctx)
            .unwrap();
        assert_eq!(kinds(&content), vec!["Paragraph"]);
    }
}
