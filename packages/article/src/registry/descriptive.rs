//! Extraction of `<label>`, `<caption>` and `<title>` children.

use roxmltree::{Node, NodeId};

use super::config::is_descriptive;
use super::types::ParseContext;
use crate::error::ParseWarning;
use crate::xml::{describe, element_children, get_tag_name, itertext};

/// Descriptive children of an element, with their node ids.
///
/// The tree is never modified: the parser skips `consumed` nodes when it
/// walks the remaining children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptive {
    pub label: Option<String>,
    pub caption: Option<String>,
    pub title: Option<String>,
    consumed: Vec<NodeId>,
}

impl Descriptive {
    /// Extract the first `label`, `caption` and `title` children of `node`.
    ///
    /// Each takes the full descendant text of the child, trimmed. A second
    /// child of the same kind is skipped with an
    /// [`ParseWarning::UnsupportedTag`] warning.
    pub fn extract(node: Node<'_, '_>, ctx: &mut ParseContext) -> Self {
        let mut descriptive = Self::default();

        for child in element_children(node) {
            let tag = get_tag_name(child);
            if !is_descriptive(tag) {
                continue;
            }

            let slot = match tag {
                "label" => &mut descriptive.label,
                "caption" => &mut descriptive.caption,
                _ => &mut descriptive.title,
            };

            if slot.is_some() {
                ctx.warn(ParseWarning::UnsupportedTag {
                    tag_name: tag.to_string(),
                    context: Some(describe(node)),
                });
            } else {
                *slot = Some(itertext(child).trim().to_string());
            }
            descriptive.consumed.push(child.id());
        }

        descriptive
    }

    /// Node ids of every descriptive child, including skipped duplicates.
    #[must_use]
    pub fn consumed(&self) -> &[NodeId] {
        &self.consumed
    }

    /// Concatenate title, label and caption, in that order, with no
    /// separator. Falls back to `fallback` when the result is empty.
    ///
    /// # Examples
    /// ```
    /// use jats_article::registry::{Descriptive, ParseContext};
    /// use roxmltree::Document;
    ///
    /// let xml = r#"<fig><label>Fig. 1</label><caption><p>A cat.</p></caption></fig>"#;
    /// let doc = Document::parse(xml).unwrap();
    /// let mut ctx = ParseContext::new();
    ///
    /// let descriptive = Descriptive::extract(doc.root_element(), &mut ctx);
    /// assert_eq!(descriptive.compose_title("Figure"), "Fig. 1A cat.");
    /// ```
    #[must_use]
    pub fn compose_title(&self, fallback: &str) -> String {
        let composed: String = [&self.title, &self.label, &self.caption]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        if composed.is_empty() {
            fallback.to_string()
        } else {
            composed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn extract(xml: &str) -> (Descriptive, Vec<ParseWarning>) {
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();
        let descriptive = Descriptive::extract(doc.root_element(), &mut ctx);
        (descriptive, ctx.into_warnings())
    }

    #[test]
    fn test_title_only() {
        let (d, _) = extract("<sec><title>Methods</title><p>x</p></sec>");
        assert_eq!(d.title.as_deref(), Some("Methods"));
        assert_eq!(d.compose_title("Section"), "Methods");
        assert_eq!(d.consumed().len(), 1);
    }

    #[test]
    fn test_order_is_title_label_caption() {
        let (d, _) = extract(
            "<table-wrap><caption>Cap</caption><label>T1</label><title>Ti</title></table-wrap>",
        );
        assert_eq!(d.compose_title("TableWrap"), "TiT1Cap");
    }

    #[test]
    fn test_fallback_when_absent() {
        let (d, _) = extract("<fig><graphic/></fig>");
        assert_eq!(d.compose_title("Figure"), "Figure");
        assert!(d.consumed().is_empty());
    }

    #[test]
    fn test_fallback_when_all_empty() {
        let (d, _) = extract("<sec><title/></sec>");
        assert_eq!(d.compose_title("Section"), "Section");
        assert_eq!(d.consumed().len(), 1);
    }

    #[test]
    fn test_caption_uses_nested_text() {
        let (d, _) = extract("<fig><caption><title>Growth</title><p> over <italic>time</italic></p></caption></fig>");
        assert_eq!(d.caption.as_deref(), Some("Growth over time"));
    }

    #[test]
    fn test_duplicate_is_consumed_with_warning() {
        let (d, warnings) = extract("<sec><title>One</title><title>Two</title></sec>");
        assert_eq!(d.title.as_deref(), Some("One"));
        assert_eq!(d.consumed().len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ParseWarning::UnsupportedTag { .. }));
    }
}
