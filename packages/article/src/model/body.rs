//! The article body and its top-level queries.

use roxmltree::Node;
use serde::Serialize;

use super::content::ContentNode;
use super::query::{join_texts, Content};
use crate::error::Result;
use crate::registry::{ParseContext, ParseEngine};

/// Outline entry for a top-level section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutline<'a> {
    pub title: &'a str,
    /// Titles of the direct subsections; empty when only main sections
    /// were requested.
    pub subsections: Vec<&'a str>,
}

/// Top-level title with its extracted content.
pub type NestedEntry<'a> = (&'a str, Vec<Content<'a>>);

/// The `<body>` of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Body {
    pub content: Vec<ContentNode>,
}

impl Body {
    /// Parse a `<body>` element.
    ///
    /// # Errors
    /// Returns `SchemaDrift` if any element in the body has an unknown tag.
    pub fn parse(node: Node<'_, '_>, ctx: &mut ParseContext) -> Result<Self> {
        let content = ParseEngine::new().parse_children(node, &[], ctx)?;
        Ok(Self { content })
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Outline of the top-level sections.
    #[must_use]
    pub fn get_structure(&self, main_sections: bool) -> Vec<SectionOutline<'_>> {
        self.content
            .iter()
            .filter_map(|node| match node {
                ContentNode::Section(section) => Some(SectionOutline {
                    title: &section.title,
                    subsections: if main_sections {
                        Vec::new()
                    } else {
                        section.get_titles()
                    },
                }),
                _ => None,
            })
            .collect()
    }

    /// Flattened content of the top-level nodes, optionally restricted to
    /// those whose title is in `sections`.
    #[must_use]
    pub fn get_flat(&self, sections: Option<&[&str]>, text: bool) -> Vec<Content<'_>> {
        self.content
            .iter()
            .filter(|node| sections.is_none_or(|wanted| wanted.contains(&node.title())))
            .flat_map(|node| node.get_content(true, text))
            .collect()
    }

    /// Content grouped by top-level node title.
    ///
    /// With `main_sections`, each node is flattened; in text mode its
    /// texts are also joined into a single [`Content::Text`]. Otherwise
    /// each node keeps its nested structure.
    #[must_use]
    pub fn get_nested(
        &self,
        main_sections: bool,
        sections: Option<&[&str]>,
        text: bool,
    ) -> Vec<NestedEntry<'_>> {
        self.content
            .iter()
            .filter(|node| sections.is_none_or(|wanted| wanted.contains(&node.title())))
            .map(|node| {
                let content = match (main_sections, text) {
                    (true, true) => vec![Content::Text(join_texts(node.get_content(true, true)))],
                    (true, false) => node.get_content(true, false),
                    (false, _) => node.get_content(false, text),
                };
                (node.title(), content)
            })
            .collect()
    }
}
