//! Content extraction over the node tree.
//!
//! Every node answers [`ContentNode::get_content`] in two independent
//! modes: `flatten` collapses nested containers into one sequence of
//! leaves, and `text` renders each leaf as a string instead of returning
//! the node itself.

use crate::config::{LIST_ITEM_SEPARATOR, MAIN_SECTION_TEXT_JOINER};

use super::content::ContentNode;

/// One item of a content query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// A leaf rendered as text.
    Text(String),
    /// A leaf node.
    Node(&'a ContentNode),
    /// A container with its title, when not flattening.
    Nested(&'a str, Vec<Content<'a>>),
}

impl<'a> Content<'a> {
    /// The text of a `Text` item.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The node of a `Node` item.
    #[must_use]
    pub fn as_node(&self) -> Option<&'a ContentNode> {
        match self {
            Self::Node(node) => Some(*node),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl ContentNode {
    /// Extract the content below this node.
    ///
    /// A leaf yields a single item: itself, or its text in text mode. A
    /// container yields its children's results in order. With `flatten`
    /// they are concatenated into one sequence of leaves; without it each
    /// child container becomes a [`Content::Nested`] entry holding its
    /// title and its own (unflattened) content.
    ///
    /// # Examples
    /// ```
    /// use jats_article::model::{Container, Content, ContentNode, Text};
    ///
    /// let sec = ContentNode::Section(Container::new(
    ///     "Intro",
    ///     vec![
    ///         ContentNode::Text(Text::new("a")),
    ///         ContentNode::Paragraph(Container::new("Paragraph1", vec![ContentNode::Text(Text::new("b"))])),
    ///     ],
    /// ));
    ///
    /// assert_eq!(
    ///     sec.get_content(true, true),
    ///     vec![Content::Text("a".into()), Content::Text("b".into())]
    /// );
    /// assert_eq!(
    ///     sec.get_content(false, true),
    ///     vec![
    ///         Content::Text("a".into()),
    ///         Content::Nested("Paragraph1", vec![Content::Text("b".into())]),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn get_content(&self, flatten: bool, text: bool) -> Vec<Content<'_>> {
        match self {
            Self::Paragraph(c)
            | Self::Section(c)
            | Self::NestedContainer(c)
            | Self::SeparatedContent(c)
            | Self::TableGroup(c) => children_content(&c.content, flatten, text),
            Self::TableWrap(w) => children_content(&w.content, flatten, text),
            Self::Text(t) => vec![leaf(self, text, || t.text.clone())],
            Self::Table(t) => vec![leaf(self, text, || t.tabulate())],
            Self::Figure(f) => vec![leaf(self, text, || f.text.clone())],
            Self::List(l) => vec![leaf(self, text, || l.elements.join(LIST_ITEM_SEPARATOR))],
            Self::ReferencedContent(r) => vec![leaf(self, text, || {
                if r.text.is_empty() {
                    r.href.clone().unwrap_or_default()
                } else {
                    r.text.clone()
                }
            })],
        }
    }

    /// Every leaf text below this node, joined with single spaces.
    ///
    /// Empty leaf texts are skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        join_texts(self.get_content(true, true))
    }
}

fn leaf<'a>(
    node: &'a ContentNode,
    text: bool,
    render: impl FnOnce() -> String,
) -> Content<'a> {
    if text {
        Content::Text(render())
    } else {
        Content::Node(node)
    }
}

fn children_content(children: &[ContentNode], flatten: bool, text: bool) -> Vec<Content<'_>> {
    let mut content = Vec::new();
    for child in children {
        if !flatten && child.is_container() {
            content.push(Content::Nested(child.title(), child.get_content(false, text)));
        } else {
            content.extend(child.get_content(flatten, text));
        }
    }
    content
}

/// Join the texts of flattened text-mode content.
pub(crate) fn join_texts(content: Vec<Content<'_>>) -> String {
    content
        .into_iter()
        .filter_map(Content::into_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(MAIN_SECTION_TEXT_JOINER)
}
