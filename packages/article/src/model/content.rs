//! Content node types.

use std::fmt;

use serde::Serialize;

use crate::config::TABLE_COLUMN_GAP;

/// A run of plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Titled sequence of child nodes.
///
/// Shared by sections, paragraphs and the generic containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub title: String,
    pub content: Vec<ContentNode>,
}

impl Container {
    #[must_use]
    pub fn new(title: impl Into<String>, content: Vec<ContentNode>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Titles of the direct child sections.
    #[must_use]
    pub fn get_titles(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter(|node| matches!(node, ContentNode::Section(_)))
            .map(ContentNode::title)
            .collect()
    }
}

/// A list, flattened to the text of its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub title: String,
    pub elements: Vec<String>,
}

/// A table with its grid fully expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of rows and number of cells in the first row.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    /// Render the grid as left-aligned, space-padded columns.
    ///
    /// # Examples
    /// ```
    /// use jats_article::model::Table;
    ///
    /// let table = Table {
    ///     title: "Table1".to_string(),
    ///     rows: vec![
    ///         vec!["Age".to_string(), "n".to_string()],
    ///         vec!["65+".to_string(), "1024".to_string()],
    ///     ],
    /// };
    /// assert_eq!(table.tabulate(), "Age  n\n65+  1024");
    /// ```
    #[must_use]
    pub fn tabulate(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let line = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .collect::<Vec<_>>()
                    .join(TABLE_COLUMN_GAP);
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        write!(f, "Table(shape=({rows}, {cols}))")
    }
}

/// A `<table-wrap>`: its tables plus the footer notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableWrap {
    pub title: String,
    pub footer: Option<String>,
    /// Only ever holds [`ContentNode::Table`] nodes.
    pub content: Vec<ContentNode>,
}

/// A figure, kept as a leaf with its flattened text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Figure {
    pub title: String,
    pub label: Option<String>,
    pub caption: Option<String>,
    pub text: String,
}

/// A link, cross-reference or embedded media object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencedContent {
    pub title: String,
    pub href: Option<String>,
    pub text: String,
}

/// Any node of a parsed article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ContentNode {
    Text(Text),
    Paragraph(Container),
    Section(Container),
    NestedContainer(Container),
    SeparatedContent(Container),
    TableGroup(Container),
    TableWrap(TableWrap),
    Table(Table),
    Figure(Figure),
    List(List),
    ReferencedContent(ReferencedContent),
}

impl ContentNode {
    /// Human-readable title, used for lookups by name.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Text(_) => "Text",
            Self::Paragraph(c)
            | Self::Section(c)
            | Self::NestedContainer(c)
            | Self::SeparatedContent(c)
            | Self::TableGroup(c) => &c.title,
            Self::TableWrap(w) => &w.title,
            Self::Table(t) => &t.title,
            Self::Figure(f) => &f.title,
            Self::List(l) => &l.title,
            Self::ReferencedContent(r) => &r.title,
        }
    }

    /// Name of the variant.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Paragraph(_) => "Paragraph",
            Self::Section(_) => "Section",
            Self::NestedContainer(_) => "NestedContainer",
            Self::SeparatedContent(_) => "SeparatedContent",
            Self::TableGroup(_) => "TableGroup",
            Self::TableWrap(_) => "TableWrap",
            Self::Table(_) => "Table",
            Self::Figure(_) => "Figure",
            Self::List(_) => "List",
            Self::ReferencedContent(_) => "ReferencedContent",
        }
    }

    /// Child nodes, or `None` for leaves.
    #[must_use]
    pub fn container_children(&self) -> Option<&[ContentNode]> {
        match self {
            Self::Paragraph(c)
            | Self::Section(c)
            | Self::NestedContainer(c)
            | Self::SeparatedContent(c)
            | Self::TableGroup(c) => Some(&c.content),
            Self::TableWrap(w) => Some(&w.content),
            Self::Text(_)
            | Self::Table(_)
            | Self::Figure(_)
            | Self::List(_)
            | Self::ReferencedContent(_) => None,
        }
    }

    /// Whether this node holds child nodes.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.container_children().is_some()
    }

    /// Child nodes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ContentNode] {
        self.container_children().unwrap_or_default()
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "Text({})", t.text),
            Self::Table(t) => fmt::Display::fmt(t, f),
            Self::ReferencedContent(r) => write!(
                f,
                "ReferencedContent(href={}, text={})",
                r.href.as_deref().unwrap_or("None"),
                r.text
            ),
            other => write!(f, "{}(title={})", other.kind_name(), other.title()),
        }
    }
}
