//! Types for the tag dispatch system.

use crate::error::ParseWarning;

/// Content node variant an element tag is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `<sec>`: titled, possibly nested section.
    Section,
    /// `<p>`: numbered paragraph.
    Paragraph,
    /// `<fig>`: figure, kept as a text leaf.
    Figure,
    /// Links and embedded media (`<xref>`, `<graphic>`, `<ext-link>`, ...).
    ReferencedContent,
    /// `<table>`: reconstructed grid.
    Table,
    /// `<table-wrap>`: captioned wrapper around tables.
    TableWrap,
    /// `<table-wrap-group>`.
    TableGroup,
    /// Generic recursive container.
    NestedContainer,
    /// Recursive container for boxed or set-apart content.
    SeparatedContent,
    /// `<list>`: flattened list items.
    List,
    /// `<speaker>`: the speaker's name as plain text.
    Speaker,
}

impl NodeKind {
    /// Type name, used as the fallback title of a node.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Section => "Section",
            Self::Paragraph => "Paragraph",
            Self::Figure => "Figure",
            Self::ReferencedContent => "ReferencedContent",
            Self::Table => "Table",
            Self::TableWrap => "TableWrap",
            Self::TableGroup => "TableGroup",
            Self::NestedContainer => "NestedContainer",
            Self::SeparatedContent => "SeparatedContent",
            Self::List => "List",
            Self::Speaker => "Text",
        }
    }
}

/// How the parser treats an element in content position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Parsed into a content node of the given kind.
    Node(NodeKind),
    /// Emphasis markup: unwrapped into plain text.
    Emphasis,
    /// Known but unsupported: skipped with a warning.
    Unsupported,
}

/// State threaded through one top-level article parse.
///
/// Holds the paragraph and table counters (both start at 1) and the
/// warnings collected so far. A fresh context is created for every
/// article, so numbering never leaks from one article into the next.
#[derive(Debug)]
pub struct ParseContext {
    next_paragraph: usize,
    next_table: usize,
    warnings: Vec<ParseWarning>,
}

impl ParseContext {
    /// Create a new parse context with both counters at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_paragraph: 1,
            next_table: 1,
            warnings: Vec::new(),
        }
    }

    /// Take the next paragraph title (`Paragraph1`, `Paragraph2`, ...).
    pub fn next_paragraph_title(&mut self) -> String {
        let title = format!("Paragraph{}", self.next_paragraph);
        self.next_paragraph += 1;
        title
    }

    /// Take the next table title (`Table1`, `Table2`, ...).
    pub fn next_table_title(&mut self) -> String {
        let title = format!("Table{}", self.next_table);
        self.next_table += 1;
        title
    }

    /// Record a recovered problem and log it.
    pub fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!(%warning, "Recovered from malformed input");
        self.warnings.push(warning);
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Take ownership of the collected warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
