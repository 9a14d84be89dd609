//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Node, NodeId};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use jats_article::xml::get_tag_name;
///
/// let xml = r#"<article><front>text</front></article>"#;
/// let doc = Document::parse(xml).unwrap();
/// let front = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(front), "front");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use jats_article::xml::find_child;
///
/// let xml = r#"<front><journal-meta/><article-meta/></front>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "journal-meta").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// One step of a slash-separated path: a tag name with an optional
/// `[@attr='value']` predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathStep<'p> {
    tag: &'p str,
    predicate: Option<(&'p str, &'p str)>,
}

impl<'p> PathStep<'p> {
    fn parse(step: &'p str) -> Self {
        let Some((tag, rest)) = step.split_once("[@") else {
            return Self {
                tag: step,
                predicate: None,
            };
        };

        let predicate = rest.strip_suffix(']').and_then(|body| {
            let (name, value) = body.split_once('=')?;
            let value = value.trim_matches(|c| c == '\'' || c == '"');
            Some((name.trim(), value))
        });

        Self { tag, predicate }
    }

    fn matches(&self, node: Node<'_, '_>) -> bool {
        node.is_element()
            && get_tag_name(node) == self.tag
            && self
                .predicate
                .is_none_or(|(name, value)| node.attribute(name) == Some(value))
    }
}

/// Find all descendants matching a slash-separated path.
///
/// Every step matches direct children only. A step may carry a single
/// attribute predicate, e.g. `contrib[@contrib-type='author']`. Results
/// are in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use jats_article::xml::find_all_by_path;
///
/// let xml = r#"<meta>
///     <contrib-group><contrib contrib-type="author"/><contrib contrib-type="editor"/></contrib-group>
///     <contrib-group><contrib contrib-type="author"/></contrib-group>
/// </meta>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let authors = find_all_by_path(doc.root_element(), "contrib-group/contrib[@contrib-type='author']");
/// assert_eq!(authors.len(), 2);
/// ```
pub fn find_all_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];

    for step in path.split('/').map(PathStep::parse) {
        current = current
            .into_iter()
            .flat_map(|parent| parent.children().filter(move |child| step.matches(*child)))
            .collect();

        if current.is_empty() {
            break;
        }
    }

    current
}

/// Find the first descendant matching a slash-separated path.
///
/// Accepts the same path syntax as [`find_all_by_path`].
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use jats_article::xml::find_by_path;
///
/// let xml = r#"<article-meta><article-id pub-id-type="pmid">1</article-id><article-id pub-id-type="doi">10.1/x</article-id></article-meta>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let doi = find_by_path(doc.root_element(), "article-id[@pub-id-type='doi']");
/// assert_eq!(doi.unwrap().text(), Some("10.1/x"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;

    for step in path.split('/').map(PathStep::parse) {
        current = current.children().find(|child| step.matches(*child))?;
    }

    Some(current)
}

/// Concatenate all descendant text of a node in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use jats_article::xml::itertext;
///
/// let xml = r#"<title>A <italic>nested</italic> title</title>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(itertext(doc.root_element()), "A nested title");
/// ```
pub fn itertext(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Concatenate descendant text, skipping the subtrees of `excluded` nodes.
pub fn itertext_excluding(node: Node<'_, '_>, excluded: &[NodeId]) -> String {
    let mut out = String::new();
    collect_text(node, excluded, &mut out);
    out
}

fn collect_text(node: Node<'_, '_>, excluded: &[NodeId], out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or_default());
        } else if child.is_element() && !excluded.contains(&child.id()) {
            collect_text(child, excluded, out);
        }
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// # Examples
/// ```
/// use jats_article::xml::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("\n  Mean\t(SD)  \n"), "Mean (SD)");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Get the direct text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Render a node's tag as `<tag>` for diagnostics.
pub fn describe(node: Node<'_, '_>) -> String {
    format!("<{}>", get_tag_name(node))
}
