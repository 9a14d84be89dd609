//! The parsed article and its query API.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use roxmltree::{Document, Node, ParsingOptions};

use super::body::{Body, NestedEntry, SectionOutline};
use super::content::{ContentNode, Figure, Table};
use super::front::{Affiliation, Author, Front};
use super::query::Content;
use crate::countries::find_country;
use crate::error::{ArticleError, ParseWarning, Result};
use crate::registry::ParseContext;
use crate::xml::{describe, element_children, get_tag_name};

/// Position of a node: index into the body, then into each container.
type NodePath = Vec<usize>;

/// Memoized flat view of the body leaves.
#[derive(Debug, Clone, Default)]
struct FlatIndex {
    leaves: Vec<NodePath>,
    by_title: HashMap<String, usize>,
}

impl FlatIndex {
    fn build(body: &Body) -> Self {
        let mut index = Self::default();
        for (i, node) in body.content.iter().enumerate() {
            index.collect(node, vec![i]);
        }
        tracing::debug!(leaves = index.leaves.len(), "Built flat content index");
        index
    }

    fn collect(&mut self, node: &ContentNode, path: NodePath) {
        match node.container_children() {
            Some(children) => {
                for (i, child) in children.iter().enumerate() {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    self.collect(child, child_path);
                }
            }
            None => {
                // later leaves overwrite earlier ones with the same title
                self.by_title
                    .insert(node.title().to_string(), self.leaves.len());
                self.leaves.push(path);
            }
        }
    }
}

/// A parsed JATS article.
///
/// Built once by [`Article::parse`] and read-only afterwards. The flat
/// leaf list and the title dictionary are computed on first use.
#[derive(Debug, Clone)]
pub struct Article {
    pub article_type: Option<String>,
    pub front: Front,
    pub body: Option<Body>,
    warnings: Vec<ParseWarning>,
    flat_index: OnceLock<FlatIndex>,
}

impl Article {
    /// Parse an XML document holding an article.
    ///
    /// The `article` element may be the root or any descendant. DTD
    /// declarations are allowed.
    ///
    /// # Errors
    /// Returns `XmlParse` for malformed XML, `NotAnArticle` when there is no
    /// `article` element, and any error of [`Article::parse`].
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let root = doc.root_element();
        let article = if root.has_tag_name("article") {
            root
        } else {
            root.descendants()
                .find(|n| n.has_tag_name("article"))
                .ok_or_else(|| ArticleError::NotAnArticle(describe(root)))?
        };
        Self::parse(article)
    }

    /// Parse an `<article>` element.
    ///
    /// Each call uses a fresh [`ParseContext`], so paragraph and table
    /// numbering always starts at 1.
    ///
    /// # Errors
    /// Returns `NotAnArticle` for any other element, `MissingElement` when
    /// the front matter or article title is absent, and `SchemaDrift` for
    /// unknown body tags.
    pub fn parse(node: Node<'_, '_>) -> Result<Self> {
        if get_tag_name(node) != "article" {
            return Err(ArticleError::NotAnArticle(describe(node)));
        }

        let mut ctx = ParseContext::new();
        let mut front = None;
        let mut body = None;

        for child in element_children(node) {
            match get_tag_name(child) {
                "front" => front = Some(Front::parse(child, &mut ctx)?),
                "body" => body = Some(Body::parse(child, &mut ctx)?),
                tag => tracing::debug!(tag = %tag, "Ignoring article child"),
            }
        }

        let front = front.ok_or_else(|| ArticleError::MissingElement {
            element: "front".to_string(),
            context: "<article>".to_string(),
        })?;

        Ok(Self {
            article_type: node.attribute("article-type").map(str::to_string),
            front,
            body,
            warnings: ctx.into_warnings(),
            flat_index: OnceLock::new(),
        })
    }

    /// Recovered problems found while parsing.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Flat text of the body, optionally limited to top-level `sections`.
    #[must_use]
    pub fn get_flat_text(&self, sections: Option<&[&str]>) -> Option<Vec<String>> {
        let body = self.body.as_ref()?;
        Some(
            body.get_flat(sections, true)
                .into_iter()
                .filter_map(Content::into_text)
                .collect(),
        )
    }

    /// Flat leaf nodes of the body, optionally limited to top-level
    /// `sections`. The unfiltered list is memoized.
    #[must_use]
    pub fn get_flat_content(&self, sections: Option<&[&str]>) -> Option<Vec<&ContentNode>> {
        let body = self.body.as_ref()?;
        if sections.is_some() {
            return Some(
                body.get_flat(sections, false)
                    .iter()
                    .filter_map(Content::as_node)
                    .collect(),
            );
        }
        Some(self.leaves().collect())
    }

    /// Text grouped by top-level node title.
    #[must_use]
    pub fn get_nested_text(
        &self,
        main_sections: bool,
        sections: Option<&[&str]>,
    ) -> Option<Vec<NestedEntry<'_>>> {
        Some(self.body.as_ref()?.get_nested(main_sections, sections, true))
    }

    /// Nodes grouped by top-level node title.
    #[must_use]
    pub fn get_nested_content(
        &self,
        main_sections: bool,
        sections: Option<&[&str]>,
    ) -> Option<Vec<NestedEntry<'_>>> {
        Some(self.body.as_ref()?.get_nested(main_sections, sections, false))
    }

    /// Outline of the top-level body sections.
    #[must_use]
    pub fn get_body_structure(&self, main_sections: bool) -> Option<Vec<SectionOutline<'_>>> {
        Some(self.body.as_ref()?.get_structure(main_sections))
    }

    /// Leaf nodes by title. When titles collide the later leaf wins.
    #[must_use]
    pub fn todict(&self) -> HashMap<&str, &ContentNode> {
        let index = self.flat_index();
        index
            .by_title
            .iter()
            .filter_map(|(title, &i)| Some((title.as_str(), self.resolve(index.leaves.get(i)?)?)))
            .collect()
    }

    /// Look up a leaf node by its title.
    #[must_use]
    pub fn get_object_by_id(&self, title: &str) -> Option<&ContentNode> {
        let index = self.flat_index();
        let i = *index.by_title.get(title)?;
        self.resolve(index.leaves.get(i)?)
    }

    /// Every table leaf of the body, including tables inside wrappers.
    #[must_use]
    pub fn get_tables(&self) -> Vec<&Table> {
        self.leaves()
            .filter_map(|node| match node {
                ContentNode::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    /// Every figure of the body.
    #[must_use]
    pub fn get_figures(&self) -> Vec<&Figure> {
        self.leaves()
            .filter_map(|node| match node {
                ContentNode::Figure(figure) => Some(figure),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn get_authors(&self) -> &[Author] {
        &self.front.article_meta.authors
    }

    #[must_use]
    pub fn get_title(&self) -> &str {
        &self.front.article_meta.title
    }

    /// Affiliations of every author, in author order.
    ///
    /// An affiliation shared by several authors appears once per author.
    #[must_use]
    pub fn get_affiliations(&self) -> Vec<&Affiliation> {
        self.get_authors()
            .iter()
            .flat_map(|author| &author.affiliations)
            .collect()
    }

    /// First country mentioned by each affiliation, in affiliation order.
    #[must_use]
    pub fn get_countries(&self) -> Vec<String> {
        self.get_affiliations()
            .into_iter()
            .filter_map(|aff| find_country(&aff.institution.join(" ")).map(str::to_string))
            .collect()
    }

    fn flat_index(&self) -> &FlatIndex {
        self.flat_index.get_or_init(|| match &self.body {
            Some(body) => FlatIndex::build(body),
            None => FlatIndex::default(),
        })
    }

    fn leaves(&self) -> impl Iterator<Item = &ContentNode> {
        self.flat_index()
            .leaves
            .iter()
            .filter_map(|path| self.resolve(path))
    }

    fn resolve(&self, path: &[usize]) -> Option<&ContentNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.body.as_ref()?.content.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Article(title={}, journal={})",
            self.get_title(),
            self.front.journal_meta
        )
    }
}

/// Parse XML text with DTD declarations allowed.
///
/// # Errors
/// Returns `XmlParse` when the text is not well-formed XML.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(xml, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARTICLE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE article PUBLIC "-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.2 20190208//EN" "JATS-archivearticle1.dtd">
<article xmlns:xlink="http://www.w3.org/1999/xlink" article-type="research-article">
  <front>
    <journal-meta>
      <journal-id journal-id-type="nlm-ta">J Sleep Res</journal-id>
      <journal-title-group><journal-title>Journal of Sleep Research</journal-title></journal-title-group>
    </journal-meta>
    <article-meta>
      <article-id pub-id-type="pmcid">PMC100</article-id>
      <title-group><article-title>Naps and recall</article-title></title-group>
      <contrib-group>
        <contrib contrib-type="author"><name><surname>Doe</surname><given-names>Jane</given-names></name></contrib>
        <aff id="aff1"><institution>University of Oslo</institution>, Oslo, Norway</aff>
      </contrib-group>
    </article-meta>
  </front>
  <body>
    <sec>
      <title>Introduction</title>
      <p>Sleep helps <xref ref-type="bibr" rid="b1">[1]</xref>.</p>
    </sec>
    <sec>
      <title>Results</title>
      <p>See below.</p>
      <fig id="f1"><label>Fig. 1</label><caption><p>A cat.</p></caption><graphic xlink:href="f1.jpg"/></fig>
      <table-wrap id="t1">
        <label>Table 1</label>
        <table><tr><td>a</td><td>b</td></tr></table>
      </table-wrap>
      <p>More <bold>text</bold>.</p>
    </sec>
  </body>
  <back><ref-list/></back>
</article>"#;

    #[test]
    fn test_from_xml_parses_front_and_body() {
        let article = Article::from_xml(ARTICLE).unwrap();
        assert_eq!(article.article_type.as_deref(), Some("research-article"));
        assert_eq!(article.get_title(), "Naps and recall");
        assert_eq!(
            article.front.journal_meta.title.as_deref(),
            Some("Journal of Sleep Research")
        );
        assert_eq!(article.body.as_ref().unwrap().len(), 2);
        assert!(article.warnings().is_empty());
    }

    #[test]
    fn test_paragraph_numbering_across_article() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let nested = article.get_nested_content(false, None).unwrap();
        let titles: Vec<Vec<&str>> = nested
            .iter()
            .map(|(_, content)| {
                content
                    .iter()
                    .filter_map(|c| match c {
                        Content::Nested(title, _) => Some(*title),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        assert_eq!(
            titles,
            vec![vec!["Paragraph1"], vec!["Paragraph2", "Table 1", "Paragraph3"]]
        );
    }

    #[test]
    fn test_counters_reset_between_articles() {
        let first = Article::from_xml(ARTICLE).unwrap();
        let second = Article::from_xml(ARTICLE).unwrap();
        assert!(first.get_object_by_id("Table1").is_some());
        assert!(second.get_object_by_id("Table1").is_some());
        assert!(second.get_object_by_id("Table2").is_none());

        for article in [&first, &second] {
            let body = &article.body.as_ref().unwrap().content;
            assert_eq!(body[0].children()[0].title(), "Paragraph1");
            assert_eq!(body[1].children().last().unwrap().title(), "Paragraph3");
        }
    }

    #[test]
    fn test_flat_text() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let text = article.get_flat_text(Some(&["Introduction"])).unwrap();
        assert_eq!(text, vec!["Sleep helps ", "[1]", "."]);
    }

    #[test]
    fn test_flat_content_is_memoized_and_stable() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let first: Vec<_> = article
            .get_flat_content(None)
            .unwrap()
            .iter()
            .map(|n| n.kind_name())
            .collect();
        let second: Vec<_> = article
            .get_flat_content(None)
            .unwrap()
            .iter()
            .map(|n| n.kind_name())
            .collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec!["Text", "ReferencedContent", "Text", "Text", "Figure", "Table", "Text", "Text", "Text"]
        );
    }

    #[test]
    fn test_todict_and_lookup() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let dict = article.todict();
        assert!(dict.contains_key("Fig. 1A cat."));
        assert!(dict.contains_key("Table1"));

        let figure = article.get_object_by_id("Fig. 1A cat.").unwrap();
        assert_eq!(figure.kind_name(), "Figure");
        assert!(article.get_object_by_id("Nope").is_none());
    }

    #[test]
    fn test_tables_and_figures() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let tables = article.get_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].tabulate(), "a  b");
        assert_eq!(article.get_figures().len(), 1);
    }

    #[test]
    fn test_authors_and_countries() {
        let article = Article::from_xml(ARTICLE).unwrap();
        assert_eq!(article.get_authors().len(), 1);
        assert_eq!(article.get_affiliations().len(), 1);
        assert_eq!(article.get_countries(), vec!["Norway"]);
    }

    #[test]
    fn test_body_structure() {
        let article = Article::from_xml(ARTICLE).unwrap();
        let structure = article.get_body_structure(true).unwrap();
        let titles: Vec<_> = structure.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Introduction", "Results"]);
    }

    #[test]
    fn test_article_without_body() {
        let xml = r#"<article><front><article-meta><title-group><article-title>Only front</article-title></title-group></article-meta></front></article>"#;
        let article = Article::from_xml(xml).unwrap();
        assert!(article.get_flat_text(None).is_none());
        assert!(article.get_flat_content(None).is_none());
        assert!(article.get_nested_text(false, None).is_none());
        assert!(article.get_body_structure(false).is_none());
        assert!(article.get_tables().is_empty());
        assert!(article.todict().is_empty());
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let xml = r#"<article><front><article-meta/></front><body/></article>"#;
        assert!(matches!(
            Article::from_xml(xml),
            Err(ArticleError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_missing_front_is_fatal() {
        assert!(matches!(
            Article::from_xml("<article><body/></article>"),
            Err(ArticleError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_schema_drift_aborts() {
        let xml = r#"<article><front><article-meta><title-group><article-title>T</article-title></title-group></article-meta></front>
            <body><sec><title>S</title><mystery/></sec></body></article>"#;
        let err = Article::from_xml(xml).unwrap_err();
        assert_eq!(err.to_string(), "No handler for element <mystery> in <sec>");
    }

    #[test]
    fn test_not_an_article() {
        let doc = Document::parse("<book/>").unwrap();
        assert!(matches!(
            Article::parse(doc.root_element()),
            Err(ArticleError::NotAnArticle(_))
        ));
        assert!(matches!(
            Article::from_xml("<collection><book/></collection>"),
            Err(ArticleError::NotAnArticle(_))
        ));
    }

    #[test]
    fn test_article_nested_in_wrapper() {
        let xml = r#"<pmc-articleset><article><front><article-meta><title-group><article-title>Wrapped</article-title></title-group></article-meta></front></article></pmc-articleset>"#;
        assert_eq!(Article::from_xml(xml).unwrap().get_title(), "Wrapped");
    }

    #[test]
    fn test_display() {
        let article = Article::from_xml(ARTICLE).unwrap();
        assert_eq!(
            article.to_string(),
            "Article(title=Naps and recall, journal=Journal(id='J Sleep Res', title='Journal of Sleep Research'))"
        );
    }
}
