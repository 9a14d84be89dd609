//! Parsing documents that hold several articles.

use roxmltree::Node;

use crate::error::Result;
use crate::model::{parse_document, Article};

/// Parse every article of an XML document.
///
/// The outer `Result` fails only when the document itself is not
/// well-formed. Each article is parsed independently with its own
/// counters, and a failing article does not stop the ones after it.
///
/// # Errors
/// Returns `XmlParse` when the document is not well-formed XML.
///
/// # Examples
/// ```
/// use jats_article::corpus::parse_articles;
///
/// let xml = r#"<articles>
///   <article><front><article-meta><title-group><article-title>One</article-title></title-group></article-meta></front></article>
///   <article><front/></article>
/// </articles>"#;
///
/// let results = parse_articles(xml).unwrap();
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].as_ref().unwrap().get_title(), "One");
/// assert!(results[1].is_err());
/// ```
pub fn parse_articles(xml: &str) -> Result<Vec<Result<Article>>> {
    let doc = parse_document(xml)?;
    let articles = find_articles(doc.root_element());
    tracing::debug!(count = articles.len(), "Found articles");

    Ok(articles
        .into_iter()
        .map(|node| {
            let result = Article::parse(node);
            if let Err(err) = &result {
                tracing::debug!(error = %err, "Article failed to parse");
            }
            result
        })
        .collect())
}

/// Outermost `article` elements under `root`, in document order.
fn find_articles<'a, 'input>(root: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    if root.has_tag_name("article") {
        return vec![root];
    }

    root.descendants()
        .filter(|n| n.has_tag_name("article"))
        .filter(|n| !n.ancestors().skip(1).any(|a| a.has_tag_name("article")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArticleError;

    fn article(title: &str, body: &str) -> String {
        format!(
            "<article><front><article-meta><title-group><article-title>{title}</article-title></title-group></article-meta></front><body>{body}</body></article>"
        )
    }

    #[test]
    fn test_failing_article_does_not_block_later_ones() {
        let xml = format!(
            "<pmc-articleset>{}{}{}</pmc-articleset>",
            article("A", "<table><tr><td>1</td></tr></table><table><tr><td>2</td></tr></table>"),
            article("B", "<sec><blink/></sec>"),
            article("C", "<p>three</p><table><tr><td>3</td></tr></table>"),
        );

        let results = parse_articles(&xml).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ArticleError::SchemaDrift { .. })));

        let third = results[2].as_ref().unwrap();
        assert_eq!(third.get_title(), "C");
        assert_eq!(third.get_tables()[0].title, "Table1");
        assert!(third.get_object_by_id("Table1").is_some());
        assert!(third.get_object_by_id("Table3").is_none());
    }

    #[test]
    fn test_single_article_root() {
        let results = parse_articles(&article("Solo", "")).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(matches!(
            parse_articles("<articles><article>"),
            Err(ArticleError::XmlParse(_))
        ));
    }

    #[test]
    fn test_no_articles() {
        assert!(parse_articles("<empty/>").unwrap().is_empty());
    }
}
