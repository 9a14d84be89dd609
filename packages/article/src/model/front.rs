//! Front matter: journal, identifiers, title, authors and affiliations.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Node, NodeId};
use serde::Serialize;

use crate::error::{ArticleError, ParseWarning, Result};
use crate::registry::ParseContext;
use crate::xml::{
    collapse_whitespace, find_all_by_path, find_by_path, find_child, find_children, get_tag_name,
    itertext, itertext_excluding,
};

/// Regex for slug generation - matches non-word characters.
#[allow(clippy::expect_used)]
static SLUG_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Regex for slug generation - matches whitespace and dashes.
#[allow(clippy::expect_used)]
static SLUG_SPACE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Trimmed descendant text of the first child with the given path.
fn text_at(node: Node<'_, '_>, path: &str) -> Option<String> {
    find_by_path(node, path)
        .map(|found| collapse_whitespace(&itertext(found)))
        .filter(|text| !text.is_empty())
}

/// A person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Name {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Name {
    /// Parse a `<name>` element.
    pub fn parse(node: Node<'_, '_>) -> Self {
        Self {
            prefix: text_at(node, "prefix"),
            given_names: text_at(node, "given-names"),
            surname: text_at(node, "surname"),
            suffix: text_at(node, "suffix"),
        }
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.prefix, &self.given_names, &self.surname, &self.suffix]
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts().collect::<Vec<_>>().join(" "))
    }
}

/// An author affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Affiliation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aid: Option<String>,
    /// Institution names, followed by the remaining address text.
    pub institution: Vec<String>,
}

impl Affiliation {
    /// Parse an `<aff>` element.
    ///
    /// Institutions come from the `institution-wrap` child when there is
    /// one, otherwise from the `aff` itself. All other text (address,
    /// city, country) is kept as one final entry; the `label` is skipped.
    pub fn parse(node: Node<'_, '_>) -> Self {
        let container = find_child(node, "institution-wrap").unwrap_or(node);
        let mut institution: Vec<String> = find_children(container, "institution")
            .map(|inst| collapse_whitespace(&itertext(inst)))
            .filter(|text| !text.is_empty())
            .collect();

        let skipped: Vec<NodeId> = find_children(node, "label")
            .chain(
                node.descendants()
                    .filter(|n| matches!(get_tag_name(*n), "institution" | "institution-id")),
            )
            .map(|n| n.id())
            .collect();

        let rest = collapse_whitespace(&itertext_excluding(node, &skipped));
        let rest = rest.trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace());
        if !rest.is_empty() {
            institution.push(rest.to_string());
        }

        Self {
            aid: node.attribute("id").map(str::to_string),
            institution,
        }
    }
}

/// A contributor of type author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub affiliations: Vec<Affiliation>,
}

impl Author {
    /// Parse a `<contrib>` element, resolving its affiliation references.
    ///
    /// An author without any `xref[@ref-type='aff']` is given every known
    /// affiliation. References to unknown ids are dropped with a warning.
    pub fn parse(
        node: Node<'_, '_>,
        affiliations: &[(String, Affiliation)],
        ctx: &mut ParseContext,
    ) -> Self {
        let name = find_child(node, "name")
            .or_else(|| find_by_path(node, "name-alternatives/name"))
            .map(Name::parse)
            .unwrap_or_default();

        let email = text_at(node, "address/email").or_else(|| text_at(node, "email"));

        let xrefs = find_all_by_path(node, "xref[@ref-type='aff']");
        let resolved = if xrefs.is_empty() {
            affiliations.iter().map(|(_, aff)| aff.clone()).collect()
        } else {
            let mut resolved = Vec::new();
            for rid in xrefs
                .iter()
                .filter_map(|xref| xref.attribute("rid"))
                .flat_map(str::split_whitespace)
            {
                match affiliations.iter().find(|(key, _)| key == rid) {
                    Some((_, aff)) => resolved.push(aff.clone()),
                    None => ctx.warn(ParseWarning::UnresolvedAffiliation {
                        rid: rid.to_string(),
                        author: name.to_string(),
                    }),
                }
            }
            resolved
        };

        Self {
            name,
            email,
            affiliations: resolved,
        }
    }
}

/// Journal metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Journal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Journal {
    /// Parse a `<journal-meta>` element.
    pub fn parse(node: Node<'_, '_>) -> Self {
        Self {
            jid: text_at(node, "journal-id"),
            title: text_at(node, "journal-title-group/journal-title")
                .or_else(|| text_at(node, "journal-title")),
        }
    }
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Journal(id='{}', title='{}')",
            self.jid.as_deref().unwrap_or_default(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

/// Article metadata: identifiers, title and authors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmcid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub title: String,
    pub authors: Vec<Author>,
}

impl Metadata {
    /// Parse an `<article-meta>` element.
    ///
    /// # Errors
    /// Returns `MissingElement` when there is no `title-group/article-title`.
    pub fn parse(node: Node<'_, '_>, ctx: &mut ParseContext) -> Result<Self> {
        let title = find_by_path(node, "title-group/article-title")
            .map(|title| collapse_whitespace(&itertext(title)))
            .ok_or_else(|| ArticleError::MissingElement {
                element: "title-group/article-title".to_string(),
                context: "<article-meta>".to_string(),
            })?;

        let mut aff_nodes = find_all_by_path(node, "contrib-group/aff");
        if aff_nodes.is_empty() {
            aff_nodes = find_children(node, "aff").collect();
        }
        let affiliations: Vec<(String, Affiliation)> = aff_nodes
            .into_iter()
            .enumerate()
            .map(|(index, aff)| {
                let aff = Affiliation::parse(aff);
                let key = aff.aid.clone().unwrap_or_else(|| index.to_string());
                (key, aff)
            })
            .collect();

        let authors = find_all_by_path(node, "contrib-group/contrib[@contrib-type='author']")
            .into_iter()
            .map(|contrib| Author::parse(contrib, &affiliations, ctx))
            .collect();

        Ok(Self {
            pmid: text_at(node, "article-id[@pub-id-type='pmid']"),
            pmcid: text_at(node, "article-id[@pub-id-type='pmcid']"),
            doi: text_at(node, "article-id[@pub-id-type='doi']"),
            title,
            authors,
        })
    }

    /// File-system friendly identifier: pmcid, pmid, doi or title slug.
    ///
    /// # Examples
    /// ```
    /// use jats_article::model::Metadata;
    ///
    /// let metadata = Metadata {
    ///     doi: Some("10.1371/journal.pone.0001".to_string()),
    ///     title: "Ignored".to_string(),
    ///     ..Metadata::default()
    /// };
    /// assert_eq!(metadata.to_slug(), "101371journalpone0001");
    /// ```
    #[must_use]
    pub fn to_slug(&self) -> String {
        let source = self
            .pmcid
            .as_deref()
            .or(self.pmid.as_deref())
            .or(self.doi.as_deref())
            .unwrap_or(&self.title);

        let text = source.to_lowercase();
        let text = SLUG_NON_WORD.replace_all(&text, "");
        let text = SLUG_SPACE_DASH.replace_all(&text, "_");
        text.trim_matches('_').to_string()
    }
}

/// The `<front>` of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Front {
    pub journal_meta: Journal,
    pub article_meta: Metadata,
}

impl Front {
    /// Parse a `<front>` element.
    ///
    /// # Errors
    /// Returns `MissingElement` when `article-meta` or its title is absent.
    pub fn parse(node: Node<'_, '_>, ctx: &mut ParseContext) -> Result<Self> {
        let journal_meta = find_child(node, "journal-meta")
            .map(Journal::parse)
            .unwrap_or_default();

        let meta = find_child(node, "article-meta").ok_or_else(|| ArticleError::MissingElement {
            element: "article-meta".to_string(),
            context: "<front>".to_string(),
        })?;

        Ok(Self {
            journal_meta,
            article_meta: Metadata::parse(meta, ctx)?,
        })
    }
}
