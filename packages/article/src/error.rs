//! Error and diagnostic types for article parsing.
//!
//! Two tiers: `ArticleError` aborts the parse of one article and is
//! propagated to the caller, `ParseWarning` records a recovered problem
//! (the parse continues with a documented fallback value).

use thiserror::Error;

/// Main error type for the article library.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// A required element is absent (e.g. the article title).
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// An element in content position matches no known tag set.
    ///
    /// The input no longer matches the schema this parser was written
    /// against; guessing would silently lose content.
    #[error("No handler for element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    SchemaDrift {
        tag_name: String,
        context: Option<String>,
    },

    /// The node handed to the article parser is not an `<article>`.
    #[error("Expected an <article> element, found {0}")]
    NotAnArticle(String),

    /// Some articles of a multi-article run failed to parse.
    #[error("{failed} of {total} articles failed to parse")]
    CorpusFailures { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for article operations.
pub type Result<T> = std::result::Result<T, ArticleError>;

/// Non-fatal problem found while parsing.
///
/// Warnings are logged when they happen and collected on the parse
/// context, so callers can audit how faithful a parsed article is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// A numeric attribute could not be used and was replaced by 1.
    #[error("Malformed {attribute}=\"{value}\" on <{tag}> in {context}, using 1")]
    MalformedAttribute {
        tag: String,
        attribute: String,
        value: String,
        context: String,
    },

    /// An element was skipped because its tag is not supported.
    #[error("<{tag_name}> is not supported{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnsupportedTag {
        tag_name: String,
        context: Option<String>,
    },

    /// An author references an affiliation id that was never declared.
    #[error("Affiliation '{rid}' referenced by {author} does not exist")]
    UnresolvedAffiliation { rid: String, author: String },
}
