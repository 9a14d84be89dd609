//! JATS Article - Parse scientific-article XML into a navigable content graph.
//!
//! This crate reads JATS (Journal Article Tag Suite) documents such as the
//! PubMed Central open-access set and turns each article into front-matter
//! metadata plus a tree of typed content nodes that can be queried as flat
//! text, nested sections, tables or figures.
//!
//! # Example
//!
//! ```
//! use jats_article::Article;
//!
//! let xml = r#"<article>
//!   <front><article-meta>
//!     <title-group><article-title>Naps and recall</article-title></title-group>
//!   </article-meta></front>
//!   <body><sec><title>Results</title><p>Recall <italic>improved</italic>.</p></sec></body>
//! </article>"#;
//!
//! let article = Article::from_xml(xml).unwrap();
//! assert_eq!(article.get_title(), "Naps and recall");
//! assert_eq!(
//!     article.get_flat_text(Some(&["Results"])).unwrap(),
//!     vec!["Recall ", "improved", "."]
//! );
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Configuration constants
//! - [`error`]: Error and warning types and Result alias
//! - [`xml`]: XML utilities
//! - [`grid`]: Table grid reconstruction for row and column spans
//! - [`registry`]: Tag classification and the recursive parse engine
//! - [`model`]: Content nodes, queries, front matter and the article
//! - [`countries`]: Country lookup for affiliations
//! - [`corpus`]: Documents holding several articles
//! - [`yaml`]: YAML summaries and text wrapping
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod corpus;
pub mod countries;
pub mod error;
pub mod grid;
pub mod model;
pub mod registry;
pub mod xml;
pub mod yaml;

pub use corpus::parse_articles;

// Re-export commonly used items
pub use error::{ArticleError, ParseWarning, Result};
pub use model::{Article, Content, ContentNode};
