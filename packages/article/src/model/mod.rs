//! Article model: content nodes, queries, front matter and body.

mod article;
mod body;
mod content;
mod front;
mod query;

pub use article::{parse_document, Article};
pub use body::{Body, NestedEntry, SectionOutline};
pub use content::{
    Container, ContentNode, Figure, List, ReferencedContent, Table, TableWrap, Text,
};
pub use front::{Affiliation, Author, Front, Journal, Metadata, Name};
pub use query::Content;
