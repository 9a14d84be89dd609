//! Tag dispatch and recursive parsing of body content.
//!
//! Every element in content position is classified by its tag name into
//! a node kind, emphasis (unwrapped to text) or an unsupported tag
//! (skipped with a warning). Anything else is schema drift and aborts the
//! article. Counters and warnings live on a [`ParseContext`] created per
//! article.

mod config;
mod descriptive;
mod engine;
pub mod handlers;
mod types;

pub use config::{classify, is_descriptive, node_kind, EMPHASIS_TAGS, UNSUPPORTED_TAGS};
pub use descriptive::Descriptive;
pub use engine::ParseEngine;
pub use types::{NodeKind, ParseContext, TagClass};
