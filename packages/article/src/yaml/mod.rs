//! YAML summaries of parsed articles and text wrapping for output.

mod text;
mod writer;

pub use text::{should_wrap_text, wrap_text, wrap_text_default};
pub use writer::{generate_yaml, save_yaml};
