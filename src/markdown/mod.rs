//! Markdown report dialect: line-oriented block parsing plus inline spans.

pub mod inline;
pub mod parser;
pub mod table;

pub use parser::{MarkdownParser, ParseOptions};
