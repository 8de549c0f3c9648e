pub mod config;
pub mod core;
pub mod docx;
pub mod domain;
pub mod markdown;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::StyleConfig, ConversionConfig};
pub use core::{engine::ConversionEngine, pipeline::DocxPipeline};
pub use docx::DocxRenderer;
pub use domain::model::{Block, Document, Span};
pub use markdown::{MarkdownParser, ParseOptions};
pub use utils::error::{ConversionError, Result};
