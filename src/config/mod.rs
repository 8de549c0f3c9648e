pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::Path;
use toml_config::StyleConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

pub const DEFAULT_INPUT: &str = "验证报告.md";
pub const DEFAULT_STYLE_FILE: &str = "report-docx.toml";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "report-docx")]
#[command(about = "Convert a Markdown report into a Word (.docx) document")]
pub struct CliConfig {
    /// Markdown source file
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Output path (defaults to the input path with a .docx extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML style file (report-docx.toml in the working directory is used if present)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Log CPU and memory usage for each phase")]
    pub monitor: bool,

    /// Parse only and print a summary of the document
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the parsed document as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併命令列參數與樣式設定檔
    pub fn resolve(&self) -> Result<ConversionConfig> {
        let style = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading style configuration from: {}", path);
                StyleConfig::from_file(path)?
            }
            None if Path::new(DEFAULT_STYLE_FILE).is_file() => {
                tracing::info!("📁 Loading style configuration from: {}", DEFAULT_STYLE_FILE);
                StyleConfig::from_file(DEFAULT_STYLE_FILE)?
            }
            None => StyleConfig::default(),
        };

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input));

        Ok(ConversionConfig::new(self.input.clone(), output, style))
    }
}

/// `report.md` -> `report.docx`
pub fn default_output_path(input: &str) -> String {
    Path::new(input)
        .with_extension("docx")
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input_path: String,
    pub output_path: String,
    pub style: StyleConfig,
}

impl ConversionConfig {
    pub fn new(input_path: String, output_path: String, style: StyleConfig) -> Self {
        Self {
            input_path,
            output_path,
            style,
        }
    }

    /// 預設樣式，輸出到同名 .docx
    pub fn for_input(input_path: &str) -> Self {
        Self::new(
            input_path.to_string(),
            default_output_path(input_path),
            StyleConfig::default(),
        )
    }
}

impl ConfigProvider for ConversionConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn style(&self) -> &StyleConfig {
        &self.style
    }
}

impl Validate for ConversionConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_path)?;
        validation::validate_path("output", &self.output_path)?;
        validation::validate_file_extension("input", &self.input_path, &["md", "markdown", "txt"])?;
        validation::validate_file_extension("output", &self.output_path, &["docx"])?;

        self.style.validate()
    }
}
