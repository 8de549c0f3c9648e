use crate::docx::styles::TABLE_NORMAL_STYLE;
use crate::utils::error::{ConversionError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// 樣式設定檔 (report-docx.toml)，所有區段皆可省略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub document: DocumentStyle,
    pub headings: HeadingStyle,
    pub table: TableStyle,
    pub markers: Vec<MarkerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyle {
    pub font: String,
    pub east_asia_font: String,
    pub code_font: String,
    pub font_size: f32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// (寬, 高)，單位為 twip
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStyle {
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub h1_centered: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub style: String,
    pub header_bold: bool,
    pub border_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub symbol: String,
    pub color: String,
    #[serde(default = "default_true")]
    pub bold: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            document: DocumentStyle::default(),
            headings: HeadingStyle::default(),
            table: TableStyle::default(),
            markers: vec![MarkerStyle {
                symbol: "✅".to_string(),
                color: "008000".to_string(),
                bold: true,
            }],
        }
    }
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            font: "宋体".to_string(),
            east_asia_font: "宋体".to_string(),
            code_font: "Consolas".to_string(),
            font_size: 10.5,
            title: None,
            author: None,
            page_size: PageSize::A4,
        }
    }
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            h1_size: 18.0,
            h2_size: 14.0,
            h3_size: 12.0,
            h1_centered: true,
            color: None,
        }
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            style: "Light Grid Accent 1".to_string(),
            header_bold: true,
            border_color: "4F81BD".to_string(),
        }
    }
}

impl StyleConfig {
    /// 從 TOML 檔案載入樣式
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConversionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析樣式
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConversionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORT_AUTHOR})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 各級標題字號 (pt)；四級以下沿用內文字號
    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.headings.h1_size,
            2 => self.headings.h2_size,
            3 => self.headings.h3_size,
            _ => self.document.font_size,
        }
    }

    pub fn marker(&self, symbol: &str) -> Option<&MarkerStyle> {
        self.markers.iter().find(|m| m.symbol == symbol)
    }

    pub fn marker_symbols(&self) -> Vec<String> {
        self.markers.iter().map(|m| m.symbol.clone()).collect()
    }

    /// Word 內部使用的樣式 ID：去除空白與符號 ("Light Grid Accent 1" -> "LightGridAccent1")
    pub fn table_style_id(&self) -> String {
        let id: String = self
            .table
            .style
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        // 內建的 TableNormal 是自訂表格樣式的 basedOn，不可重複
        if id == TABLE_NORMAL_STYLE {
            format!("{}Custom", id)
        } else {
            id
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("document.font", &self.document.font)?;
        validation::validate_non_empty_string(
            "document.east_asia_font",
            &self.document.east_asia_font,
        )?;
        validation::validate_non_empty_string("document.code_font", &self.document.code_font)?;
        validation::validate_range("document.font_size", self.document.font_size, 1.0, 400.0)?;

        validation::validate_range("headings.h1_size", self.headings.h1_size, 1.0, 400.0)?;
        validation::validate_range("headings.h2_size", self.headings.h2_size, 1.0, 400.0)?;
        validation::validate_range("headings.h3_size", self.headings.h3_size, 1.0, 400.0)?;
        if let Some(color) = &self.headings.color {
            validation::validate_hex_color("headings.color", color)?;
        }

        validation::validate_non_empty_string("table.style", &self.table.style)?;
        if self.table_style_id().is_empty() {
            return Err(ConversionError::InvalidConfigValueError {
                field: "table.style".to_string(),
                value: self.table.style.clone(),
                reason: "Style name must contain at least one letter or digit".to_string(),
            });
        }
        validation::validate_hex_color("table.border_color", &self.table.border_color)?;

        for marker in &self.markers {
            validation::validate_non_empty_string("markers.symbol", &marker.symbol)?;
            validation::validate_hex_color("markers.color", &marker.color)?;
        }

        Ok(())
    }
}

impl Validate for StyleConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_report_layout() {
        let style = StyleConfig::default();
        assert_eq!(style.document.east_asia_font, "宋体");
        assert_eq!(style.heading_size(1), 18.0);
        assert_eq!(style.heading_size(2), 14.0);
        assert_eq!(style.heading_size(3), 12.0);
        assert_eq!(style.heading_size(5), 10.5);
        assert_eq!(style.table_style_id(), "LightGridAccent1");
        assert_eq!(style.marker("✅").map(|m| m.color.as_str()), Some("008000"));
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[document]
font = "Times New Roman"
page_size = "letter"

[headings]
h1_size = 22.0

[[markers]]
symbol = "❌"
color = "C00000"
"#;

        let style = StyleConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(style.document.font, "Times New Roman");
        assert_eq!(style.document.east_asia_font, "宋体");
        assert_eq!(style.document.page_size, PageSize::Letter);
        assert_eq!(style.heading_size(1), 22.0);
        assert_eq!(style.heading_size(2), 14.0);
        assert_eq!(style.markers.len(), 1);
        assert!(style.markers[0].bold);
        assert!(style.marker("✅").is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REPORT_DOCX_TEST_AUTHOR", "测试组");

        let toml_content = r#"
[document]
author = "${REPORT_DOCX_TEST_AUTHOR}"
title = "${REPORT_DOCX_UNDEFINED_VAR}"
"#;

        let style = StyleConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(style.document.author.as_deref(), Some("测试组"));
        assert_eq!(
            style.document.title.as_deref(),
            Some("${REPORT_DOCX_UNDEFINED_VAR}")
        );

        std::env::remove_var("REPORT_DOCX_TEST_AUTHOR");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = StyleConfig::from_toml_str("[document\nfont = 1").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::ConfigValidationError { ref field, .. } if field == "toml_parsing"
        ));
    }

    #[test]
    fn test_config_validation() {
        let style = StyleConfig::from_toml_str(
            r#"
[[markers]]
symbol = "✅"
color = "green"
"#,
        )
        .unwrap();
        assert!(style.validate().is_err());

        let style = StyleConfig::from_toml_str("[document]\nfont_size = 0.0\n").unwrap();
        assert!(style.validate().is_err());

        let style = StyleConfig::from_toml_str("[document]\nfont_size = nan\n").unwrap();
        assert!(style.validate().is_err());

        let style = StyleConfig::from_toml_str("[table]\nstyle = \"---\"\n").unwrap();
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_table_style_id_avoids_builtin() {
        let mut style = StyleConfig::default();
        style.table.style = "Table Normal".to_string();
        assert_eq!(style.table_style_id(), "TableNormalCustom");
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[table]\nstyle = \"Table Grid\"\nheader_bold = false\n")
            .unwrap();

        let style = StyleConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(style.table_style_id(), "TableGrid");
        assert!(!style.table.header_bold);
    }
}
