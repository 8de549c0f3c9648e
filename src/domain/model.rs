use serde::{Deserialize, Serialize};

/// 一段套用相同格式的文字
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }
}

pub type Cell = Vec<Span>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// 以最寬的列為準補齊空白儲存格，確保表格為矩形
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize_with(columns, Vec::new);
        }
        Self { rows }
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph {
        spans: Vec<Span>,
    },
    Callout {
        marker: Option<String>,
        spans: Vec<Span>,
    },
    ListItem {
        ordered: bool,
        depth: u8,
        spans: Vec<Span>,
    },
    Table(Table),
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    Quote {
        spans: Vec<Span>,
    },
    Rule,
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Callout { .. } => "callout",
            Block::ListItem { .. } => "list_item",
            Block::Table(_) => "table",
            Block::CodeBlock { .. } => "code_block",
            Block::Quote { .. } => "quote",
            Block::Rule => "rule",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// 第一個一級標題的純文字
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { level: 1, spans } => Some(plain_text(spans)),
            _ => None,
        })
    }

    pub fn count(&self, kind: &str) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }
}

pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// 從儲存層讀入、已解碼的 Markdown 原文
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: String,
    pub content: String,
}
