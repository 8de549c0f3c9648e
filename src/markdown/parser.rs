use crate::config::toml_config::StyleConfig;
use crate::domain::model::{Block, Document, Table};
use crate::markdown::inline::parse_inline;
use crate::markdown::table::{is_delimiter_row, split_row};

const MAX_LIST_DEPTH: usize = 8;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// 以這些符號開頭的行視為醒目提示
    pub markers: Vec<String>,
}

impl ParseOptions {
    pub fn new(markers: Vec<String>) -> Self {
        Self {
            markers: markers.into_iter().filter(|m| !m.is_empty()).collect(),
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(vec!["✅".to_string()])
    }
}

impl From<&StyleConfig> for ParseOptions {
    fn from(style: &StyleConfig) -> Self {
        Self::new(style.marker_symbols())
    }
}

/// 逐行解析報告用的 Markdown 子集
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, source: &str) -> Document {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let lines: Vec<&str> = source.split('\n').collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let raw = lines[i];
            let line = raw.trim();

            if line.is_empty() {
                i += 1;
                continue;
            }

            if let Some(fence) = opening_fence(line) {
                let language = line[fence.len()..].trim();
                let mut code_lines = Vec::new();
                i += 1;
                while i < lines.len() && !lines[i].trim().starts_with(fence) {
                    code_lines.push(lines[i].trim_end_matches('\r').to_string());
                    i += 1;
                }
                // 跳過結尾的 fence；未閉合時讀到檔尾
                i += 1;

                blocks.push(Block::CodeBlock {
                    language: (!language.is_empty()).then(|| language.to_string()),
                    lines: code_lines,
                });
                continue;
            }

            if line.starts_with('|') {
                let mut rows = Vec::new();
                while i < lines.len() && lines[i].trim().starts_with('|') {
                    let cells = split_row(lines[i]);
                    if !is_delimiter_row(&cells) {
                        rows.push(cells.iter().map(|cell| parse_inline(cell)).collect());
                    }
                    i += 1;
                }

                if !rows.is_empty() {
                    blocks.push(Block::Table(Table::from_rows(rows)));
                }
                continue;
            }

            blocks.push(self.classify_line(raw, line));
            i += 1;
        }

        tracing::debug!("Parsed {} blocks from {} lines", blocks.len(), lines.len());
        Document { blocks }
    }

    fn classify_line(&self, raw: &str, line: &str) -> Block {
        if let Some((level, text)) = heading(line) {
            return Block::Heading {
                level,
                spans: parse_inline(text),
            };
        }

        if is_thematic_break(line) {
            return Block::Rule;
        }

        if let Some(text) = ["- ", "* ", "+ "]
            .iter()
            .find_map(|bullet| line.strip_prefix(*bullet))
        {
            return Block::ListItem {
                ordered: false,
                depth: list_depth(raw),
                spans: parse_inline(text.trim()),
            };
        }

        if let Some(text) = ordered_item(line) {
            return Block::ListItem {
                ordered: true,
                depth: list_depth(raw),
                spans: parse_inline(text),
            };
        }

        if let Some(text) = line.strip_prefix('>') {
            return Block::Quote {
                spans: parse_inline(text.trim_start()),
            };
        }

        let starts_with_marker = self.options.markers.iter().any(|m| line.starts_with(m.as_str()));
        if line.starts_with("**") || starts_with_marker {
            let marker = self
                .options
                .markers
                .iter()
                .find(|m| line.contains(m.as_str()))
                .cloned();
            return Block::Callout {
                marker,
                spans: parse_inline(line),
            };
        }

        Block::Paragraph {
            spans: parse_inline(line),
        }
    }
}

fn opening_fence(line: &str) -> Option<&str> {
    let fence_char = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = line.chars().take_while(|c| *c == fence_char).count();
    (run >= 3).then(|| &line[..run])
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let text = line[hashes..].strip_prefix(' ')?.trim();

    // 去掉結尾的 `###`，但 `C#` 這類文字保留
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() {
        without_closing
    } else if without_closing.ends_with(' ') {
        without_closing.trim_end()
    } else {
        text
    };

    Some((hashes as u8, text))
}

fn is_thematic_break(line: &str) -> bool {
    let mut chars = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }

    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if !(1..=9).contains(&digits) {
        return None;
    }

    let rest = line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

fn list_depth(raw: &str) -> u8 {
    let width: usize = raw
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    (width / 2).min(MAX_LIST_DEPTH) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{plain_text, Span};

    fn parse(source: &str) -> Document {
        MarkdownParser::default().parse(source)
    }

    #[test]
    fn test_headings() {
        let doc = parse("# 验证报告\n## 概述\n### 细节\n#### 附录 ##\n#无空格");
        let levels: Vec<u8> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
        assert_eq!(doc.title().as_deref(), Some("验证报告"));
        assert!(matches!(&doc.blocks[3], Block::Heading { spans, .. } if plain_text(spans) == "附录"));
        assert!(matches!(&doc.blocks[4], Block::Paragraph { .. }));
    }

    #[test]
    fn test_heading_keeps_trailing_hash_in_word() {
        assert_eq!(heading("## C#"), Some((2, "C#")));
        assert_eq!(heading("####### seven"), None);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let doc = parse("\r\n第一段\r\n\r\n   \r\n第二段\r\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph {
                    spans: vec![Span::plain("第一段")]
                },
                Block::Paragraph {
                    spans: vec![Span::plain("第二段")]
                },
            ]
        );
    }

    #[test]
    fn test_consecutive_lines_are_separate_paragraphs() {
        let doc = parse("line one\nline two");
        assert_eq!(doc.count("paragraph"), 2);
    }

    #[test]
    fn test_table_drops_delimiter_and_pads_rows() {
        let doc = parse("| 项目 | 结果 | 备注 |\n|------|:----:|---|\n| 扫描 | ✅ |\n| 更新 | 通过 | 无 |\n后续段落");
        assert_eq!(doc.blocks.len(), 2);
        let Block::Table(table) = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks[0]);
        };
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.columns(), 3);
        assert_eq!(plain_text(&table.rows[0][0]), "项目");
        assert!(table.rows[1][2].is_empty());
    }

    #[test]
    fn test_table_of_only_delimiters_is_dropped() {
        let doc = parse("|---|---|\n||");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_lists() {
        let doc = parse("- 第一项\n  - 子项\n* 星号\n1. 编号\n2) 第二\n3.没有空格");
        assert!(matches!(&doc.blocks[0], Block::ListItem { ordered: false, depth: 0, .. }));
        assert!(matches!(&doc.blocks[1], Block::ListItem { ordered: false, depth: 1, .. }));
        assert!(matches!(&doc.blocks[2], Block::ListItem { ordered: false, .. }));
        assert!(matches!(&doc.blocks[3], Block::ListItem { ordered: true, depth: 0, spans } if plain_text(spans) == "编号"));
        assert!(matches!(&doc.blocks[4], Block::ListItem { ordered: true, .. }));
        assert!(matches!(&doc.blocks[5], Block::Paragraph { .. }));
    }

    #[test]
    fn test_list_depth_is_capped() {
        assert_eq!(list_depth("\t\t\t\t\t- deep"), 8);
        assert_eq!(list_depth("    - two"), 2);
    }

    #[test]
    fn test_callouts() {
        let doc = parse("✅ 所有测试通过\n**结论**：可以发布 ✅\n**注意**：需要复核");
        assert!(matches!(&doc.blocks[0], Block::Callout { marker: Some(m), .. } if m == "✅"));
        assert!(matches!(&doc.blocks[1], Block::Callout { marker: Some(_), spans } if spans[0] == Span::bold("结论")));
        assert!(matches!(&doc.blocks[2], Block::Callout { marker: None, .. }));
    }

    #[test]
    fn test_custom_markers() {
        let parser = MarkdownParser::new(ParseOptions::new(vec![
            "❌".to_string(),
            String::new(),
        ]));
        let doc = parser.parse("❌ 失败\n✅ 默认标记不再生效");
        assert!(matches!(&doc.blocks[0], Block::Callout { marker: Some(m), .. } if m == "❌"));
        assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn test_code_fence_preserves_lines() {
        let doc = parse("```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n之后");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: Some("rust".to_string()),
                lines: vec![
                    "fn main() {".to_string(),
                    "    println!(\"hi\");".to_string(),
                    "}".to_string(),
                ],
            }
        );
        assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let doc = parse("~~~\n# 不是标题\n| 不是表格 |");
        assert_eq!(doc.blocks.len(), 1);
        assert!(matches!(&doc.blocks[0], Block::CodeBlock { language: None, lines } if lines.len() == 2));
    }

    #[test]
    fn test_rules_and_quotes() {
        let doc = parse("---\n* * *\n> 引用内容\n**");
        assert_eq!(doc.blocks[0], Block::Rule);
        assert_eq!(doc.blocks[1], Block::Rule);
        assert!(matches!(&doc.blocks[2], Block::Quote { spans } if plain_text(spans) == "引用内容"));
        assert!(matches!(&doc.blocks[3], Block::Callout { .. }));
    }

    #[test]
    fn test_bom_is_ignored() {
        let doc = parse("\u{feff}# 标题");
        assert_eq!(doc.title().as_deref(), Some("标题"));
    }
}
