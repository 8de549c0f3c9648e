use crate::config::toml_config::StyleConfig;
use crate::docx::numbering::{NumberingRegistry, BULLET_NUM_ID};
use crate::docx::relationships::Relationships;
use crate::docx::styles::{
    heading_style_id, CODE_BLOCK_STYLE, CODE_CHAR_STYLE, HYPERLINK_STYLE, LIST_BULLET_STYLE,
    LIST_NUMBER_STYLE, QUOTE_STYLE,
};
use crate::docx::xml::{XmlWriter, R_NS, W_NS};
use crate::domain::model::{Block, Document, Span, Table};
use crate::utils::error::Result;

// 頁邊距 (twip)：上下 2.54cm、左右 3.17cm
const MARGIN_TOP_BOTTOM: u32 = 1440;
const MARGIN_LEFT_RIGHT: u32 = 1800;

/// 套在整段文字上的額外格式 (醒目提示、表頭)
#[derive(Debug, Clone, Copy, Default)]
struct RunFormat<'a> {
    bold: bool,
    color: Option<&'a str>,
}

pub struct BodyWriter<'a> {
    xml: XmlWriter,
    style: &'a StyleConfig,
    rels: &'a mut Relationships,
    numbering: &'a mut NumberingRegistry,
    /// 目前有序清單的 numId；遇到非清單區塊即清除
    ordered_num_id: Option<u32>,
}

impl<'a> BodyWriter<'a> {
    pub fn new(
        style: &'a StyleConfig,
        rels: &'a mut Relationships,
        numbering: &'a mut NumberingRegistry,
    ) -> Result<Self> {
        Ok(Self {
            xml: XmlWriter::new()?,
            style,
            rels,
            numbering,
            ordered_num_id: None,
        })
    }

    pub fn render(mut self, document: &Document) -> Result<Vec<u8>> {
        self.xml
            .open("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
        self.xml.open("w:body", &[])?;

        for block in &document.blocks {
            self.write_block(block)?;
        }

        // 表格不能是 body 的最後一個元素
        if matches!(document.blocks.last(), Some(Block::Table(_))) {
            self.xml.empty("w:p", &[])?;
        }

        self.write_section()?;
        self.xml.close("w:body")?;
        self.xml.close("w:document")?;
        Ok(self.xml.into_bytes())
    }

    fn write_block(&mut self, block: &Block) -> Result<()> {
        if !matches!(block, Block::ListItem { .. }) {
            self.ordered_num_id = None;
        }

        match block {
            Block::Heading { level, spans } => {
                let id = heading_style_id(*level);
                self.paragraph(Some(&id), spans, RunFormat::default())?;
            }
            Block::Paragraph { spans } => {
                self.paragraph(None, spans, RunFormat::default())?;
            }
            Block::Callout { marker, spans } => {
                let style = self.style;
                let format = marker
                    .as_deref()
                    .and_then(|m| style.marker(m))
                    .map(|m| RunFormat {
                        bold: m.bold,
                        color: Some(m.color.as_str()),
                    })
                    .unwrap_or_default();
                self.paragraph(None, spans, format)?;
            }
            Block::ListItem {
                ordered,
                depth,
                spans,
            } => self.list_item(*ordered, *depth, spans)?,
            Block::Table(table) => self.table(table)?,
            Block::CodeBlock { lines, .. } => self.code_block(lines)?,
            Block::Quote { spans } => {
                self.paragraph(Some(QUOTE_STYLE), spans, RunFormat::default())?;
            }
            Block::Rule => {
                self.xml.open("w:p", &[])?;
                self.xml.open("w:pPr", &[])?;
                self.xml.open("w:pBdr", &[])?;
                self.xml.empty(
                    "w:bottom",
                    &[("w:val", "single"), ("w:sz", "6"), ("w:space", "1"), ("w:color", "auto")],
                )?;
                self.xml.close("w:pBdr")?;
                self.xml.close("w:pPr")?;
                self.xml.close("w:p")?;
            }
        }

        Ok(())
    }

    fn paragraph(
        &mut self,
        style_id: Option<&str>,
        spans: &[Span],
        format: RunFormat<'_>,
    ) -> Result<()> {
        self.xml.open("w:p", &[])?;
        if let Some(id) = style_id {
            self.xml.open("w:pPr", &[])?;
            self.xml.val("w:pStyle", id)?;
            self.xml.close("w:pPr")?;
        }
        self.spans(spans, format)?;
        self.xml.close("w:p")
    }

    fn list_item(&mut self, ordered: bool, depth: u8, spans: &[Span]) -> Result<()> {
        let (style_id, num_id) = if ordered {
            // 非清單區塊之後的有序項目重新從 1 編號
            let num_id = match self.ordered_num_id {
                Some(id) => id,
                None => self.numbering.next_ordered_list(),
            };
            self.ordered_num_id = Some(num_id);
            (LIST_NUMBER_STYLE, num_id)
        } else {
            (LIST_BULLET_STYLE, BULLET_NUM_ID)
        };

        let ilvl = depth.to_string();
        let num_id = num_id.to_string();

        self.xml.open("w:p", &[])?;
        self.xml.open("w:pPr", &[])?;
        self.xml.val("w:pStyle", style_id)?;
        self.xml.open("w:numPr", &[])?;
        self.xml.val("w:ilvl", &ilvl)?;
        self.xml.val("w:numId", &num_id)?;
        self.xml.close("w:numPr")?;
        self.xml.close("w:pPr")?;
        self.spans(spans, RunFormat::default())?;
        self.xml.close("w:p")
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        let columns = table.columns().max(1);
        let cell_width = (self.text_width() / columns as u32).to_string();
        let style_id = self.style.table_style_id();
        let header_format = RunFormat {
            bold: self.style.table.header_bold,
            color: None,
        };

        self.xml.open("w:tbl", &[])?;
        self.xml.open("w:tblPr", &[])?;
        self.xml.val("w:tblStyle", &style_id)?;
        self.xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
        self.xml.empty(
            "w:tblLook",
            &[
                ("w:val", "04A0"),
                ("w:firstRow", "1"),
                ("w:lastRow", "0"),
                ("w:firstColumn", "0"),
                ("w:lastColumn", "0"),
                ("w:noHBand", "0"),
                ("w:noVBand", "1"),
            ],
        )?;
        self.xml.close("w:tblPr")?;

        self.xml.open("w:tblGrid", &[])?;
        for _ in 0..columns {
            self.xml.empty("w:gridCol", &[("w:w", cell_width.as_str())])?;
        }
        self.xml.close("w:tblGrid")?;

        for (row_idx, row) in table.rows.iter().enumerate() {
            self.xml.open("w:tr", &[])?;
            if row_idx == 0 {
                self.xml.open("w:trPr", &[])?;
                self.xml.empty("w:tblHeader", &[])?;
                self.xml.close("w:trPr")?;
            }

            let format = if row_idx == 0 {
                header_format
            } else {
                RunFormat::default()
            };

            for cell in row {
                self.xml.open("w:tc", &[])?;
                self.xml.open("w:tcPr", &[])?;
                self.xml
                    .empty("w:tcW", &[("w:w", cell_width.as_str()), ("w:type", "dxa")])?;
                self.xml.close("w:tcPr")?;
                self.xml.open("w:p", &[])?;
                self.spans(cell, format)?;
                self.xml.close("w:p")?;
                self.xml.close("w:tc")?;
            }

            self.xml.close("w:tr")?;
        }

        self.xml.close("w:tbl")
    }

    fn code_block(&mut self, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            return self.code_line("");
        }
        for line in lines {
            self.code_line(line)?;
        }
        Ok(())
    }

    fn code_line(&mut self, line: &str) -> Result<()> {
        self.xml.open("w:p", &[])?;
        self.xml.open("w:pPr", &[])?;
        self.xml.val("w:pStyle", CODE_BLOCK_STYLE)?;
        self.xml.close("w:pPr")?;
        if !line.is_empty() {
            self.xml.open("w:r", &[])?;
            self.text(line)?;
            self.xml.close("w:r")?;
        }
        self.xml.close("w:p")
    }

    fn spans(&mut self, spans: &[Span], format: RunFormat<'_>) -> Result<()> {
        for span in spans {
            match &span.link {
                Some(url) => {
                    let id = self.rels.add_hyperlink(url);
                    self.xml
                        .open("w:hyperlink", &[("r:id", id.as_str()), ("w:history", "1")])?;
                    self.run(span, format, Some(HYPERLINK_STYLE))?;
                    self.xml.close("w:hyperlink")?;
                }
                None => {
                    let char_style = span.code.then_some(CODE_CHAR_STYLE);
                    self.run(span, format, char_style)?;
                }
            }
        }
        Ok(())
    }

    fn run(&mut self, span: &Span, format: RunFormat<'_>, char_style: Option<&str>) -> Result<()> {
        let bold = span.bold || format.bold;

        self.xml.open("w:r", &[])?;
        if char_style.is_some() || bold || span.italic || format.color.is_some() {
            self.xml.open("w:rPr", &[])?;
            if let Some(id) = char_style {
                self.xml.val("w:rStyle", id)?;
            }
            if bold {
                self.xml.empty("w:b", &[])?;
                self.xml.empty("w:bCs", &[])?;
            }
            if span.italic {
                self.xml.empty("w:i", &[])?;
                self.xml.empty("w:iCs", &[])?;
            }
            if let Some(color) = format.color {
                self.xml.val("w:color", color)?;
            }
            self.xml.close("w:rPr")?;
        }
        self.text(&span.text)?;
        self.xml.close("w:r")
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            self.xml.element("w:t", &[("xml:space", "preserve")], text)
        } else {
            self.xml.element("w:t", &[], text)
        }
    }

    fn text_width(&self) -> u32 {
        let (width, _) = self.style.document.page_size.dimensions();
        width - 2 * MARGIN_LEFT_RIGHT
    }

    fn write_section(&mut self) -> Result<()> {
        let (width, height) = self.style.document.page_size.dimensions();
        let width = width.to_string();
        let height = height.to_string();
        let top_bottom = MARGIN_TOP_BOTTOM.to_string();
        let left_right = MARGIN_LEFT_RIGHT.to_string();

        self.xml.open("w:sectPr", &[])?;
        self.xml
            .empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        self.xml.empty(
            "w:pgMar",
            &[
                ("w:top", top_bottom.as_str()),
                ("w:right", left_right.as_str()),
                ("w:bottom", top_bottom.as_str()),
                ("w:left", left_right.as_str()),
                ("w:header", "851"),
                ("w:footer", "992"),
                ("w:gutter", "0"),
            ],
        )?;
        self.xml.close("w:sectPr")
    }
}
