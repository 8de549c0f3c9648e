use crate::config::toml_config::StyleConfig;
use crate::docx::xml::{XmlWriter, W_NS};
use crate::utils::error::Result;

pub const HYPERLINK_STYLE: &str = "Hyperlink";
pub const CODE_CHAR_STYLE: &str = "CodeChar";
pub const CODE_BLOCK_STYLE: &str = "CodeBlock";
pub const QUOTE_STYLE: &str = "Quote";
pub const LIST_BULLET_STYLE: &str = "ListBullet";
pub const LIST_NUMBER_STYLE: &str = "ListNumber";
pub const TABLE_NORMAL_STYLE: &str = "TableNormal";

/// pt 轉為 Word 的半點 (half-point) 單位
pub fn half_points(pt: f32) -> String {
    ((pt * 2.0).round() as u32).to_string()
}

pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level.clamp(1, 6))
}

pub fn styles_xml(style: &StyleConfig) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:styles", &[("xmlns:w", W_NS)])?;

    write_doc_defaults(&mut xml, style)?;

    xml.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.val("w:name", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.close("w:style")?;

    for level in 1..=6u8 {
        write_heading_style(&mut xml, style, level)?;
    }

    write_list_style(&mut xml, LIST_BULLET_STYLE, "List Bullet")?;
    write_list_style(&mut xml, LIST_NUMBER_STYLE, "List Number")?;

    // 引用
    xml.open("w:style", &[("w:type", "paragraph"), ("w:styleId", QUOTE_STYLE)])?;
    xml.val("w:name", "Quote")?;
    xml.val("w:basedOn", "Normal")?;
    xml.val("w:next", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.open("w:pPr", &[])?;
    xml.open("w:pBdr", &[])?;
    xml.empty(
        "w:left",
        &[("w:val", "single"), ("w:sz", "12"), ("w:space", "4"), ("w:color", "BFBFBF")],
    )?;
    xml.close("w:pBdr")?;
    xml.empty("w:ind", &[("w:left", "567"), ("w:right", "567")])?;
    xml.close("w:pPr")?;
    xml.open("w:rPr", &[])?;
    xml.empty("w:i", &[])?;
    xml.empty("w:iCs", &[])?;
    xml.val("w:color", "595959")?;
    xml.close("w:rPr")?;
    xml.close("w:style")?;

    // 程式碼區塊：等寬字型、灰底、段後不留距
    let code_font = style.document.code_font.as_str();
    xml.open("w:style", &[("w:type", "paragraph"), ("w:styleId", CODE_BLOCK_STYLE)])?;
    xml.val("w:name", "Code Block")?;
    xml.val("w:basedOn", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", "F2F2F2")])?;
    xml.empty(
        "w:spacing",
        &[("w:before", "0"), ("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")],
    )?;
    xml.close("w:pPr")?;
    xml.open("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", code_font), ("w:hAnsi", code_font), ("w:cs", code_font)],
    )?;
    xml.val("w:sz", "18")?;
    xml.val("w:szCs", "18")?;
    xml.close("w:rPr")?;
    xml.close("w:style")?;

    xml.open("w:style", &[("w:type", "character"), ("w:styleId", CODE_CHAR_STYLE)])?;
    xml.val("w:name", "Code Char")?;
    xml.open("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", code_font), ("w:hAnsi", code_font), ("w:cs", code_font)],
    )?;
    xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", "F2F2F2")])?;
    xml.close("w:rPr")?;
    xml.close("w:style")?;

    xml.open("w:style", &[("w:type", "character"), ("w:styleId", HYPERLINK_STYLE)])?;
    xml.val("w:name", "Hyperlink")?;
    xml.open("w:rPr", &[])?;
    xml.val("w:color", "0563C1")?;
    xml.val("w:u", "single")?;
    xml.close("w:rPr")?;
    xml.close("w:style")?;

    write_table_styles(&mut xml, style)?;

    xml.close("w:styles")?;
    Ok(xml.into_bytes())
}

fn write_doc_defaults(xml: &mut XmlWriter, style: &StyleConfig) -> Result<()> {
    let font = style.document.font.as_str();
    let size = half_points(style.document.font_size);

    xml.open("w:docDefaults", &[])?;
    xml.open("w:rPrDefault", &[])?;
    xml.open("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:eastAsia", style.document.east_asia_font.as_str()),
            ("w:cs", font),
        ],
    )?;
    xml.val("w:sz", &size)?;
    xml.val("w:szCs", &size)?;
    xml.empty("w:lang", &[("w:val", "en-US"), ("w:eastAsia", "zh-CN")])?;
    xml.close("w:rPr")?;
    xml.close("w:rPrDefault")?;
    xml.open("w:pPrDefault", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[("w:after", "120"), ("w:line", "276"), ("w:lineRule", "auto")],
    )?;
    xml.close("w:pPr")?;
    xml.close("w:pPrDefault")?;
    xml.close("w:docDefaults")
}

fn write_heading_style(xml: &mut XmlWriter, style: &StyleConfig, level: u8) -> Result<()> {
    let id = heading_style_id(level);
    let size = half_points(style.heading_size(level));
    let outline = (level - 1).to_string();

    xml.open("w:style", &[("w:type", "paragraph"), ("w:styleId", id.as_str())])?;
    xml.val("w:name", &format!("heading {}", level))?;
    xml.val("w:basedOn", "Normal")?;
    xml.val("w:next", "Normal")?;
    xml.empty("w:qFormat", &[])?;

    xml.open("w:pPr", &[])?;
    xml.empty("w:keepNext", &[])?;
    xml.empty("w:spacing", &[("w:before", "240"), ("w:after", "120")])?;
    if level == 1 && style.headings.h1_centered {
        xml.val("w:jc", "center")?;
    }
    xml.val("w:outlineLvl", &outline)?;
    xml.close("w:pPr")?;

    xml.open("w:rPr", &[])?;
    xml.empty("w:b", &[])?;
    xml.empty("w:bCs", &[])?;
    if let Some(color) = &style.headings.color {
        xml.val("w:color", color)?;
    }
    xml.val("w:sz", &size)?;
    xml.val("w:szCs", &size)?;
    xml.close("w:rPr")?;

    xml.close("w:style")
}

fn write_list_style(xml: &mut XmlWriter, id: &str, name: &str) -> Result<()> {
    xml.open("w:style", &[("w:type", "paragraph"), ("w:styleId", id)])?;
    xml.val("w:name", name)?;
    xml.val("w:basedOn", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty("w:contextualSpacing", &[])?;
    xml.close("w:pPr")?;
    xml.close("w:style")
}

fn write_table_styles(xml: &mut XmlWriter, style: &StyleConfig) -> Result<()> {
    xml.open(
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", TABLE_NORMAL_STYLE)],
    )?;
    xml.val("w:name", "Normal Table")?;
    xml.val("w:uiPriority", "99")?;
    xml.empty("w:semiHidden", &[])?;
    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    xml.open("w:tblCellMar", &[])?;
    for (side, width) in [("w:top", "0"), ("w:left", "108"), ("w:bottom", "0"), ("w:right", "108")] {
        xml.empty(side, &[("w:w", width), ("w:type", "dxa")])?;
    }
    xml.close("w:tblCellMar")?;
    xml.close("w:tblPr")?;
    xml.close("w:style")?;

    let id = style.table_style_id();
    let color = style.table.border_color.as_str();

    xml.open("w:style", &[("w:type", "table"), ("w:styleId", id.as_str())])?;
    xml.val("w:name", &style.table.style)?;
    xml.val("w:basedOn", TABLE_NORMAL_STYLE)?;
    xml.open("w:tblPr", &[])?;
    xml.open("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            side,
            &[("w:val", "single"), ("w:sz", "8"), ("w:space", "0"), ("w:color", color)],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.close("w:tblPr")?;

    xml.open("w:tblStylePr", &[("w:type", "firstRow")])?;
    if style.table.header_bold {
        xml.open("w:rPr", &[])?;
        xml.empty("w:b", &[])?;
        xml.empty("w:bCs", &[])?;
        xml.close("w:rPr")?;
    }
    xml.empty("w:tblPr", &[])?;
    xml.open("w:tcPr", &[])?;
    xml.open("w:tcBorders", &[])?;
    xml.empty(
        "w:bottom",
        &[("w:val", "single"), ("w:sz", "18"), ("w:space", "0"), ("w:color", color)],
    )?;
    xml.close("w:tcBorders")?;
    xml.close("w:tcPr")?;
    xml.close("w:tblStylePr")?;

    xml.close("w:style")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_points() {
        assert_eq!(half_points(18.0), "36");
        assert_eq!(half_points(10.5), "21");
    }

    #[test]
    fn test_styles_carry_fonts_and_heading_sizes() {
        let xml = String::from_utf8(styles_xml(&StyleConfig::default()).unwrap()).unwrap();
        assert!(xml.contains("w:eastAsia=\"宋体\""));
        assert!(xml.contains("w:styleId=\"Heading1\""));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
        assert!(xml.contains("<w:sz w:val=\"36\"/>"));
        assert!(xml.contains("<w:sz w:val=\"28\"/>"));
        assert!(xml.contains("<w:sz w:val=\"24\"/>"));
        assert!(xml.contains("w:styleId=\"LightGridAccent1\""));
        assert!(xml.contains("<w:name w:val=\"Light Grid Accent 1\"/>"));
    }

    #[test]
    fn test_uncentered_title() {
        let mut style = StyleConfig::default();
        style.headings.h1_centered = false;
        let xml = String::from_utf8(styles_xml(&style).unwrap()).unwrap();
        assert!(!xml.contains("<w:jc w:val=\"center\"/>"));
    }

    #[test]
    fn test_table_style_named_like_builtin_gets_own_id() {
        let mut style = StyleConfig::default();
        style.table.style = "Table Normal".to_string();
        let xml = String::from_utf8(styles_xml(&style).unwrap()).unwrap();
        assert_eq!(xml.matches("w:styleId=\"TableNormal\"").count(), 1);
        assert!(xml.contains("w:styleId=\"TableNormalCustom\""));
    }
}
