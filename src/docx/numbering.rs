use crate::docx::xml::{XmlWriter, W_NS};
use crate::utils::error::Result;

pub const BULLET_NUM_ID: u32 = 1;

const BULLET_ABSTRACT_ID: &str = "0";
const DECIMAL_ABSTRACT_ID: &str = "1";
const LEVELS: u8 = 9;
const BULLETS: [&str; 3] = ["•", "◦", "▪"];

/// 記錄文件中出現的編號清單；每段有序清單各用一個 `w:num`，才能從 1 重新編號
#[derive(Debug, Clone, Default)]
pub struct NumberingRegistry {
    ordered_lists: u32,
}

impl NumberingRegistry {
    pub fn next_ordered_list(&mut self) -> u32 {
        self.ordered_lists += 1;
        BULLET_NUM_ID + self.ordered_lists
    }

    pub fn ordered_lists(&self) -> u32 {
        self.ordered_lists
    }

    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.open("w:numbering", &[("xmlns:w", W_NS)])?;

        write_abstract(&mut xml, BULLET_ABSTRACT_ID, |level| {
            ("bullet", BULLETS[level as usize % BULLETS.len()].to_string())
        })?;
        write_abstract(&mut xml, DECIMAL_ABSTRACT_ID, |level| {
            ("decimal", format!("%{}.", level + 1))
        })?;

        let bullet_id = BULLET_NUM_ID.to_string();
        xml.open("w:num", &[("w:numId", bullet_id.as_str())])?;
        xml.val("w:abstractNumId", BULLET_ABSTRACT_ID)?;
        xml.close("w:num")?;

        for n in 1..=self.ordered_lists {
            let id = (BULLET_NUM_ID + n).to_string();
            xml.open("w:num", &[("w:numId", id.as_str())])?;
            xml.val("w:abstractNumId", DECIMAL_ABSTRACT_ID)?;
            xml.open("w:lvlOverride", &[("w:ilvl", "0")])?;
            xml.val("w:startOverride", "1")?;
            xml.close("w:lvlOverride")?;
            xml.close("w:num")?;
        }

        xml.close("w:numbering")?;
        Ok(xml.into_bytes())
    }
}

fn write_abstract<F>(xml: &mut XmlWriter, id: &str, format: F) -> Result<()>
where
    F: Fn(u8) -> (&'static str, String),
{
    xml.open("w:abstractNum", &[("w:abstractNumId", id)])?;
    xml.val("w:multiLevelType", "hybridMultilevel")?;

    for level in 0..LEVELS {
        let (num_fmt, text) = format(level);
        let ilvl = level.to_string();
        let left = (420 * (u32::from(level) + 1)).to_string();

        xml.open("w:lvl", &[("w:ilvl", ilvl.as_str())])?;
        xml.val("w:start", "1")?;
        xml.val("w:numFmt", num_fmt)?;
        xml.val("w:lvlText", &text)?;
        xml.val("w:lvlJc", "left")?;
        xml.open("w:pPr", &[])?;
        xml.empty("w:ind", &[("w:left", left.as_str()), ("w:hanging", "420")])?;
        xml.close("w:pPr")?;
        xml.close("w:lvl")?;
    }

    xml.close("w:abstractNum")
}
