use crate::docx::xml::XmlWriter;
use crate::utils::error::Result;

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
pub const SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
pub const HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    kind: &'static str,
    target: String,
    external: bool,
}

/// 一個 `.rels` 部件；ID 依加入順序編為 rId1, rId2, ...
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: &'static str, target: &str) -> String {
        self.push(kind, target, false)
    }

    /// 同一個網址只登記一次
    pub fn add_hyperlink(&mut self, url: &str) -> String {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|r| r.external && r.kind == HYPERLINK && r.target == url)
        {
            return existing.id.clone();
        }
        self.push(HYPERLINK, url, true)
    }

    fn push(&mut self, kind: &'static str, target: &str, external: bool) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            kind,
            target: target.to_string(),
            external,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.open("Relationships", &[("xmlns", RELS_NS)])?;
        for rel in &self.entries {
            let mut attrs = vec![
                ("Id", rel.id.as_str()),
                ("Type", rel.kind),
                ("Target", rel.target.as_str()),
            ];
            if rel.external {
                attrs.push(("TargetMode", "External"));
            }
            xml.empty("Relationship", &attrs)?;
        }
        xml.close("Relationships")?;
        Ok(xml.into_bytes())
    }
}
