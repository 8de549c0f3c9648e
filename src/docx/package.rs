use crate::docx::relationships::{
    Relationships, CORE_PROPERTIES, EXTENDED_PROPERTIES, OFFICE_DOCUMENT,
};
use crate::docx::xml::{XmlWriter, W_NS};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const SETTINGS_PART: &str = "word/settings.xml";
pub const CORE_PART: &str = "docProps/core.xml";
pub const APP_PART: &str = "docProps/app.xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const OVERRIDES: [(&str, &str); 6] = [
    (
        DOCUMENT_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        STYLES_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        NUMBERING_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
    ),
    (
        SETTINGS_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
    ),
    (CORE_PART, "application/vnd.openxmlformats-package.core-properties+xml"),
    (
        APP_PART,
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    ),
];

pub fn content_types_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (part, content_type) in OVERRIDES {
        let part_name = format!("/{}", part);
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type)],
        )?;
    }
    xml.close("Types")?;
    Ok(xml.into_bytes())
}

pub fn package_rels_xml() -> Result<Vec<u8>> {
    let mut rels = Relationships::new();
    rels.add(OFFICE_DOCUMENT, DOCUMENT_PART);
    rels.add(CORE_PROPERTIES, CORE_PART);
    rels.add(EXTENDED_PROPERTIES, APP_PART);
    rels.to_xml()
}

pub fn settings_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open("w:settings", &[("xmlns:w", W_NS)])?;
    xml.val("w:defaultTabStop", "420")?;
    xml.val("w:characterSpacingControl", "compressPunctuation")?;
    xml.open("w:compat", &[])?;
    xml.empty(
        "w:compatSetting",
        &[
            ("w:name", "compatibilityMode"),
            ("w:uri", "http://schemas.microsoft.com/office/word"),
            ("w:val", "15"),
        ],
    )?;
    xml.close("w:compat")?;
    xml.close("w:settings")?;
    Ok(xml.into_bytes())
}

pub fn core_properties_xml(
    title: Option<&str>,
    author: Option<&str>,
    created: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let w3cdtf = [("xsi:type", "dcterms:W3CDTF")];

    let mut xml = XmlWriter::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = title {
        xml.element("dc:title", &[], title)?;
    }
    if let Some(author) = author {
        xml.element("dc:creator", &[], author)?;
        xml.element("cp:lastModifiedBy", &[], author)?;
    }
    xml.element("dcterms:created", &w3cdtf, &timestamp)?;
    xml.element("dcterms:modified", &w3cdtf, &timestamp)?;
    xml.close("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

pub fn app_properties_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    xml.element("Application", &[], env!("CARGO_PKG_NAME"))?;
    xml.close("Properties")?;
    Ok(xml.into_bytes())
}

/// 依序寫入各部件並壓縮成 .docx (ZIP) 位元組
pub fn write_package(parts: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in parts {
        tracing::debug!("Adding part {} ({} bytes)", name, data.len());
        zip.start_file(*name, options)?;
        zip.write_all(data)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
