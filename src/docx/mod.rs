//! WordprocessingML (.docx) package writer.
//!
//! The package is assembled part by part: the body is rendered first so that
//! hyperlink relationships and ordered-list numbering instances discovered
//! while walking the blocks can be written into their own parts afterwards.

pub mod document;
pub mod numbering;
pub mod package;
pub mod relationships;
pub mod styles;
pub mod xml;

use crate::config::toml_config::StyleConfig;
use crate::domain::model::Document;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use document::BodyWriter;
use numbering::NumberingRegistry;
use package::*;
use relationships::{Relationships, NUMBERING, SETTINGS, STYLES};

pub struct DocxRenderer<'a> {
    style: &'a StyleConfig,
    created: DateTime<Utc>,
}

impl<'a> DocxRenderer<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self {
            style,
            created: Utc::now(),
        }
    }

    /// 固定建立時間，測試時可得到穩定的 core.xml
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        let mut rels = Relationships::new();
        rels.add(STYLES, "styles.xml");
        rels.add(NUMBERING, "numbering.xml");
        rels.add(SETTINGS, "settings.xml");

        let mut numbering = NumberingRegistry::default();
        let body = BodyWriter::new(self.style, &mut rels, &mut numbering)?.render(document)?;

        tracing::debug!(
            "Rendered body: {} bytes, {} relationships, {} ordered lists",
            body.len(),
            rels.len(),
            numbering.ordered_lists()
        );

        let title = self
            .style
            .document
            .title
            .clone()
            .or_else(|| document.title());

        let parts = [
            (CONTENT_TYPES_PART, content_types_xml()?),
            (PACKAGE_RELS_PART, package_rels_xml()?),
            (DOCUMENT_PART, body),
            (DOCUMENT_RELS_PART, rels.to_xml()?),
            (STYLES_PART, styles::styles_xml(self.style)?),
            (NUMBERING_PART, numbering.to_xml()?),
            (SETTINGS_PART, settings_xml()?),
            (
                CORE_PART,
                core_properties_xml(
                    title.as_deref(),
                    self.style.document.author.as_deref(),
                    self.created,
                )?,
            ),
            (APP_PART, app_properties_xml()?),
        ];

        write_package(&parts)
    }
}
