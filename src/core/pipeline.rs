use crate::core::{ConfigProvider, Document, Pipeline, SourceText, Storage};
use crate::docx::DocxRenderer;
use crate::markdown::{MarkdownParser, ParseOptions};
use crate::utils::error::{ConversionError, Result};

/// Markdown -> .docx 的三段式管道
pub struct DocxPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DocxPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DocxPipeline<S, C> {
    async fn extract(&self) -> Result<SourceText> {
        let path = self.config.input_path();
        tracing::debug!("Reading Markdown source: {}", path);

        let bytes = match self.storage.read_file(path).await {
            Ok(bytes) => bytes,
            Err(ConversionError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConversionError::InputNotFound {
                    path: path.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let content = String::from_utf8(bytes).map_err(|e| ConversionError::EncodingError {
            path: path.to_string(),
            message: e.utf8_error().to_string(),
        })?;

        Ok(SourceText {
            path: path.to_string(),
            content,
        })
    }

    async fn transform(&self, source: SourceText) -> Result<Document> {
        let parser = MarkdownParser::new(ParseOptions::from(self.config.style()));
        let document = parser.parse(&source.content);

        if document.is_empty() {
            tracing::warn!("{} contains no content, producing an empty document", source.path);
        }

        Ok(document)
    }

    async fn load(&self, document: Document) -> Result<String> {
        let output_path = self.config.output_path();

        let data = DocxRenderer::new(self.config.style()).render(&document)?;

        tracing::debug!("Writing document ({} bytes) to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}
