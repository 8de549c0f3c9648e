use crate::core::{Document, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 只讀取並解析，不輸出文件 (dry run)
    pub async fn preview(&self) -> Result<Document> {
        let source = self.pipeline.extract().await?;
        tracing::info!("Read {} ({} bytes)", source.path, source.content.len());

        let document = self.pipeline.transform(source).await?;
        tracing::info!("Parsed {} blocks", document.blocks.len());
        Ok(document)
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting conversion...");
        self.monitor.log_stats("Start");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!("Read {} ({} bytes)", source.path, source.content.len());
        self.monitor.log_stats("Extract");

        // Transform
        let document = self.pipeline.transform(source).await?;
        tracing::info!(
            "Parsed {} blocks ({} headings, {} tables)",
            document.blocks.len(),
            document.count("heading"),
            document.count("table")
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(document).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
