use clap::Parser;
use report_docx::config::{ConversionConfig, LogFormat};
use report_docx::core::ConfigProvider;
use report_docx::domain::model::{plain_text, Block, Document};
use report_docx::utils::error::ConversionError;
use report_docx::utils::{console, logger, validation::Validate};
use report_docx::{CliConfig, ConversionEngine, DocxPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting report-docx");
    tracing::debug!("CLI args: {:?}", args);

    // 載入樣式設定並驗證
    let config = match args.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::current_dir();
    let pipeline = DocxPipeline::new(storage, config);
    let engine = ConversionEngine::new_with_monitoring(pipeline, monitor_enabled);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No document will be written");
        match engine.preview().await {
            Ok(document) if args.json => {
                println!("{}", serde_json::to_string_pretty(&document)?);
            }
            Ok(document) => display_outline(&document),
            Err(e) => exit_with(e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Conversion completed successfully");
            println!("{}", console::success_message(&output_path));
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: ConversionError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", console::failure_message(&e));

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code());
}

fn display_config_summary(config: &ConversionConfig, args: &CliConfig) {
    if args.json || (!args.verbose && !args.dry_run) {
        return;
    }

    let style = config.style();
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!(
        "  Font: {} / {} ({}pt)",
        style.document.font, style.document.east_asia_font, style.document.font_size
    );
    println!(
        "  Headings: {}pt / {}pt / {}pt",
        style.headings.h1_size, style.headings.h2_size, style.headings.h3_size
    );
    println!("  Table Style: {}", style.table.style);
    println!(
        "  Markers: {}",
        style
            .markers
            .iter()
            .map(|m| format!("{} #{}", m.symbol, m.color))
            .collect::<Vec<_>>()
            .join(", ")
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn display_outline(document: &Document) {
    println!("🔍 Document Outline:");
    for block in &document.blocks {
        match block {
            Block::Heading { level, spans } => {
                let indent = "  ".repeat(usize::from(*level));
                println!("{}{} {}", indent, "#".repeat(usize::from(*level)), plain_text(spans));
            }
            Block::Table(table) => {
                println!("    [table {}x{}]", table.rows.len(), table.columns());
            }
            _ => {}
        }
    }

    println!();
    println!("📊 Blocks:");
    for kind in [
        "heading",
        "paragraph",
        "callout",
        "list_item",
        "table",
        "code_block",
        "quote",
        "rule",
    ] {
        let count = document.count(kind);
        if count > 0 {
            println!("  {}: {}", kind, count);
        }
    }

    println!();
    println!("✅ Dry run complete. Run without --dry-run to write the document.");
}
