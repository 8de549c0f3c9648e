use report_docx::core::Pipeline;
use report_docx::{
    Block, ConversionConfig, ConversionEngine, ConversionError, DocxPipeline, LocalStorage,
    StyleConfig,
};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

const REPORT: &str = r#"# 蓝牙设备集成验证报告

## 概述

本次验证覆盖 `ct_ble_devices` 集成的扫描、配对与数据上报流程。

✅ 所有核心功能验证通过

## 测试结果

| 测试项 | 结果 | 备注 |
|--------|:----:|------|
| 设备扫描 | ✅ 通过 | 平均 3 秒 |
| 配对流程 | ✅ 通过 | |
| 数据上报 | ✅ 通过 | 见 [日志](https://example.com/logs?run=1&v=2) |

## 发现的问题

- 扫描间隔过短时 CPU 占用偏高
- 断线重连需要手动触发
  - 已在下个版本修复

**结论**：可以发布
"#;

fn read_part(path: &Path, name: &str) -> String {
    let zip_data = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn engine_in(
    temp_dir: &TempDir,
    config: ConversionConfig,
) -> ConversionEngine<DocxPipeline<LocalStorage, ConversionConfig>> {
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    ConversionEngine::new_with_monitoring(DocxPipeline::new(storage, config), false)
}

#[tokio::test]
async fn test_end_to_end_report_conversion() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("验证报告.md"), REPORT)?;

    let engine = engine_in(&temp_dir, ConversionConfig::for_input("验证报告.md"));
    let output_path = engine.run().await?;
    assert_eq!(output_path, "验证报告.docx");

    let full_path = temp_dir.path().join("验证报告.docx");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path)?;
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 9);

    let document = read_part(&full_path, "word/document.xml");
    assert!(document.contains("<w:pStyle w:val=\"Heading1\"/>"));
    assert!(document.contains("<w:t>蓝牙设备集成验证报告</w:t>"));
    assert_eq!(document.matches("<w:pStyle w:val=\"Heading2\"/>").count(), 3);
    assert!(document.contains("<w:tblStyle w:val=\"LightGridAccent1\"/>"));
    assert_eq!(document.matches("<w:tr>").count(), 4);
    assert_eq!(document.matches("<w:pStyle w:val=\"ListBullet\"/>").count(), 3);
    assert!(document.contains("<w:color w:val=\"008000\"/>"));
    assert!(document.contains("<w:rStyle w:val=\"CodeChar\"/>"));
    assert!(!document.contains("|---"));
    assert!(!document.contains("**"));

    let rels = read_part(&full_path, "word/_rels/document.xml.rels");
    assert!(rels.contains("Target=\"https://example.com/logs?run=1&amp;v=2\""));
    assert!(rels.contains("TargetMode=\"External\""));

    let styles = read_part(&full_path, "word/styles.xml");
    assert!(styles.contains("w:eastAsia=\"宋体\""));
    assert!(styles.contains("w:styleId=\"LightGridAccent1\""));

    let core = read_part(&full_path, "docProps/core.xml");
    assert!(core.contains("<dc:title>蓝牙设备集成验证报告</dc:title>"));

    Ok(())
}

#[tokio::test]
async fn test_preview_does_not_write_output() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("验证报告.md"), REPORT)?;

    let engine = engine_in(&temp_dir, ConversionConfig::for_input("验证报告.md"));
    let document = engine.preview().await?;

    assert_eq!(document.count("heading"), 4);
    assert_eq!(document.count("table"), 1);
    assert_eq!(document.count("callout"), 2);
    assert!(!temp_dir.path().join("验证报告.docx").exists());

    let json = serde_json::to_value(&document)?;
    assert_eq!(json["blocks"][0]["type"], "heading");

    Ok(())
}

#[tokio::test]
async fn test_missing_report_is_input_error() {
    let temp_dir = TempDir::new().unwrap();
    let engine = engine_in(&temp_dir, ConversionConfig::for_input("验证报告.md"));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ConversionError::InputNotFound { ref path } if path == "验证报告.md"));
    assert!(err.user_friendly_message().contains("验证报告.md"));
    assert!(!temp_dir.path().join("验证报告.docx").exists());
}

#[tokio::test]
async fn test_gbk_encoded_report_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    // "验证" 的 GBK 編碼
    std::fs::write(temp_dir.path().join("验证报告.md"), [0xd1, 0xe9, 0xd6, 0xa4]).unwrap();

    let engine = engine_in(&temp_dir, ConversionConfig::for_input("验证报告.md"));
    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ConversionError::EncodingError { .. }));
}

#[tokio::test]
async fn test_empty_report_still_produces_document() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("empty.md"), "\n\n   \n")?;

    let engine = engine_in(&temp_dir, ConversionConfig::for_input("empty.md"));
    let output_path = engine.run().await?;

    let document = read_part(&temp_dir.path().join(output_path), "word/document.xml");
    assert!(document.contains("<w:body><w:sectPr>"));

    Ok(())
}

#[tokio::test]
async fn test_style_file_drives_rendering() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("report.md"),
        "# 标题\n❌ 失败项\n✅ 通过项\n| a | b |\n|---|---|",
    )?;

    let style_path = temp_dir.path().join("report-docx.toml");
    std::fs::write(
        &style_path,
        r#"
[document]
font = "Arial"
east_asia_font = "微软雅黑"
author = "${REPORT_DOCX_TEST_UNSET_AUTHOR}"
page_size = "letter"

[headings]
h1_size = 22.0
h1_centered = false

[table]
style = "Table Grid"

[[markers]]
symbol = "❌"
color = "C00000"
"#,
    )?;

    let style = StyleConfig::from_file(&style_path)?;
    assert_eq!(style.marker_symbols(), vec!["❌".to_string()]);

    let config = ConversionConfig::new(
        "report.md".to_string(),
        "out/report.docx".to_string(),
        style,
    );
    let engine = engine_in(&temp_dir, config);
    let output_path = engine.run().await?;
    assert_eq!(output_path, "out/report.docx");

    let full_path = temp_dir.path().join("out/report.docx");
    let document = read_part(&full_path, "word/document.xml");
    assert!(document.contains("<w:color w:val=\"C00000\"/>"));
    assert!(!document.contains("008000"));
    assert!(document.contains("<w:tblStyle w:val=\"TableGrid\"/>"));
    assert!(document.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));

    let styles = read_part(&full_path, "word/styles.xml");
    assert!(styles.contains("w:eastAsia=\"微软雅黑\""));
    assert!(styles.contains("<w:sz w:val=\"44\"/>"));

    // 未定義的環境變數保留原文
    let core = read_part(&full_path, "docProps/core.xml");
    assert!(core.contains("${REPORT_DOCX_TEST_UNSET_AUTHOR}"));

    Ok(())
}

#[tokio::test]
async fn test_pipeline_phases_can_run_individually() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("验证报告.md"), "1. 第一\n2. 第二\n> 备注")?;

    let engine = engine_in(&temp_dir, ConversionConfig::for_input("验证报告.md"));
    let pipeline = engine.pipeline();

    let source = pipeline.extract().await?;
    let document = pipeline.transform(source).await?;
    assert!(matches!(document.blocks[0], Block::ListItem { ordered: true, .. }));
    assert!(matches!(document.blocks[2], Block::Quote { .. }));

    let output_path = pipeline.load(document).await?;
    let numbering = read_part(&temp_dir.path().join(output_path), "word/numbering.xml");
    assert!(numbering.contains("<w:startOverride w:val=\"1\"/>"));

    Ok(())
}
