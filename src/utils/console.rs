//! 終端機輸出的固定訊息

use crate::utils::error::ConversionError;

pub fn success_message(output_path: &str) -> String {
    format!("✅ Word 文档已生成: {}", output_path)
}

/// 錯誤訊息與建議，各占一行
pub fn failure_message(error: &ConversionError) -> String {
    format!(
        "❌ 错误: {}\n💡 建議: {}",
        error.user_friendly_message(),
        error.recovery_suggestion()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_message() {
        assert_eq!(
            success_message("验证报告.docx"),
            "✅ Word 文档已生成: 验证报告.docx"
        );
    }

    #[test]
    fn test_failure_message_has_error_and_suggestion() {
        let err = ConversionError::InputNotFound {
            path: "验证报告.md".to_string(),
        };
        let message = failure_message(&err);
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "❌ 错误: 找不到輸入檔案: 验证报告.md");
        assert!(lines[1].starts_with("💡 建議: "));
        assert!(lines[1].contains("验证报告.md"));
    }
}
