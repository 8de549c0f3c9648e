use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML writing failed: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Input file {path} is not valid UTF-8: {message}")]
    EncodingError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序退出碼：輸入或設定錯誤 1，可重試的 I/O 錯誤 2，產生文件失敗 3
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ConversionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConversionError::ConfigValidationError { .. }
            | ConversionError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ConversionError::InputNotFound { .. } | ConversionError::EncodingError { .. } => {
                ErrorCategory::Input
            }
            ConversionError::XmlError(_) | ConversionError::SerializationError(_) => {
                ErrorCategory::Rendering
            }
            ConversionError::ZipError(_) | ConversionError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::Critical,
            ErrorCategory::System => match self {
                // 權限或磁碟空間問題，修正後重試即可
                ConversionError::IoError(_) => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConversionError::InputNotFound { path } => format!(
                "確認 {} 位於目前工作目錄，或以參數指定 Markdown 檔案路徑",
                path
            ),
            ConversionError::EncodingError { .. } => {
                "請將 Markdown 檔案另存為 UTF-8 編碼後再試".to_string()
            }
            ConversionError::ConfigValidationError { field, .. }
            | ConversionError::InvalidConfigValueError { field, .. } => {
                format!("檢查樣式設定檔中的 {} 欄位", field)
            }
            ConversionError::IoError(_) => {
                "確認輸出目錄存在且可寫入，且 Word 沒有開啟同名文件".to_string()
            }
            ConversionError::ZipError(_)
            | ConversionError::XmlError(_)
            | ConversionError::SerializationError(_) => {
                "以 --verbose 重新執行並回報完整日誌".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConversionError::InputNotFound { path } => format!("找不到輸入檔案: {}", path),
            ConversionError::EncodingError { path, .. } => {
                format!("輸入檔案不是 UTF-8 編碼: {}", path)
            }
            ConversionError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
