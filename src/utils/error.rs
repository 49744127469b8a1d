use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartnerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed: {}", .errors.join("; "))]
    ConfigValidationError { errors: Vec<String> },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PartnerError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PartnerError::ConfigValidationError { errors } => {
                format!("設定檢查失敗 ({} 項): {}", errors.len(), errors.join(", "))
            }
            PartnerError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 {} 不正確: {}", field, reason)
            }
            PartnerError::ConfigError { message } => format!("設定錯誤: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PartnerError::ConfigValidationError { .. } => {
                "Set ADMIN_APP_URL, MARKET_APP_URL and BUYER_APP_URL, or run with NODE_ENV=development"
            }
            PartnerError::InvalidConfigValueError { .. } | PartnerError::ConfigError { .. } => {
                "Check the configuration file and environment variables"
            }
            PartnerError::IoError(_) => "Check that the file exists and is readable",
            _ => "Check that the partner services are reachable",
        }
    }
}

/// 單次請求失敗的原因。重試層只看得到「失敗」，這裡保留細節供日誌使用。
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    #[error("invalid JSON body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RequestError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// API client 層的錯誤；facade 會把它收斂成「沒有資料」。
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("all {attempts} attempts to {url} failed, last error: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: RequestError,
    },
}

impl ApiError {
    pub fn attempts(&self) -> u32 {
        match self {
            ApiError::Encode(_) => 0,
            ApiError::Exhausted { attempts, .. } => *attempts,
        }
    }
}

pub type Result<T> = std::result::Result<T, PartnerError>;
