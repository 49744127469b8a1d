use crate::domain::model::ApiErrorResponse;
use reqwest::StatusCode;
use serde::Serialize;

pub const SERVICE_UNAVAILABLE_ERROR: &str = "Service temporarily unavailable";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Using cached data";

/// 路由層回給 UI 的降級回應：狀態碼加上固定內容的 JSON body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    #[serde(skip)]
    pub status: StatusCode,
    #[serde(flatten)]
    pub body: ApiErrorResponse,
}

impl ErrorEnvelope {
    pub fn service_unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: ApiErrorResponse {
                error: SERVICE_UNAVAILABLE_ERROR.to_string(),
                message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
            },
        }
    }
}

/// 把任何錯誤轉成 503 + 固定訊息，並記錄原始錯誤
pub fn handle_api_error(error: &(dyn std::error::Error + 'static)) -> ErrorEnvelope {
    tracing::error!("❌ API Error: {}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        tracing::debug!("   caused by: {}", cause);
        source = cause.source();
    }

    ErrorEnvelope::service_unavailable()
}
