use crate::utils::error::RequestError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// 單次呼叫的設定，未指定的欄位沿用預設值
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub headers: HeaderMap,
    pub method: Method,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            headers: HeaderMap::new(),
            method: Method::GET,
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// 預設 `Content-Type: application/json`，呼叫端指定的標頭會覆蓋預設值
    pub fn merged_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

/// 發出一次請求。整個嘗試 (連線、送出、讀取 body) 受 `options.timeout` 限制，
/// 逾時會丟棄進行中的請求。
pub async fn execute<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    options: &RequestOptions,
) -> Result<T, RequestError> {
    match tokio::time::timeout(options.timeout, send(client, url, options)).await {
        Ok(result) => result,
        Err(_) => Err(RequestError::Timeout(options.timeout)),
    }
}

async fn send<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    options: &RequestOptions,
) -> Result<T, RequestError> {
    let mut request = client
        .request(options.method.clone(), url)
        .headers(options.merged_headers());

    if let Some(body) = &options.body {
        request = request.body(body.to_string());
    }

    tracing::debug!("📡 {} {}", options.method, url);
    let response = request.send().await.map_err(RequestError::Transport)?;
    tracing::debug!("📡 Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(RequestError::Status(response.status()));
    }

    let bytes = response.bytes().await.map_err(RequestError::Transport)?;
    serde_json::from_slice(&bytes).map_err(RequestError::Decode)
}
