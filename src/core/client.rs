use crate::core::request::{execute, RequestOptions};
use crate::core::retry::{with_retry, RetryPolicy};
use crate::utils::error::ApiError;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_millis(3000);

/// 呼叫子服務的共用 client：每次呼叫都帶 timeout，失敗時依設定重試。
/// 內部的 `reqwest::Client` 是共享連線池，clone 成本很低。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    defaults: RequestOptions,
    health_timeout: Duration,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::with_defaults(RequestOptions::default())
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: RequestOptions) -> Self {
        Self {
            http: Client::new(),
            defaults,
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    /// 覆寫健康檢查的 timeout (預設 3000ms)
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// 以此 client 的預設值為底的請求設定
    pub fn options(&self) -> RequestOptions {
        self.defaults.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.request(url, &self.defaults).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        with_retry(url, RetryPolicy::from(options), || {
            execute(&self.http, url, options)
        })
        .await
    }

    pub async fn post<T, B>(&self, url: &str, data: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::POST, url, data).await
    }

    pub async fn put<T, B>(&self, url: &str, data: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::PUT, url, data).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let options = self.options().method(Method::DELETE);
        self.request(url, &options).await
    }

    async fn send_with_body<T, B>(
        &self,
        method: Method,
        url: &str,
        data: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(data).map_err(ApiError::Encode)?;
        let options = self.options().method(method).body(body);
        self.request(url, &options).await
    }

    /// 探測 `{base_url}/health`：短 timeout、不重試。
    /// 任何失敗或 `null` body 都回傳 false
    pub async fn check_health(&self, base_url: &str) -> bool {
        let url = format!("{}/health", base_url.trim_end_matches('/'));
        let options = self
            .options()
            .timeout(self.health_timeout)
            .max_retries(0)
            .method(Method::GET);

        let result = self.request::<Option<serde_json::Value>>(&url, &options).await;
        matches!(result, Ok(Some(_)))
    }
}
