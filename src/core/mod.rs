pub mod client;
pub mod health;
pub mod request;
pub mod retry;

pub use crate::utils::error::{ApiError, RequestError};
pub use client::ApiClient;
pub use request::RequestOptions;
pub use retry::RetryPolicy;
