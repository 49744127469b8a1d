pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::{AdminAppApi, BuyerAppApi, MarketAppApi};
pub use config::{AppConfig, ConfigValidation, Environment, ServiceConfig, ServiceKind};
pub use core::health::{are_all_apps_healthy, check_all_apps_health, get_health_summary};
pub use core::{ApiClient, ApiError, RequestError, RequestOptions, RetryPolicy};
pub use domain::model::*;
pub use utils::envelope::{handle_api_error, ErrorEnvelope};
pub use utils::error::{PartnerError, Result};
