#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{PartnerError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENVIRONMENT_VAR: &str = "NODE_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 只有完全等於 "development" 才算開發環境，其他值 (包含未設定) 一律視為正式環境
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Admin,
    Market,
    Buyer,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Admin, ServiceKind::Market, ServiceKind::Buyer];

    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceKind::Admin => "ADMIN_APP_URL",
            ServiceKind::Market => "MARKET_APP_URL",
            ServiceKind::Buyer => "BUYER_APP_URL",
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            ServiceKind::Admin => 3001,
            ServiceKind::Market => 3002,
            ServiceKind::Buyer => 3003,
        }
    }

    pub fn development_url(&self) -> String {
        format!("http://localhost:{}", self.port())
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceKind::Admin => "admin-app",
            ServiceKind::Market => "market-app",
            ServiceKind::Buyer => "buyer-app",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, port: u16) -> Self {
        Self {
            base_url: base_url.into(),
            port,
        }
    }

    /// 組出 `{base_url}{path}`，避免重複的斜線
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// 三個子服務的位置。程式啟動時建立一次，之後以參考傳給各個 facade。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub admin_app: ServiceConfig,
    pub market_app: ServiceConfig,
    pub buyer_app: ServiceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl AppConfig {
    /// 從行程環境變數解析設定
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 以自訂的查詢函式解析設定，測試時不必修改真正的環境變數
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_value(lookup(ENVIRONMENT_VAR).as_deref());
        let resolve = |kind: ServiceKind| {
            let base_url = if environment.is_development() {
                kind.development_url()
            } else {
                lookup(kind.env_var()).unwrap_or_default()
            };
            ServiceConfig::new(base_url, kind.port())
        };

        Self {
            environment,
            admin_app: resolve(ServiceKind::Admin),
            market_app: resolve(ServiceKind::Market),
            buyer_app: resolve(ServiceKind::Buyer),
        }
    }

    /// 全部指向本機開發埠
    pub fn development() -> Self {
        Self::from_lookup(|name| (name == ENVIRONMENT_VAR).then(|| "development".to_string()))
    }

    pub fn service(&self, kind: ServiceKind) -> &ServiceConfig {
        match kind {
            ServiceKind::Admin => &self.admin_app,
            ServiceKind::Market => &self.market_app,
            ServiceKind::Buyer => &self.buyer_app,
        }
    }

    pub fn service_mut(&mut self, kind: ServiceKind) -> &mut ServiceConfig {
        match kind {
            ServiceKind::Admin => &mut self.admin_app,
            ServiceKind::Market => &mut self.market_app,
            ServiceKind::Buyer => &mut self.buyer_app,
        }
    }

    /// 檢查正式環境必要的服務網址，開發環境直接通過
    pub fn validate_config(&self) -> ConfigValidation {
        if self.environment.is_development() {
            return ConfigValidation {
                valid: true,
                errors: Vec::new(),
            };
        }

        let mut errors = Vec::new();
        for kind in ServiceKind::ALL {
            let base_url = &self.service(kind).base_url;
            if base_url.is_empty() {
                errors.push(format!("{} is required in production", kind.env_var()));
            } else if let Err(PartnerError::InvalidConfigValueError { reason, .. }) =
                validate_url(kind.env_var(), base_url)
            {
                errors.push(format!("{} is not a valid URL: {}", kind.env_var(), reason));
            }
        }

        ConfigValidation {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let validation = self.validate_config();
        if validation.valid {
            Ok(())
        } else {
            Err(PartnerError::ConfigValidationError {
                errors: validation.errors,
            })
        }
    }
}
