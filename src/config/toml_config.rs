use crate::config::{AppConfig, Environment, ServiceKind, ENVIRONMENT_VAR};
use crate::core::client::HEALTH_CHECK_TIMEOUT;
use crate::core::request::RequestOptions;
use crate::utils::error::{PartnerError, Result};
use crate::utils::validation::validate_range;
use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub environment: Option<Environment>,
    pub services: Option<ServicesConfig>,
    pub request: Option<RequestConfig>,
    pub health: Option<HealthConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub admin: Option<ServiceEntry>,
    pub market: Option<ServiceEntry>,
    pub buyer: Option<ServiceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub base_url: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthConfig {
    pub timeout_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PartnerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PartnerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADMIN_APP_URL})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PartnerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn service_entry(&self, kind: ServiceKind) -> Option<&ServiceEntry> {
        let services = self.services.as_ref()?;
        match kind {
            ServiceKind::Admin => services.admin.as_ref(),
            ServiceKind::Market => services.market.as_ref(),
            ServiceKind::Buyer => services.buyer.as_ref(),
        }
    }

    /// 以行程環境變數為底，再套用檔案中的設定。
    /// 開發環境固定使用 localhost，`[services.*]` 的網址不會生效。
    pub fn app_config(&self) -> AppConfig {
        self.app_config_with(|name| std::env::var(name).ok())
    }

    pub fn app_config_with<F>(&self, lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = self.environment;
        let mut config = AppConfig::from_lookup(|name| match (name, environment) {
            (ENVIRONMENT_VAR, Some(Environment::Development)) => Some("development".to_string()),
            (ENVIRONMENT_VAR, Some(Environment::Production)) => Some("production".to_string()),
            _ => lookup(name),
        });

        if config.environment.is_development() {
            return config;
        }

        for kind in ServiceKind::ALL {
            if let Some(entry) = self.service_entry(kind) {
                let service = config.service_mut(kind);
                service.base_url = entry.base_url.clone();
                if let Some(port) = entry.port {
                    service.port = port;
                }
            }
        }

        config
    }

    /// 請求預設值；未設定的欄位沿用內建預設
    pub fn request_options(&self) -> Result<RequestOptions> {
        let mut options = RequestOptions::default();
        let Some(request) = &self.request else {
            return Ok(options);
        };

        if let Some(timeout_ms) = request.timeout_ms {
            options = options.timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(max_retries) = request.max_retries {
            options = options.max_retries(max_retries);
        }
        if let Some(retry_delay_ms) = request.retry_delay_ms {
            options = options.retry_delay(Duration::from_millis(retry_delay_ms));
        }

        for (name, value) in request.headers.iter().flatten() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                PartnerError::InvalidConfigValueError {
                    field: "request.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                PartnerError::InvalidConfigValueError {
                    field: format!("request.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            options = options.header(header_name, header_value);
        }

        Ok(options)
    }

    /// 健康檢查的 timeout，未設定時為 3000ms
    pub fn health_timeout(&self) -> Duration {
        self.health
            .as_ref()
            .and_then(|health| health.timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(HEALTH_CHECK_TIMEOUT)
    }

    /// 驗證請求與健康檢查設定的合理性
    pub fn validate_request(&self) -> Result<()> {
        if let Some(request) = &self.request {
            if let Some(timeout_ms) = request.timeout_ms {
                validate_range("request.timeout_ms", timeout_ms, 1, 60_000)?;
            }
            if let Some(max_retries) = request.max_retries {
                validate_range("request.max_retries", max_retries, 0, 10)?;
            }
            if let Some(retry_delay_ms) = request.retry_delay_ms {
                validate_range("request.retry_delay_ms", retry_delay_ms, 0, 60_000)?;
            }
        }
        if let Some(timeout_ms) = self.health.as_ref().and_then(|health| health.timeout_ms) {
            validate_range("health.timeout_ms", timeout_ms, 1, 60_000)?;
        }

        self.request_options().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
environment = "production"

[services.admin]
base_url = "https://admin.example.com"

[services.market]
base_url = "https://market.example.com"
port = 8443

[services.buyer]
base_url = "https://buyer.example.com"

[request]
timeout_ms = 2500
max_retries = 4
retry_delay_ms = 250

[request.headers]
X-Partner-Id = "partner-42"

[health]
timeout_ms = 1500
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let app = config.app_config_with(no_env);

        assert_eq!(app.environment, Environment::Production);
        assert_eq!(app.admin_app.base_url, "https://admin.example.com");
        assert_eq!(app.admin_app.port, 3001);
        assert_eq!(app.market_app.port, 8443);
        assert!(app.validate_config().valid);

        let options = config.request_options().unwrap();
        assert_eq!(options.timeout, Duration::from_millis(2500));
        assert_eq!(options.max_retries, 4);
        assert_eq!(options.retry_delay, Duration::from_millis(250));
        assert_eq!(options.headers["x-partner-id"], "partner-42");
        assert_eq!(config.health_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let options = config.request_options().unwrap();

        assert_eq!(options.timeout, Duration::from_millis(5000));
        assert_eq!(options.max_retries, 2);
        assert_eq!(options.retry_delay, Duration::from_millis(1000));
        assert_eq!(config.health_timeout(), Duration::from_millis(3000));
    }

    #[test]
    fn test_development_environment_from_file() {
        let config = TomlConfig::from_toml_str("environment = \"development\"").unwrap();
        let app = config.app_config_with(no_env);

        assert_eq!(app.environment, Environment::Development);
        assert_eq!(app.buyer_app.base_url, "http://localhost:3003");
    }

    #[test]
    fn test_development_ignores_service_overrides() {
        let config = TomlConfig::from_toml_str(
            r#"
environment = "development"

[services.admin]
base_url = "https://admin.example.com"
port = 9001
"#,
        )
        .unwrap();
        let app = config.app_config_with(no_env);

        assert_eq!(app.admin_app.base_url, "http://localhost:3001");
        assert_eq!(app.admin_app.port, 3001);
    }

    #[test]
    fn test_missing_services_fall_back_to_lookup() {
        let config = TomlConfig::from_toml_str(
            r#"
[services.admin]
base_url = "https://admin.example.com"
"#,
        )
        .unwrap();

        let app = config.app_config_with(|name| match name {
            "MARKET_APP_URL" => Some("https://market.internal".to_string()),
            _ => None,
        });

        assert_eq!(app.admin_app.base_url, "https://admin.example.com");
        assert_eq!(app.market_app.base_url, "https://market.internal");
        assert_eq!(app.buyer_app.base_url, "");
        assert_eq!(
            app.validate_config().errors,
            vec!["BUYER_APP_URL is required in production".to_string()]
        );
    }

    #[test]
    fn test_unresolved_env_var_is_kept() {
        let config = TomlConfig::from_toml_str(
            r#"
[services.admin]
base_url = "${PARTNER_APP_UTILS_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();

        let app = config.app_config_with(no_env);
        assert_eq!(app.admin_app.base_url, "${PARTNER_APP_UTILS_SURELY_UNSET_VAR}");
        assert!(!app.validate_config().valid);
    }

    #[test]
    fn test_validate_request_rejects_out_of_range() {
        let config = TomlConfig::from_toml_str("[request]\nmax_retries = 50\n").unwrap();
        assert!(config.validate_request().is_err());

        let config = TomlConfig::from_toml_str("[request]\ntimeout_ms = 0\n").unwrap();
        assert!(config.validate_request().is_err());

        let config = TomlConfig::from_toml_str("[health]\ntimeout_ms = 0\n").unwrap();
        assert!(config.validate_request().is_err());
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[request.headers]
"Bad Header" = "value"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.request_options(),
            Err(PartnerError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "environment = \"development\"").unwrap();
        writeln!(file, "[request]").unwrap();
        writeln!(file, "max_retries = 0").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.environment, Some(Environment::Development));
        assert_eq!(config.request_options().unwrap().max_retries, 0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("environment = ");
        assert!(matches!(result, Err(PartnerError::ConfigError { .. })));
    }
}
