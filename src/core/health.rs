use crate::config::{AppConfig, ServiceKind};
use crate::core::client::ApiClient;
use crate::domain::model::{HealthCheckResult, HealthSummary};
use tokio::task::JoinHandle;

fn spawn_check(client: &ApiClient, config: &AppConfig, kind: ServiceKind) -> JoinHandle<bool> {
    let client = client.clone();
    let base_url = config.service(kind).base_url.clone();
    tokio::spawn(async move { client.check_health(&base_url).await })
}

fn settle(kind: ServiceKind, outcome: Result<bool, tokio::task::JoinError>) -> bool {
    match outcome {
        Ok(healthy) => {
            if !healthy {
                tracing::warn!("🩺 {} is unhealthy", kind);
            }
            healthy
        }
        Err(e) => {
            tracing::error!("🩺 {} health check aborted: {}", kind, e);
            false
        }
    }
}

/// 同時探測三個子服務，等所有探測都結束後才彙整結果。
/// 每個探測是獨立的 task，其中一個失敗或 panic 不影響其他服務的結果。
pub async fn check_all_apps_health(client: &ApiClient, config: &AppConfig) -> HealthCheckResult {
    let admin = spawn_check(client, config, ServiceKind::Admin);
    let market = spawn_check(client, config, ServiceKind::Market);
    let buyer = spawn_check(client, config, ServiceKind::Buyer);

    let (admin, market, buyer) = tokio::join!(admin, market, buyer);

    let result = HealthCheckResult {
        admin_app: settle(ServiceKind::Admin, admin),
        market_app: settle(ServiceKind::Market, market),
        buyer_app: settle(ServiceKind::Buyer, buyer),
    };
    tracing::debug!("🩺 Health check result: {:?}", result);
    result
}

pub async fn are_all_apps_healthy(client: &ApiClient, config: &AppConfig) -> bool {
    check_all_apps_health(client, config).await.all_healthy()
}

pub async fn get_health_summary(client: &ApiClient, config: &AppConfig) -> HealthSummary {
    let details = check_all_apps_health(client, config).await;
    let total = ServiceKind::ALL.len();
    let healthy = details.healthy_count();

    HealthSummary {
        healthy,
        unhealthy: total - healthy,
        total,
        details,
        checked_at: chrono::Utc::now(),
    }
}
