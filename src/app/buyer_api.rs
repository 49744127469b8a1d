use crate::config::{AppConfig, ServiceConfig};
use crate::core::client::ApiClient;
use crate::domain::model::{Buyer, BuyerAnalytics, MutationAck, Order};
use serde_json::json;

pub fn mock_buyers() -> Vec<Buyer> {
    vec![
        Buyer {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            company: "ABC Corp".to_string(),
            status: "active".to_string(),
            total_orders: 12,
            total_spent: "$2,450".to_string(),
            last_order: "2024-09-05".to_string(),
        },
        Buyer {
            id: "2".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.j@techcorp.com".to_string(),
            company: "Tech Corp".to_string(),
            status: "active".to_string(),
            total_orders: 8,
            total_spent: "$1,890".to_string(),
            last_order: "2024-09-10".to_string(),
        },
    ]
}

pub fn mock_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD-001".to_string(),
            buyer_name: "John Smith".to_string(),
            company: "ABC Corp".to_string(),
            amount: "$145.50".to_string(),
            status: "delivered".to_string(),
            order_date: "2024-09-05".to_string(),
            items: 3,
        },
        Order {
            id: "ORD-002".to_string(),
            buyer_name: "Sarah Johnson".to_string(),
            company: "Tech Corp".to_string(),
            amount: "$299.99".to_string(),
            status: "processing".to_string(),
            order_date: "2024-09-10".to_string(),
            items: 2,
        },
        Order {
            id: "ORD-003".to_string(),
            buyer_name: "John Smith".to_string(),
            company: "ABC Corp".to_string(),
            amount: "$89.99".to_string(),
            status: "shipped".to_string(),
            order_date: "2024-09-12".to_string(),
            items: 1,
        },
    ]
}

/// 假資料中某位買家的訂單 (以買家名稱比對)
fn mock_orders_for(buyer_id: &str) -> Vec<Order> {
    let Some(buyer) = mock_buyers().into_iter().find(|buyer| buyer.id == buyer_id) else {
        return Vec::new();
    };

    mock_orders()
        .into_iter()
        .filter(|order| order.buyer_name == buyer.name)
        .collect()
}

/// Buyer 服務：買家、訂單與消費統計
#[derive(Debug, Clone)]
pub struct BuyerAppApi {
    client: ApiClient,
    service: ServiceConfig,
}

impl BuyerAppApi {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(ApiClient::new(), config.buyer_app.clone())
    }

    pub fn with_client(client: ApiClient, service: ServiceConfig) -> Self {
        Self { client, service }
    }

    pub fn base_url(&self) -> &str {
        &self.service.base_url
    }

    pub async fn get_buyers(&self) -> Vec<Buyer> {
        let url = self.service.endpoint("/api/buyers");
        self.client
            .get::<Option<Vec<Buyer>>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("📦 Buyer app unavailable, serving mock buyers");
                mock_buyers()
            })
    }

    pub async fn get_buyer(&self, id: &str) -> Option<Buyer> {
        let url = self.service.endpoint(&format!("/api/buyers/{}", id));
        let remote = self.client.get::<Option<Buyer>>(&url).await.ok().flatten();
        remote.or_else(|| mock_buyers().into_iter().find(|buyer| buyer.id == id))
    }

    pub async fn get_orders(&self) -> Vec<Order> {
        let url = self.service.endpoint("/api/orders");
        self.client
            .get::<Option<Vec<Order>>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("📦 Buyer app unavailable, serving mock orders");
                mock_orders()
            })
    }

    pub async fn get_order(&self, id: &str) -> Option<Order> {
        let url = self.service.endpoint(&format!("/api/orders/{}", id));
        let remote = self.client.get::<Option<Order>>(&url).await.ok().flatten();
        remote.or_else(|| mock_orders().into_iter().find(|order| order.id == id))
    }

    pub async fn get_buyer_orders(&self, buyer_id: &str) -> Vec<Order> {
        let url = self
            .service
            .endpoint(&format!("/api/buyers/{}/orders", buyer_id));
        self.client
            .get::<Option<Vec<Order>>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("📦 Buyer app unavailable, serving orders of buyer {}", buyer_id);
                mock_orders_for(buyer_id)
            })
    }

    pub async fn update_order_status(&self, order_id: &str, status: &str) -> MutationAck {
        let url = self
            .service
            .endpoint(&format!("/api/orders/{}/status", order_id));
        self.client
            .post::<Option<MutationAck>, _>(&url, &json!({ "status": status }))
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("⚠️ {} unreachable, reporting optimistic success", url);
                MutationAck::optimistic()
            })
    }

    pub async fn get_buyer_analytics(&self, buyer_id: &str) -> BuyerAnalytics {
        let url = self
            .service
            .endpoint(&format!("/api/buyers/{}/analytics", buyer_id));
        self.client
            .get::<Option<BuyerAnalytics>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

pub fn create_buyer_app_api(config: &AppConfig) -> BuyerAppApi {
    BuyerAppApi::new(config)
}
