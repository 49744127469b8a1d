use crate::config::{AppConfig, ServiceConfig};
use crate::core::client::ApiClient;
use crate::domain::model::{MutationAck, Product, Vendor, VendorAnalytics};
use serde_json::json;

pub fn mock_vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: "1".to_string(),
            name: "Tech Solutions Pro".to_string(),
            email: "contact@techsolutions.com".to_string(),
            status: "active".to_string(),
            product_count: 24,
            total_sales: "$5,240".to_string(),
            join_date: "2024-08-15".to_string(),
        },
        Vendor {
            id: "2".to_string(),
            name: "Fashion Hub".to_string(),
            email: "info@fashionhub.com".to_string(),
            status: "active".to_string(),
            product_count: 18,
            total_sales: "$3,890".to_string(),
            join_date: "2024-08-20".to_string(),
        },
    ]
}

pub fn mock_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            title: "Wireless Bluetooth Headphones".to_string(),
            vendor: "Tech Solutions Pro".to_string(),
            status: "published".to_string(),
            price: "$89.99".to_string(),
            added_date: "2024-09-08".to_string(),
        },
        Product {
            id: "2".to_string(),
            title: "Smart Watch Series 5".to_string(),
            vendor: "Tech Solutions Pro".to_string(),
            status: "published".to_string(),
            price: "$199.99".to_string(),
            added_date: "2024-09-10".to_string(),
        },
        Product {
            id: "3".to_string(),
            title: "Designer Leather Handbag".to_string(),
            vendor: "Fashion Hub".to_string(),
            status: "pending".to_string(),
            price: "$149.99".to_string(),
            added_date: "2024-09-12".to_string(),
        },
    ]
}

/// Market 服務：供應商、商品審核與銷售統計
#[derive(Debug, Clone)]
pub struct MarketAppApi {
    client: ApiClient,
    service: ServiceConfig,
}

impl MarketAppApi {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(ApiClient::new(), config.market_app.clone())
    }

    pub fn with_client(client: ApiClient, service: ServiceConfig) -> Self {
        Self { client, service }
    }

    pub fn base_url(&self) -> &str {
        &self.service.base_url
    }

    pub async fn get_vendors(&self) -> Vec<Vendor> {
        let url = self.service.endpoint("/api/vendors");
        self.client
            .get::<Option<Vec<Vendor>>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("📦 Market app unavailable, serving mock vendors");
                mock_vendors()
            })
    }

    pub async fn get_vendor(&self, id: &str) -> Option<Vendor> {
        let url = self.service.endpoint(&format!("/api/vendors/{}", id));
        let remote = self.client.get::<Option<Vendor>>(&url).await.ok().flatten();
        remote.or_else(|| mock_vendors().into_iter().find(|vendor| vendor.id == id))
    }

    pub async fn get_products(&self) -> Vec<Product> {
        let url = self.service.endpoint("/api/products");
        self.client
            .get::<Option<Vec<Product>>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("📦 Market app unavailable, serving mock products");
                mock_products()
            })
    }

    pub async fn get_product(&self, id: &str) -> Option<Product> {
        let url = self.service.endpoint(&format!("/api/products/{}", id));
        let remote = self.client.get::<Option<Product>>(&url).await.ok().flatten();
        remote.or_else(|| mock_products().into_iter().find(|product| product.id == id))
    }

    pub async fn approve_product(&self, product_id: &str) -> MutationAck {
        let url = self
            .service
            .endpoint(&format!("/api/products/{}/approve", product_id));
        self.mutate(&url, &json!({})).await
    }

    pub async fn reject_product(&self, product_id: &str, reason: &str) -> MutationAck {
        let url = self
            .service
            .endpoint(&format!("/api/products/{}/reject", product_id));
        self.mutate(&url, &json!({ "reason": reason })).await
    }

    /// 取不到統計時回傳全為零的結果
    pub async fn get_vendor_analytics(&self, vendor_id: &str) -> VendorAnalytics {
        let url = self
            .service
            .endpoint(&format!("/api/vendors/{}/analytics", vendor_id));
        self.client
            .get::<Option<VendorAnalytics>>(&url)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    async fn mutate(&self, url: &str, body: &serde_json::Value) -> MutationAck {
        self.client
            .post::<Option<MutationAck>, _>(url, body)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                tracing::warn!("⚠️ {} unreachable, reporting optimistic success", url);
                MutationAck::optimistic()
            })
    }
}

pub fn create_market_app_api(config: &AppConfig) -> MarketAppApi {
    MarketAppApi::new(config)
}
