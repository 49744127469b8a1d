use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub status: String,
    pub vendor_count: u32,
    pub product_count: u32,
    pub monthly_revenue: String,
}

/// 建立組織時送出的欄位，全部可省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_revenue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorApplication {
    pub id: String,
    pub vendor_name: String,
    pub org_id: String,
    pub applied_date: String,
    pub status: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub product_count: u32,
    pub total_sales: String,
    pub join_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub vendor: String,
    pub status: String,
    pub price: String,
    pub added_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: String,
    pub total_orders: u32,
    pub total_spent: String,
    pub last_order: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_name: String,
    pub company: String,
    pub amount: String,
    pub status: String,
    pub order_date: String,
    pub items: u32,
}

/// 狀態變更類操作的回覆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationAck {
    pub success: bool,
}

impl MutationAck {
    pub fn optimistic() -> Self {
        Self { success: true }
    }
}

/// 供應商統計。遠端多出來的欄位原封不動保留在 `extra`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorAnalytics {
    pub total_sales: String,
    pub total_orders: u64,
    pub average_order_value: String,
    pub top_products: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for VendorAnalytics {
    fn default() -> Self {
        Self {
            total_sales: "$0".to_string(),
            total_orders: 0,
            average_order_value: "$0".to_string(),
            top_products: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerAnalytics {
    pub total_spent: String,
    pub total_orders: u64,
    pub average_order_value: String,
    pub last_order_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for BuyerAnalytics {
    fn default() -> Self {
        Self {
            total_spent: "$0".to_string(),
            total_orders: 0,
            average_order_value: "$0".to_string(),
            last_order_date: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub admin_app: bool,
    pub market_app: bool,
    pub buyer_app: bool,
}

impl HealthCheckResult {
    pub fn all_healthy(&self) -> bool {
        self.admin_app && self.market_app && self.buyer_app
    }

    pub fn healthy_count(&self) -> usize {
        [self.admin_app, self.market_app, self.buyer_app]
            .into_iter()
            .filter(|healthy| *healthy)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub healthy: usize,
    pub unhealthy: usize,
    pub total: usize,
    pub details: HealthCheckResult,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_uses_camel_case_fields() {
        let org: Organization = serde_json::from_value(serde_json::json!({
            "id": "7",
            "name": "Northwind",
            "status": "active",
            "vendorCount": 4,
            "productCount": 31,
            "monthlyRevenue": "$3,100"
        }))
        .unwrap();

        assert_eq!(org.vendor_count, 4);
        assert_eq!(org.monthly_revenue, "$3,100");
    }

    #[test]
    fn test_new_organization_skips_missing_fields() {
        let draft = NewOrganization {
            name: Some("Northwind".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Northwind" }));
    }

    #[test]
    fn test_vendor_analytics_keeps_unknown_fields() {
        let analytics: VendorAnalytics = serde_json::from_value(serde_json::json!({
            "totalSales": "$1,200",
            "conversionRate": 0.12
        }))
        .unwrap();

        assert_eq!(analytics.total_sales, "$1,200");
        assert_eq!(analytics.total_orders, 0);
        assert_eq!(analytics.average_order_value, "$0");
        assert_eq!(analytics.extra.get("conversionRate"), Some(&serde_json::json!(0.12)));
    }

    #[test]
    fn test_health_check_result_counts() {
        let result = HealthCheckResult {
            admin_app: false,
            market_app: true,
            buyer_app: true,
        };

        assert_eq!(result.healthy_count(), 2);
        assert!(!result.all_healthy());
    }
}
