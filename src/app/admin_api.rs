use crate::config::{AppConfig, ServiceConfig};
use crate::core::client::ApiClient;
use crate::domain::model::{MutationAck, NewOrganization, Organization, VendorApplication};
use serde_json::json;

/// 服務無法連線時使用的組織資料
pub fn mock_organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: "1".to_string(),
            name: "Acme Vendors Inc".to_string(),
            status: "active".to_string(),
            vendor_count: 12,
            product_count: 145,
            monthly_revenue: "$12,450".to_string(),
        },
        Organization {
            id: "2".to_string(),
            name: "Global Marketplace Co".to_string(),
            status: "pending".to_string(),
            vendor_count: 8,
            product_count: 89,
            monthly_revenue: "$8,720".to_string(),
        },
        Organization {
            id: "3".to_string(),
            name: "Tech Partners Ltd".to_string(),
            status: "active".to_string(),
            vendor_count: 15,
            product_count: 203,
            monthly_revenue: "$18,900".to_string(),
        },
    ]
}

pub fn mock_vendor_applications() -> Vec<VendorApplication> {
    vec![
        VendorApplication {
            id: "1".to_string(),
            vendor_name: "Tech Gadgets Pro".to_string(),
            org_id: "1".to_string(),
            applied_date: "2024-09-01".to_string(),
            status: "pending".to_string(),
            email: "contact@techgadgets.com".to_string(),
        },
        VendorApplication {
            id: "2".to_string(),
            vendor_name: "Home Decor Plus".to_string(),
            org_id: "2".to_string(),
            applied_date: "2024-09-05".to_string(),
            status: "pending".to_string(),
            email: "info@homedecor.com".to_string(),
        },
    ]
}

/// Admin 服務：組織與供應商申請
#[derive(Debug, Clone)]
pub struct AdminAppApi {
    client: ApiClient,
    service: ServiceConfig,
}

impl AdminAppApi {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(ApiClient::new(), config.admin_app.clone())
    }

    pub fn with_client(client: ApiClient, service: ServiceConfig) -> Self {
        Self { client, service }
    }

    pub fn base_url(&self) -> &str {
        &self.service.base_url
    }

    pub async fn get_organizations(&self) -> Vec<Organization> {
        let url = self.service.endpoint("/api/organizations");
        match self.client.get::<Option<Vec<Organization>>>(&url).await {
            Ok(Some(organizations)) => organizations,
            _ => {
                tracing::warn!("📦 Admin app unavailable, serving mock organizations");
                mock_organizations()
            }
        }
    }

    pub async fn get_organization(&self, id: &str) -> Option<Organization> {
        let url = self.service.endpoint(&format!("/api/organizations/{}", id));
        let remote = self.client.get::<Option<Organization>>(&url).await.ok().flatten();
        remote.or_else(|| mock_organizations().into_iter().find(|org| org.id == id))
    }

    pub async fn get_vendor_applications(&self) -> Vec<VendorApplication> {
        let url = self.service.endpoint("/api/vendor-applications");
        match self.client.get::<Option<Vec<VendorApplication>>>(&url).await {
            Ok(Some(applications)) => applications,
            _ => {
                tracing::warn!("📦 Admin app unavailable, serving mock vendor applications");
                mock_vendor_applications()
            }
        }
    }

    pub async fn approve_vendor(&self, vendor_id: &str) -> MutationAck {
        let url = self
            .service
            .endpoint(&format!("/api/vendors/{}/approve", vendor_id));
        self.mutate(&url, &json!({})).await
    }

    pub async fn reject_vendor(&self, vendor_id: &str, reason: &str) -> MutationAck {
        let url = self
            .service
            .endpoint(&format!("/api/vendors/{}/reject", vendor_id));
        self.mutate(&url, &json!({ "reason": reason })).await
    }

    /// 建立組織。失敗時回傳 `None`，不會捏造一筆新組織。
    pub async fn create_organization(&self, draft: &NewOrganization) -> Option<Organization> {
        let url = self.service.endpoint("/api/organizations");
        match self.client.post::<Option<Organization>, _>(&url, draft).await {
            Ok(organization) => organization,
            Err(e) => {
                tracing::error!("❌ Failed to create organization: {}", e);
                None
            }
        }
    }

    async fn mutate(&self, url: &str, body: &serde_json::Value) -> MutationAck {
        match self.client.post::<Option<MutationAck>, _>(url, body).await {
            Ok(Some(ack)) => ack,
            _ => {
                tracing::warn!("⚠️ {} unreachable, reporting optimistic success", url);
                MutationAck::optimistic()
            }
        }
    }
}

pub fn create_admin_app_api(config: &AppConfig) -> AdminAppApi {
    AdminAppApi::new(config)
}
