// 各子服務的 API facade。讀取失敗時改用內建假資料，不會把錯誤丟給呼叫端。

pub mod admin_api;
pub mod buyer_api;
pub mod market_api;

pub use admin_api::{create_admin_app_api, AdminAppApi};
pub use buyer_api::{create_buyer_app_api, BuyerAppApi};
pub use market_api::{create_market_app_api, MarketAppApi};
