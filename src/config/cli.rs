use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "partner-app-utils")]
#[command(about = "Query the admin, market and buyer partner services")]
pub struct CliConfig {
    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check the service URLs required in production
    Validate,
    /// Check every service's /health endpoint
    Health,
    /// Healthy/unhealthy counts with details
    Summary,
    Organizations,
    Organization { id: String },
    VendorApplications,
    Vendors,
    Vendor { id: String },
    VendorAnalytics { id: String },
    Products,
    Product { id: String },
    Buyers,
    Buyer { id: String },
    BuyerOrders { id: String },
    BuyerAnalytics { id: String },
    Orders,
    Order { id: String },
}
