use clap::Parser;
use partner_app_utils::config::cli::Command;
use partner_app_utils::config::toml_config::TomlConfig;
use partner_app_utils::utils::{logger, validation::Validate};
use partner_app_utils::{
    check_all_apps_health, get_health_summary, AdminAppApi, ApiClient, AppConfig, BuyerAppApi,
    CliConfig, MarketAppApi, PartnerError,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<(), PartnerError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(cli: &CliConfig) -> Result<(AppConfig, ApiClient), PartnerError> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📄 Loading configuration from {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate_request()?;
            let client = ApiClient::with_defaults(file.request_options()?)
                .health_timeout(file.health_timeout());
            Ok((file.app_config(), client))
        }
        None => Ok((AppConfig::from_env(), ApiClient::new())),
    }
}

async fn run(cli: CliConfig, config: AppConfig, client: ApiClient) -> Result<(), PartnerError> {
    let admin = AdminAppApi::with_client(client.clone(), config.admin_app.clone());
    let market = MarketAppApi::with_client(client.clone(), config.market_app.clone());
    let buyer = BuyerAppApi::with_client(client.clone(), config.buyer_app.clone());

    match cli.command {
        Command::Validate => {
            let validation = config.validate_config();
            print_json(&validation)?;
            if validation.valid {
                Ok(())
            } else {
                Err(PartnerError::ConfigValidationError {
                    errors: validation.errors,
                })
            }
        }
        Command::Health => print_json(&check_all_apps_health(&client, &config).await),
        Command::Summary => print_json(&get_health_summary(&client, &config).await),
        Command::Organizations => print_json(&admin.get_organizations().await),
        Command::Organization { id } => print_json(&admin.get_organization(&id).await),
        Command::VendorApplications => print_json(&admin.get_vendor_applications().await),
        Command::Vendors => print_json(&market.get_vendors().await),
        Command::Vendor { id } => print_json(&market.get_vendor(&id).await),
        Command::VendorAnalytics { id } => print_json(&market.get_vendor_analytics(&id).await),
        Command::Products => print_json(&market.get_products().await),
        Command::Product { id } => print_json(&market.get_product(&id).await),
        Command::Buyers => print_json(&buyer.get_buyers().await),
        Command::Buyer { id } => print_json(&buyer.get_buyer(&id).await),
        Command::BuyerOrders { id } => print_json(&buyer.get_buyer_orders(&id).await),
        Command::BuyerAnalytics { id } => print_json(&buyer.get_buyer_analytics(&id).await),
        Command::Orders => print_json(&buyer.get_orders().await),
        Command::Order { id } => print_json(&buyer.get_order(&id).await),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting partner-app-utils CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let (config, client) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 驗證配置 (validate 指令自行輸出結果)
    let validate_only = matches!(cli.command, Command::Validate);
    if let (false, Err(e)) = (validate_only, config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli, config, client).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    Ok(())
}
