//! 优惠券服务 CLI
//!
//! 加载配置、初始化可观测性后分派子命令。

use clap::Parser;
use tracing::warn;

use coupon_service::cli::{Cli, CommandRunner, Commands};
use coupon_shared::config::AppConfig;
use coupon_shared::observability;

const SERVICE_NAME: &str = "coupon-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 配置缺失或格式错误时退回默认值，保证演示环境开箱即用
    let (config, config_error) = match AppConfig::load(SERVICE_NAME) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let obs_config = config
        .observability
        .clone()
        .with_service_name(SERVICE_NAME)
        .with_log_level(cli.log_level.clone());
    let _guard = observability::init(&obs_config).await?;

    if let Some(e) = config_error {
        warn!(error = %e, "加载配置失败，使用默认配置");
    }

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Server { port, no_seed } => runner.run_server(port, no_seed).await?,
        Commands::Validate { code, token } => runner.run_validate(&code, &token).await?,
        Commands::Redeem { code, token } => runner.run_redeem(&code, &token).await?,
        Commands::Analytics => runner.run_analytics().await?,
        Commands::Rules => runner.run_rules().await?,
    }

    Ok(())
}
