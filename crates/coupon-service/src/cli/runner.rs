//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。
//! 一次性子命令在进程内的种子数据上运行，结果以 JSON 输出到标准输出。

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use coupon_shared::config::AppConfig;

use crate::models::{AnalyticsReport, CouponRule};
use crate::routes::{build_router, cors_layer};
use crate::service::{CouponCheck, RedemptionReceipt};
use crate::state::AppState;

/// 命令执行器
///
/// 持有加载完成的配置和共享状态，作为 CLI 与服务层之间的桥梁。
pub struct CommandRunner {
    config: AppConfig,
    state: AppState,
}

impl CommandRunner {
    /// 按配置的种子开关创建执行器
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::from_seed_flag(config.seed.enabled);
        Self { config, state }
    }

    /// 执行 server 命令
    ///
    /// `port` 覆盖配置端口；`no_seed` 为 true 时以空集合启动
    pub async fn run_server(mut self, port: Option<u16>, no_seed: bool) -> Result<()> {
        if let Some(port) = port {
            self.config.server.port = port;
        }
        if no_seed {
            self.state = AppState::from_seed_flag(false);
        }

        let addr = self.config.server_addr();
        info!(addr = %addr, seeded = !no_seed && self.config.seed.enabled, "启动优惠券服务");

        let cors = cors_layer(&self.config.cors, self.config.is_production());
        let app = build_router(self.state, cors);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("绑定地址失败: {}", addr))?;

        info!("优惠券服务已启动: http://{}", addr);
        info!("可用端点:");
        info!("  GET /health, /ready - 健康检查");
        info!("  GET /api/coupons, /api/coupons/{{code}} - 优惠券查询");
        info!("  POST /api/coupons/validate, /api/coupons/redeem - 核验与核销");
        info!("  GET /api/stores, /api/stores/token/{{token}} - 门店查询");
        info!("  GET/POST /api/rules, PATCH /api/rules/{{id}}/toggle - 规则管理");
        info!("  GET /api/analytics - 核销统计");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("优惠券服务已停止");
        Ok(())
    }

    /// 核验优惠券
    pub async fn validate(&self, code: &str, token: &str) -> Result<CouponCheck> {
        let check = self.state.redemptions.validate_coupon(code, token).await?;
        Ok(check)
    }

    /// 核验通过后在令牌对应门店核销
    pub async fn redeem(&self, code: &str, token: &str) -> Result<RedemptionReceipt> {
        let check = self.validate(code, token).await?.into_result()?;
        let receipt = self
            .state
            .redemptions
            .redeem(&check.coupon.code, &check.store.id)
            .await?;
        Ok(receipt)
    }

    pub async fn analytics(&self) -> Result<AnalyticsReport> {
        Ok(self.state.analytics.get_analytics().await?)
    }

    pub async fn rules(&self) -> Result<Vec<CouponRule>> {
        Ok(self.state.rules.list_rules().await?)
    }

    pub async fn run_validate(&self, code: &str, token: &str) -> Result<()> {
        print_json(&self.validate(code, token).await?)
    }

    pub async fn run_redeem(&self, code: &str, token: &str) -> Result<()> {
        print_json(&self.redeem(code, token).await?)
    }

    pub async fn run_analytics(&self) -> Result<()> {
        print_json(&self.analytics().await?)
    }

    pub async fn run_rules(&self) -> Result<()> {
        print_json(&self.rules().await?)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("序列化输出失败")?;
    println!("{}", json);
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，正在停止服务..."),
        _ = terminate => info!("收到 SIGTERM，正在停止服务..."),
    }
}
