//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::ObservabilityConfig;

/// Metrics 资源守卫
pub struct MetricsHandle {
    server_handle: tokio::task::JoinHandle<()>,
}

impl Drop for MetricsHandle {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(&config.service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle { server_handle })
}

/// 注册通用指标描述
///
/// 这些描述会出现在 /metrics 端点的 HELP 注释中
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "coupon_redemptions_total",
        "Total number of coupon redemption attempts"
    );
    metrics::describe_histogram!(
        "coupon_redemption_duration_seconds",
        "Coupon redemption duration in seconds"
    );

    metrics::describe_counter!(
        "coupon_validations_total",
        "Total number of coupon validation attempts"
    );

    metrics::describe_counter!(
        "coupon_rules_changed_total",
        "Total number of coupon rule creations and toggles"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录 HTTP 请求
///
/// `route` 为路由模板，取值有限，避免标签基数随路径参数增长
#[inline]
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录优惠券核销
///
/// status 为 "success" 或错误码
#[inline]
pub fn record_redemption(status: &str, duration_secs: f64) {
    metrics::counter!(
        "coupon_redemptions_total",
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "coupon_redemption_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration_secs);
}

/// 记录优惠券校验
#[inline]
pub fn record_validation(status: &str) {
    metrics::counter!(
        "coupon_validations_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录规则变更（create / toggle）
#[inline]
pub fn record_rule_change(action: &str) {
    metrics::counter!(
        "coupon_rules_changed_total",
        "action" => action.to_string()
    )
    .increment(1);
}
