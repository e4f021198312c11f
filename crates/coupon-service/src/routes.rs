//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射以及全局中间件

use axum::{
    Router, middleware,
    http::HeaderValue,
    routing::{get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use coupon_shared::config::CorsConfig;
use coupon_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 优惠券核验与核销路由
fn coupon_routes() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(handlers::coupon::list_coupons))
        .route("/coupons/validate", post(handlers::coupon::validate_coupon))
        .route("/coupons/redeem", post(handlers::coupon::redeem_coupon))
        .route("/coupons/{code}", get(handlers::coupon::get_coupon))
}

/// 合作门店路由
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(handlers::store::list_stores))
        .route(
            "/stores/token/{token}",
            get(handlers::store::get_store_by_token),
        )
}

/// 发放规则路由
fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(handlers::rule::list_rules))
        .route("/rules", post(handlers::rule::create_rule))
        .route("/rules/{id}", get(handlers::rule::get_rule))
        .route("/rules/{id}/toggle", patch(handlers::rule::toggle_rule))
}

/// 统计路由
fn analytics_routes() -> Router<AppState> {
    Router::new().route("/analytics", get(handlers::analytics::get_analytics))
}

/// 构建完整的 API 路由（不含前缀，由 `build_router` 挂载到 /api）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(coupon_routes())
        .merge(store_routes())
        .merge(rule_routes())
        .merge(analytics_routes())
}

/// 根据配置构建 CORS 层
pub fn cors_layer(config: &CorsConfig, production: bool) -> CorsLayer {
    if config.allows_any() {
        if production {
            warn!("cors.allowed_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .origins()
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();
    info!("CORS allowed_origins: {}", config.allowed_origins);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 组装应用路由与中间件
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

