//! 健康检查
//!
//! 数据全部在内存中，进程存活即可服务，两个探针返回相同结果。

use axum::Json;

use crate::dto::HealthResponse;

pub const SERVICE_NAME: &str = "coupon-service";

/// 存活探针
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// 就绪探针
///
/// GET /ready
pub async fn readiness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        service: SERVICE_NAME,
    })
}
