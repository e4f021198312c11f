//! 核销统计 API 处理器

use axum::{Json, extract::State};

use crate::{dto::ApiResponse, error::CouponError, models::AnalyticsReport, state::AppState};

/// 核销统计报表
///
/// GET /api/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AnalyticsReport>>, CouponError> {
    let report = state.analytics.get_analytics().await?;
    Ok(Json(ApiResponse::success(report)))
}
