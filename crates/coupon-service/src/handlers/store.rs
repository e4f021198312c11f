//! 合作门店 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{dto::ApiResponse, error::CouponError, models::PartnerStore, state::AppState};

/// 门店列表
///
/// GET /api/stores
pub async fn list_stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PartnerStore>>>, CouponError> {
    let stores = state.queries.list_stores().await?;
    Ok(Json(ApiResponse::success(stores)))
}

/// 按令牌查询门店（令牌即门店登录凭证）
///
/// GET /api/stores/token/{token}
pub async fn get_store_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<PartnerStore>>, CouponError> {
    let store = state.queries.find_store_by_token(&token).await?;
    Ok(Json(ApiResponse::success(store)))
}
