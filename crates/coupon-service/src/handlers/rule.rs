//! 发放规则 API 处理器
//!
//! 规则只是模板，创建与启停不会触发任何发券动作。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{ApiResponse, CreateRuleRequest},
    error::CouponError,
    models::CouponRule,
    state::AppState,
};

/// 规则列表
///
/// GET /api/rules
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CouponRule>>>, CouponError> {
    let rules = state.rules.list_rules().await?;
    Ok(Json(ApiResponse::success(rules)))
}

/// 规则详情
///
/// GET /api/rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CouponRule>>, CouponError> {
    let rule = state.rules.get_rule(&id).await?;
    Ok(Json(ApiResponse::success(rule)))
}

/// 创建规则
///
/// POST /api/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CouponRule>>), CouponError> {
    req.validate()?;

    let rule = state.rules.create_rule(req.into_new_rule()?).await?;
    info!(rule_id = %rule.id, "Rule created via API");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(rule, "Regra criada com sucesso!")),
    ))
}

/// 启停规则
///
/// PATCH /api/rules/{id}/toggle
pub async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CouponRule>>, CouponError> {
    let rule = state.rules.toggle_rule(&id).await?;
    Ok(Json(ApiResponse::success(rule)))
}
