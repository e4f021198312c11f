//! 优惠券 API 处理器
//!
//! 列表、按券码查询、核验与核销。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    dto::{ApiResponse, RedeemCouponRequest, RedeemCouponResponse, ValidateCouponRequest},
    error::CouponError,
    models::Coupon,
    service::CouponCheck,
    state::AppState,
};

/// 优惠券列表
///
/// GET /api/coupons
pub async fn list_coupons(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Coupon>>>, CouponError> {
    let coupons = state.queries.list_coupons().await?;
    Ok(Json(ApiResponse::success(coupons)))
}

/// 按券码查询
///
/// GET /api/coupons/{code}
pub async fn get_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Coupon>>, CouponError> {
    let coupon = state.queries.get_coupon_by_code(&code).await?;
    Ok(Json(ApiResponse::success(coupon)))
}

/// 核验优惠券
///
/// POST /api/coupons/validate
///
/// 已使用或已过期时返回对应错误状态码，响应体仍携带门店与优惠券
pub async fn validate_coupon(
    State(state): State<AppState>,
    Json(req): Json<ValidateCouponRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CouponCheck>>), CouponError> {
    req.validate()?;

    let check = state
        .redemptions
        .validate_coupon(&req.coupon_code, &req.store_token)
        .await?;
    let message = check.message();

    match check.rejection() {
        None => Ok((
            StatusCode::OK,
            Json(ApiResponse::success_with_message(check, message)),
        )),
        Some(err) => Ok((
            err.status_code(),
            Json(ApiResponse::rejected(err.error_code(), message, check)),
        )),
    }
}

/// 核销优惠券
///
/// POST /api/coupons/redeem
pub async fn redeem_coupon(
    State(state): State<AppState>,
    Json(req): Json<RedeemCouponRequest>,
) -> Result<Json<ApiResponse<RedeemCouponResponse>>, CouponError> {
    req.validate()?;

    let receipt = state
        .redemptions
        .redeem(&req.coupon_code, &req.store_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        receipt.into(),
        "Cupom resgatado com sucesso!",
    )))
}
