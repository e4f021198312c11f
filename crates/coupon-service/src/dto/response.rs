//! HTTP 响应 DTO 定义

use serde::Serialize;

use crate::models::Coupon;
use crate::service::RedemptionReceipt;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, "操作成功")
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 失败但仍携带数据的响应（如已使用的优惠券仍返回详情）
    pub fn rejected(code: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 核销结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCouponResponse {
    pub coupon: Coupon,
    pub store_id: String,
    pub store_name: String,
    pub store_coupons_redeemed: u32,
}

impl From<RedemptionReceipt> for RedeemCouponResponse {
    fn from(receipt: RedemptionReceipt) -> Self {
        Self {
            coupon: receipt.coupon,
            store_id: receipt.store.id,
            store_name: receipt.store.name,
            store_coupons_redeemed: receipt.store.coupons_redeemed,
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
