//! 核销统计模型
//!
//! 每次请求时从优惠券集合实时计算，不做缓存。

use serde::{Deserialize, Serialize};

use super::CouponType;

/// 按优惠券类型统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponTypeAnalytics {
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// 按门店统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalytics {
    pub store_id: String,
    pub store_name: String,
    pub coupons_redeemed: usize,
    pub percentage: f64,
}

/// 按自然日统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAnalytics {
    /// YYYY-MM-DD
    pub date: String,
    pub count: usize,
}

/// 统计报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub coupon_types: Vec<CouponTypeAnalytics>,
    pub stores: Vec<StoreAnalytics>,
    pub timeline: Vec<TimeAnalytics>,
    pub total_redeemed: usize,
    pub total_active: usize,
}
