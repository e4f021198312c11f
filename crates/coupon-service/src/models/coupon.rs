//! 优惠券模型
//!
//! 优惠券由规则模板发放给顾客，在合作门店出示后核销。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 优惠券
///
/// `is_used` 一旦为 true，`used_at` 与 `used_by_store` 必须同时有值且不再清除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    /// 唯一券码（手输或扫码得到）
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    /// 折扣百分比
    pub discount: u8,
    pub description: String,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    /// 核销门店 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by_store: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 优惠券类型
///
/// 规则与优惠券共用同一组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    /// 首次购买
    FirstPurchase,
    /// 生日
    Birthday,
    /// 忠诚度
    Loyalty,
    /// 特别促销
    SpecialPromotion,
    /// 推荐好友
    Referral,
}

impl CouponType {
    /// 全部类型，按声明顺序
    pub const ALL: [CouponType; 5] = [
        Self::FirstPurchase,
        Self::Birthday,
        Self::Loyalty,
        Self::SpecialPromotion,
        Self::Referral,
    ];

    /// 前端展示名称
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstPurchase => "Primeira Compra",
            Self::Birthday => "Aniversário",
            Self::Loyalty => "Fidelidade",
            Self::SpecialPromotion => "Promoção Especial",
            Self::Referral => "Indicação",
        }
    }
}

/// 优惠券在某一时刻的可用性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponValidity {
    Valid,
    AlreadyUsed,
    Expired,
}

impl CouponValidity {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    /// 与序列化名称一致，用作指标标签
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::AlreadyUsed => "ALREADY_USED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl Coupon {
    /// 判断优惠券在 `now` 时刻的可用性
    ///
    /// 先判断是否已使用，再判断是否过期
    pub fn validity_at(&self, now: DateTime<Utc>) -> CouponValidity {
        if self.is_used {
            CouponValidity::AlreadyUsed
        } else if self.expires_at < now {
            CouponValidity::Expired
        } else {
            CouponValidity::Valid
        }
    }

    /// 标记为已在指定门店核销
    pub fn mark_redeemed(&mut self, store_id: &str, now: DateTime<Utc>) {
        self.is_used = true;
        self.used_at = Some(now);
        self.used_by_store = Some(store_id.to_string());
    }
}
