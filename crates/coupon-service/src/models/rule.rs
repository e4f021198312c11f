//! 优惠券发放规则模型
//!
//! 规则只是模板，本服务不会根据顾客事件自动执行，仅供运营人员创建和启停。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CouponType;

/// 发放规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRule {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub discount: u8,
    pub trigger_type: TriggerType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 规则触发条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    /// 新用户注册
    Registration,
    /// 运营手动发放
    Manual,
    /// 生日
    Birthday,
    /// 累计购买次数
    PurchaseCount,
}

impl TriggerType {
    /// 前端展示名称
    pub fn label(self) -> &'static str {
        match self {
            Self::Registration => "Cadastro",
            Self::Manual => "Manual",
            Self::Birthday => "Aniversário",
            Self::PurchaseCount => "Quantidade de Compras",
        }
    }
}

/// 待创建的规则（ID 与创建时间由仓储分配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCouponRule {
    pub name: String,
    pub description: String,
    pub coupon_type: CouponType,
    pub discount: u8,
    pub trigger_type: TriggerType,
    pub is_active: bool,
}

impl NewCouponRule {
    /// 分配 ID 与创建时间，生成完整规则
    pub fn into_rule(self, id: String, created_at: DateTime<Utc>) -> CouponRule {
        CouponRule {
            id,
            name: self.name,
            description: self.description,
            coupon_type: self.coupon_type,
            discount: self.discount,
            trigger_type: self.trigger_type,
            is_active: self.is_active,
            created_at,
        }
    }
}
