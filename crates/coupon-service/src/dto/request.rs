//! HTTP 请求 DTO 定义

use serde::Deserialize;
use validator::Validate;

use crate::error::{CouponError, Result};
use crate::models::{CouponType, NewCouponRule, TriggerType};

/// 核验优惠券请求
///
/// 扫码得到的券码与手输券码同样提交到 `couponCode`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    #[validate(length(min = 1, max = 64, message = "O código do cupom deve ter entre 1 e 64 caracteres"))]
    pub coupon_code: String,
    #[validate(length(min = 1, max = 64, message = "O token da loja deve ter entre 1 e 64 caracteres"))]
    pub store_token: String,
}

/// 核销优惠券请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCouponRequest {
    #[validate(length(min = 1, max = 64, message = "O código do cupom deve ter entre 1 e 64 caracteres"))]
    pub coupon_code: String,
    #[validate(length(min = 1, message = "Por favor, informe a loja"))]
    pub store_id: String,
}

fn default_active() -> bool {
    true
}

/// 创建发放规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 100, message = "O nome da regra deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(min = 1, max = 500, message = "A descrição da regra deve ter entre 1 e 500 caracteres"))]
    pub description: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    #[validate(range(min = 1, max = 100, message = "O desconto deve estar entre 1 e 100"))]
    pub discount: i64,
    pub trigger_type: TriggerType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateRuleRequest {
    /// 转换为待创建规则，折扣超出 u8 范围时返回校验错误
    pub fn into_new_rule(self) -> Result<NewCouponRule> {
        let discount = u8::try_from(self.discount)
            .map_err(|_| CouponError::Validation(format!("Desconto inválido: {}", self.discount)))?;

        Ok(NewCouponRule {
            name: self.name,
            description: self.description,
            coupon_type: self.coupon_type,
            discount,
            trigger_type: self.trigger_type,
            is_active: self.is_active,
        })
    }
}
