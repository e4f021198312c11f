//! 服务层数据传输对象

use serde::{Deserialize, Serialize};

use crate::error::{CouponError, Result};
use crate::models::{Coupon, CouponValidity, PartnerStore};

/// 核验结果
///
/// 门店与优惠券均已找到；已使用或已过期时仍携带优惠券供前端展示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheck {
    pub store: PartnerStore,
    pub coupon: Coupon,
    pub validity: CouponValidity,
}

impl CouponCheck {
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// 不可用时对应的错误，可用时为 None
    pub fn rejection(&self) -> Option<CouponError> {
        let code = self.coupon.code.clone();
        match self.validity {
            CouponValidity::Valid => None,
            CouponValidity::AlreadyUsed => Some(CouponError::AlreadyUsed { code }),
            CouponValidity::Expired => Some(CouponError::Expired { code }),
        }
    }

    /// 将不可用的结论转换为对应错误
    pub fn into_result(self) -> Result<Self> {
        match self.rejection() {
            None => Ok(self),
            Some(err) => Err(err),
        }
    }

    /// 面向操作员的提示信息
    pub fn message(&self) -> &'static str {
        match self.validity {
            CouponValidity::Valid => "Cupom válido!",
            CouponValidity::AlreadyUsed => "Este cupom já foi utilizado",
            CouponValidity::Expired => "Este cupom está expirado",
        }
    }
}

/// 核销成功回执
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionReceipt {
    /// 核销后的优惠券
    pub coupon: Coupon,
    /// 累加计数后的门店
    pub store: PartnerStore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CouponType;
    use chrono::{Duration, Utc};

    fn check(validity: CouponValidity) -> CouponCheck {
        let now = Utc::now();
        CouponCheck {
            store: PartnerStore {
                id: "1".to_string(),
                name: "Pet Shop Patinhas".to_string(),
                token: "PATINHAS001".to_string(),
                location: "São Paulo, SP".to_string(),
                coupons_redeemed: 2,
            },
            coupon: Coupon {
                id: "1".to_string(),
                code: "WELCOME25".to_string(),
                coupon_type: CouponType::FirstPurchase,
                discount: 25,
                description: "primeira compra".to_string(),
                expires_at: now + Duration::days(30),
                is_used: false,
                used_at: None,
                used_by_store: None,
                created_at: now,
            },
            validity,
        }
    }

    #[test]
    fn test_into_result() {
        assert!(check(CouponValidity::Valid).into_result().is_ok());

        let used = check(CouponValidity::AlreadyUsed).into_result();
        assert!(matches!(used, Err(CouponError::AlreadyUsed { code }) if code == "WELCOME25"));

        let expired = check(CouponValidity::Expired).into_result();
        assert!(matches!(expired, Err(CouponError::Expired { .. })));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(check(CouponValidity::AlreadyUsed)).unwrap();
        assert_eq!(json["validity"], "ALREADY_USED");
        assert_eq!(json["store"]["couponsRedeemed"], 2);
        assert_eq!(json["coupon"]["code"], "WELCOME25");
    }
}
