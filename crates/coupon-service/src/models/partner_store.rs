//! 合作门店模型

use serde::{Deserialize, Serialize};

/// 合作门店
///
/// `token` 是门店共享密钥，核销时用来识别门店。
/// `coupons_redeemed` 应始终等于 `used_by_store` 指向本门店的优惠券数量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerStore {
    pub id: String,
    pub name: String,
    pub token: String,
    pub location: String,
    pub coupons_redeemed: u32,
}
