//! 优惠券核验与核销服务
//!
//! ## 核验流程
//!
//! 1. 输入规整（去除首尾空白，空值拒绝） -> 2. 按令牌查找门店 -> 3. 按券码查找优惠券
//!    -> 4. 判断可用性（先已使用，后过期）
//!
//! ## 核销流程
//!
//! 1. 按 ID 解析门店 -> 2. 在单条记录锁内复核可用性并标记核销
//!    -> 3. 门店计数 +1，失败时恢复优惠券原状

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use coupon_shared::observability::metrics;

use crate::error::{CouponError, Result};
use crate::models::{Coupon, CouponValidity};
use crate::repository::{CouponRepositoryTrait, StoreRepositoryTrait};
use crate::service::dto::{CouponCheck, RedemptionReceipt};

/// 去除首尾空白，空值返回带 `missing` 提示的校验错误
fn normalize<'a>(value: &'a str, missing: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CouponError::Validation(missing.to_string()));
    }
    Ok(trimmed)
}

/// 核验与核销服务
pub struct RedemptionService<CR, SR>
where
    CR: CouponRepositoryTrait,
    SR: StoreRepositoryTrait,
{
    coupon_repo: Arc<CR>,
    store_repo: Arc<SR>,
}

impl<CR, SR> RedemptionService<CR, SR>
where
    CR: CouponRepositoryTrait,
    SR: StoreRepositoryTrait,
{
    pub fn new(coupon_repo: Arc<CR>, store_repo: Arc<SR>) -> Self {
        Self {
            coupon_repo,
            store_repo,
        }
    }

    /// 核验优惠券在指定门店是否可用
    pub async fn validate_coupon(&self, code: &str, store_token: &str) -> Result<CouponCheck> {
        self.validate_coupon_at(code, store_token, Utc::now()).await
    }

    /// 以给定时刻核验
    ///
    /// 门店或优惠券不存在返回错误；已使用、已过期作为结论返回
    #[instrument(skip(self, code, store_token), fields(code = %code.trim()))]
    pub async fn validate_coupon_at(
        &self,
        code: &str,
        store_token: &str,
        now: DateTime<Utc>,
    ) -> Result<CouponCheck> {
        let result = self.check(code, store_token, now).await;

        let status = match &result {
            Ok(check) => check.validity.as_str(),
            Err(e) => e.error_code(),
        };
        metrics::record_validation(status);

        match &result {
            Ok(check) => info!(
                store_id = %check.store.id,
                validity = status,
                "优惠券核验完成"
            ),
            Err(e) => warn!(error = %e, "优惠券核验失败"),
        }

        result
    }

    async fn check(&self, code: &str, store_token: &str, now: DateTime<Utc>) -> Result<CouponCheck> {
        let code = normalize(code, "Por favor, informe o código do cupom")?;
        let store_token = normalize(store_token, "Por favor, informe o token da loja")?;

        let store = self
            .store_repo
            .find_store_by_token(store_token)
            .await?
            .ok_or_else(|| CouponError::StoreNotFound(store_token.to_string()))?;

        let coupon = self
            .coupon_repo
            .get_coupon_by_code(code)
            .await?
            .ok_or_else(|| CouponError::CouponNotFound(code.to_string()))?;

        let validity = coupon.validity_at(now);
        Ok(CouponCheck {
            store,
            coupon,
            validity,
        })
    }

    /// 在指定门店核销优惠券
    pub async fn redeem(&self, code: &str, store_id: &str) -> Result<RedemptionReceipt> {
        self.redeem_at(code, store_id, Utc::now()).await
    }

    /// 以给定时刻核销
    ///
    /// 成功时优惠券与门店计数同时更新，失败时两者均保持不变
    #[instrument(skip(self, code, store_id), fields(code = %code.trim(), store_id = %store_id.trim()))]
    pub async fn redeem_at(
        &self,
        code: &str,
        store_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RedemptionReceipt> {
        let start = Instant::now();
        let result = self.do_redeem(code, store_id, now).await;

        let status = match &result {
            Ok(_) => "success",
            Err(e) => e.error_code(),
        };
        metrics::record_redemption(status, start.elapsed().as_secs_f64());

        match &result {
            Ok(receipt) => info!(
                coupon_id = %receipt.coupon.id,
                coupons_redeemed = receipt.store.coupons_redeemed,
                "优惠券核销成功"
            ),
            Err(e) if e.is_business_error() => warn!(error = %e, "优惠券核销被拒绝"),
            Err(e) => error!(error = %e, "优惠券核销失败"),
        }

        result
    }

    async fn do_redeem(
        &self,
        code: &str,
        store_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RedemptionReceipt> {
        let code = normalize(code, "Por favor, informe o código do cupom")?;
        let store_id = normalize(store_id, "Por favor, informe a loja")?;

        // 先确认门店存在，未知门店不触碰优惠券
        self.store_repo
            .get_store(store_id)
            .await?
            .ok_or_else(|| CouponError::StoreNotFound(store_id.to_string()))?;

        let marking_store = store_id.to_string();
        let coupon = self
            .coupon_repo
            .update_coupon(
                code,
                Box::new(move |coupon: &mut Coupon| {
                    // 复核：核验与核销之间状态可能已变化
                    match coupon.validity_at(now) {
                        CouponValidity::Valid => {
                            coupon.mark_redeemed(&marking_store, now);
                            Ok(())
                        }
                        CouponValidity::AlreadyUsed => {
                            Err(CouponError::AlreadyUsed {
                                code: coupon.code.clone(),
                            })
                        }
                        CouponValidity::Expired => Err(CouponError::Expired {
                            code: coupon.code.clone(),
                        }),
                    }
                }),
            )
            .await?;

        match self.store_repo.increment_redeemed_count(store_id, 1).await {
            Ok(store) => Ok(RedemptionReceipt { coupon, store }),
            Err(e) => {
                self.restore_unused(&coupon).await;
                Err(e)
            }
        }
    }

    /// 门店计数失败时撤销优惠券的核销标记
    ///
    /// 能够被核销的优惠券此前必然未使用，因此原状即清空核销字段
    async fn restore_unused(&self, redeemed: &Coupon) {
        let mut previous = redeemed.clone();
        previous.is_used = false;
        previous.used_at = None;
        previous.used_by_store = None;

        if let Err(e) = self.coupon_repo.replace_coupon(previous).await {
            error!(code = %redeemed.code, error = %e, "恢复优惠券状态失败");
        }
    }
}
