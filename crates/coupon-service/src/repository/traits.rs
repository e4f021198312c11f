//! 仓储 Trait 定义
//!
//! 定义仓储接口，服务层依赖抽象而非具体实现，便于替换持久化后端和 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coupon, CouponRule, NewCouponRule, PartnerStore};

/// 优惠券修改闭包
///
/// 返回 Err 时仓储必须保持记录不变
pub type CouponMutator = Box<dyn FnOnce(&mut Coupon) -> Result<()> + Send>;

/// 规则修改闭包
pub type RuleMutator = Box<dyn FnOnce(&mut CouponRule) + Send>;

/// 优惠券仓储接口
///
/// 券码唯一，作为优惠券的查找键
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepositoryTrait: Send + Sync {
    async fn list_coupons(&self) -> Result<Vec<Coupon>>;
    async fn get_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>>;

    /// 对单条优惠券执行原子的"检查后修改"，返回修改后的记录
    ///
    /// 券码不存在时返回 `CouponNotFound`
    async fn update_coupon(&self, code: &str, mutator: CouponMutator) -> Result<Coupon>;

    /// 整条覆盖（用于核销失败时恢复原状）
    async fn replace_coupon(&self, coupon: Coupon) -> Result<()>;
}

/// 门店仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepositoryTrait: Send + Sync {
    async fn list_stores(&self) -> Result<Vec<PartnerStore>>;
    async fn get_store(&self, id: &str) -> Result<Option<PartnerStore>>;
    async fn find_store_by_token(&self, token: &str) -> Result<Option<PartnerStore>>;

    /// 累加门店核销计数，门店不存在时返回 `StoreNotFound`
    async fn increment_redeemed_count(&self, id: &str, delta: u32) -> Result<PartnerStore>;
}

/// 规则仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RuleRepositoryTrait: Send + Sync {
    async fn list_rules(&self) -> Result<Vec<CouponRule>>;
    async fn get_rule(&self, id: &str) -> Result<Option<CouponRule>>;

    /// 分配 ID 与创建时间后追加
    async fn create_rule(&self, rule: NewCouponRule) -> Result<CouponRule>;

    /// 原地修改一条规则，规则不存在时返回 `RuleNotFound`
    async fn update_rule(&self, id: &str, mutator: RuleMutator) -> Result<CouponRule>;
}
