//! 数据访问层
//!
//! 提供优惠券、门店、规则的仓储接口与内存实现

mod memory;
mod traits;

pub use memory::{InMemoryCouponRepository, InMemoryRuleRepository, InMemoryStoreRepository};
pub use traits::{
    CouponMutator, CouponRepositoryTrait, RuleMutator, RuleRepositoryTrait, StoreRepositoryTrait,
};

#[cfg(test)]
pub use traits::{MockCouponRepositoryTrait, MockRuleRepositoryTrait, MockStoreRepositoryTrait};
