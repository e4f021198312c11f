//! 仓储内存实现
//!
//! 基于 `MemoryStore`，数据只在进程生命周期内有效。

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;

use super::traits::{
    CouponMutator, CouponRepositoryTrait, RuleMutator, RuleRepositoryTrait, StoreRepositoryTrait,
};
use crate::error::{CouponError, Result};
use crate::models::{Coupon, CouponRule, NewCouponRule, PartnerStore};
use crate::store::MemoryStore;

/// 数字字符串 ID 的自然顺序（"2" < "10"）
fn id_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// ============================================================================
// 优惠券
// ============================================================================

/// 优惠券内存仓储，以券码为键
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponRepository {
    coupons: MemoryStore<Coupon>,
}

impl InMemoryCouponRepository {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        let store = MemoryStore::new();
        store.insert_many(coupons, |c| c.code.clone());
        Self { coupons: store }
    }
}

#[async_trait]
impl CouponRepositoryTrait for InMemoryCouponRepository {
    async fn list_coupons(&self) -> Result<Vec<Coupon>> {
        let mut coupons = self.coupons.list();
        coupons.sort_by(|a, b| id_order(&a.id, &b.id));
        Ok(coupons)
    }

    async fn get_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>> {
        Ok(self.coupons.get(code))
    }

    async fn update_coupon(&self, code: &str, mutator: CouponMutator) -> Result<Coupon> {
        // 在草稿上修改，成功后才写回，保证失败时记录不变
        self.coupons
            .update(code, |coupon| {
                let mut draft = coupon.clone();
                mutator(&mut draft)?;
                *coupon = draft.clone();
                Ok(draft)
            })
            .unwrap_or_else(|| Err(CouponError::CouponNotFound(code.to_string())))
    }

    async fn replace_coupon(&self, coupon: Coupon) -> Result<()> {
        if !self.coupons.contains(&coupon.code) {
            return Err(CouponError::CouponNotFound(coupon.code));
        }
        let code = coupon.code.clone();
        self.coupons.insert(&code, coupon);
        Ok(())
    }
}

// ============================================================================
// 门店
// ============================================================================

/// 门店内存仓储，以门店 ID 为键
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreRepository {
    stores: MemoryStore<PartnerStore>,
}

impl InMemoryStoreRepository {
    pub fn new(stores: Vec<PartnerStore>) -> Self {
        let store = MemoryStore::new();
        store.insert_many(stores, |s| s.id.clone());
        Self { stores: store }
    }
}

#[async_trait]
impl StoreRepositoryTrait for InMemoryStoreRepository {
    async fn list_stores(&self) -> Result<Vec<PartnerStore>> {
        let mut stores = self.stores.list();
        stores.sort_by(|a, b| id_order(&a.id, &b.id));
        Ok(stores)
    }

    async fn get_store(&self, id: &str) -> Result<Option<PartnerStore>> {
        Ok(self.stores.get(id))
    }

    async fn find_store_by_token(&self, token: &str) -> Result<Option<PartnerStore>> {
        Ok(self.stores.find(|s| s.token == token))
    }

    async fn increment_redeemed_count(&self, id: &str, delta: u32) -> Result<PartnerStore> {
        self.stores
            .update(id, |store| {
                store.coupons_redeemed += delta;
                store.clone()
            })
            .ok_or_else(|| CouponError::StoreNotFound(id.to_string()))
    }
}

// ============================================================================
// 规则
// ============================================================================

/// 规则内存仓储
///
/// ID 为递增的数字字符串，从已有规则的最大 ID 之后开始分配
#[derive(Debug)]
pub struct InMemoryRuleRepository {
    rules: MemoryStore<CouponRule>,
    next_id: AtomicU64,
}

impl Default for InMemoryRuleRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryRuleRepository {
    pub fn new(rules: Vec<CouponRule>) -> Self {
        let max_id = rules
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        let store = MemoryStore::new();
        store.insert_many(rules, |r| r.id.clone());

        Self {
            rules: store,
            next_id: AtomicU64::new(max_id + 1),
        }
    }
}

#[async_trait]
impl RuleRepositoryTrait for InMemoryRuleRepository {
    async fn list_rules(&self) -> Result<Vec<CouponRule>> {
        let mut rules = self.rules.list();
        rules.sort_by(|a, b| id_order(&a.id, &b.id));
        Ok(rules)
    }

    async fn get_rule(&self, id: &str) -> Result<Option<CouponRule>> {
        Ok(self.rules.get(id))
    }

    async fn create_rule(&self, rule: NewCouponRule) -> Result<CouponRule> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst).to_string();
        let rule = rule.into_rule(id, Utc::now());
        self.rules.insert(&rule.id, rule.clone());
        Ok(rule)
    }

    async fn update_rule(&self, id: &str, mutator: RuleMutator) -> Result<CouponRule> {
        self.rules
            .update(id, |rule| {
                mutator(rule);
                rule.clone()
            })
            .ok_or_else(|| CouponError::RuleNotFound(id.to_string()))
    }
}
