//! 查询服务
//!
//! 优惠券与门店的只读查询，未找到时统一转换为对应的 NotFound 错误。

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{CouponError, Result};
use crate::models::{Coupon, PartnerStore};
use crate::repository::{CouponRepositoryTrait, StoreRepositoryTrait};

/// 优惠券与门店查询服务
pub struct CouponQueryService<CR, SR>
where
    CR: CouponRepositoryTrait,
    SR: StoreRepositoryTrait,
{
    coupon_repo: Arc<CR>,
    store_repo: Arc<SR>,
}

impl<CR, SR> CouponQueryService<CR, SR>
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

    pub async fn list_coupons(&self) -> Result<Vec<Coupon>> {
        self.coupon_repo.list_coupons().await
    }

    #[instrument(skip(self))]
    pub async fn get_coupon_by_code(&self, code: &str) -> Result<Coupon> {
        let code = code.trim();
        self.coupon_repo
            .get_coupon_by_code(code)
            .await?
            .ok_or_else(|| CouponError::CouponNotFound(code.to_string()))
    }

    pub async fn list_stores(&self) -> Result<Vec<PartnerStore>> {
        self.store_repo.list_stores().await
    }

    #[instrument(skip(self, token))]
    pub async fn find_store_by_token(&self, token: &str) -> Result<PartnerStore> {
        let token = token.trim();
        let store = self
            .store_repo
            .find_store_by_token(token)
            .await?
            .ok_or_else(|| CouponError::StoreNotFound(token.to_string()))?;

        debug!(store_id = %store.id, "门店令牌匹配");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCouponRepositoryTrait, MockStoreRepositoryTrait};

    fn store() -> PartnerStore {
        PartnerStore {
            id: "3".to_string(),
            name: "Casa dos Bichos".to_string(),
            token: "BICHOS003".to_string(),
            location: "Belo Horizonte, MG".to_string(),
            coupons_redeemed: 1,
        }
    }

    fn service(
        coupons: MockCouponRepositoryTrait,
        stores: MockStoreRepositoryTrait,
    ) -> CouponQueryService<MockCouponRepositoryTrait, MockStoreRepositoryTrait> {
        CouponQueryService::new(Arc::new(coupons), Arc::new(stores))
    }

    #[tokio::test]
    async fn test_find_store_by_token_trims_input() {
        let mut stores = MockStoreRepositoryTrait::new();
        stores
            .expect_find_store_by_token()
            .withf(|token| token == "BICHOS003")
            .once()
            .returning(|_| Ok(Some(store())));

        let found = service(MockCouponRepositoryTrait::new(), stores)
            .find_store_by_token("  BICHOS003 ")
            .await
            .unwrap();
        assert_eq!(found.name, "Casa dos Bichos");
    }

    #[tokio::test]
    async fn test_unknown_token_is_store_not_found() {
        let mut stores = MockStoreRepositoryTrait::new();
        stores.expect_find_store_by_token().returning(|_| Ok(None));

        let result = service(MockCouponRepositoryTrait::new(), stores)
            .find_store_by_token("NOPE")
            .await;
        assert!(matches!(result, Err(CouponError::StoreNotFound(t)) if t == "NOPE"));
    }

    #[tokio::test]
    async fn test_unknown_code_is_coupon_not_found() {
        let mut coupons = MockCouponRepositoryTrait::new();
        coupons.expect_get_coupon_by_code().returning(|_| Ok(None));

        let result = service(coupons, MockStoreRepositoryTrait::new())
            .get_coupon_by_code("NOPE")
            .await;
        assert!(matches!(result, Err(CouponError::CouponNotFound(_))));
    }
}
