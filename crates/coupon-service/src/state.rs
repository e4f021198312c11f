//! 应用状态定义
//!
//! 包含 Axum 路由与 CLI 共享的服务实例

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::generators::SeedCatalog;
use crate::repository::{InMemoryCouponRepository, InMemoryRuleRepository, InMemoryStoreRepository};
use crate::service::{AnalyticsService, CouponQueryService, RedemptionService, RuleService};

type Coupons = InMemoryCouponRepository;
type Stores = InMemoryStoreRepository;

/// 应用共享状态
///
/// 所有服务共享同一组内存仓储，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<CouponQueryService<Coupons, Stores>>,
    pub redemptions: Arc<RedemptionService<Coupons, Stores>>,
    pub analytics: Arc<AnalyticsService<Coupons, Stores>>,
    pub rules: Arc<RuleService<InMemoryRuleRepository>>,
}

impl AppState {
    /// 以给定目录填充仓储并组装服务
    pub fn new(catalog: SeedCatalog) -> Self {
        let coupons = Arc::new(InMemoryCouponRepository::new(catalog.coupons));
        let stores = Arc::new(InMemoryStoreRepository::new(catalog.stores));
        let rules = Arc::new(InMemoryRuleRepository::new(catalog.rules));

        Self {
            queries: Arc::new(CouponQueryService::new(coupons.clone(), stores.clone())),
            redemptions: Arc::new(RedemptionService::new(coupons.clone(), stores.clone())),
            analytics: Arc::new(AnalyticsService::new(coupons, stores)),
            rules: Arc::new(RuleService::new(rules)),
        }
    }

    /// 默认种子数据
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(SeedCatalog::generate(now))
    }

    /// 按配置决定是否填充种子数据
    pub fn from_seed_flag(enabled: bool) -> Self {
        if enabled {
            Self::seeded(Utc::now())
        } else {
            Self::new(SeedCatalog::empty())
        }
    }
}
