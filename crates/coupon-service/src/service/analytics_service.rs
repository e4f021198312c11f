//! 核销统计服务
//!
//! 每次请求都从当前优惠券集合重新计算。统计函数是 `(优惠券, 门店, 今天)` 上的纯函数，
//! 服务只负责读取仓储并提供当前日期。

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::{
    AnalyticsReport, Coupon, CouponType, CouponTypeAnalytics, PartnerStore, StoreAnalytics,
    TimeAnalytics,
};
use crate::repository::{CouponRepositoryTrait, StoreRepositoryTrait};

/// 时间线覆盖的天数（含今天）
pub const TIMELINE_DAYS: i64 = 7;

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn used_count(coupons: &[Coupon]) -> usize {
    coupons.iter().filter(|c| c.is_used).count()
}

/// 按优惠券类型统计已核销数量
///
/// 五种类型始终全部出现，按数量降序，数量相同时保持类型声明顺序
pub fn coupon_type_breakdown(coupons: &[Coupon]) -> Vec<CouponTypeAnalytics> {
    let total = used_count(coupons);

    let mut breakdown: Vec<_> = CouponType::ALL
        .iter()
        .map(|&coupon_type| {
            let count = coupons
                .iter()
                .filter(|c| c.is_used && c.coupon_type == coupon_type)
                .count();
            CouponTypeAnalytics {
                coupon_type,
                label: coupon_type.label().to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    // sort_by 是稳定排序
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));
    breakdown
}

/// 按门店统计核销数量
///
/// 数量取自优惠券的 `used_by_store`，而非门店自身的计数字段
pub fn store_breakdown(coupons: &[Coupon], stores: &[PartnerStore]) -> Vec<StoreAnalytics> {
    let total = used_count(coupons);

    let mut breakdown: Vec<_> = stores
        .iter()
        .map(|store| {
            let count = coupons
                .iter()
                .filter(|c| c.used_by_store.as_deref() == Some(store.id.as_str()))
                .count();
            StoreAnalytics {
                store_id: store.id.clone(),
                store_name: store.name.clone(),
                coupons_redeemed: count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    breakdown.sort_by(|a, b| b.coupons_redeemed.cmp(&a.coupons_redeemed));
    breakdown
}

/// 截止 `today`（含）的最近七天核销数，旧日期在前
pub fn redemption_timeline(coupons: &[Coupon], today: NaiveDate) -> Vec<TimeAnalytics> {
    (0..TIMELINE_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let count = coupons
                .iter()
                .filter_map(|c| c.used_at)
                .filter(|used_at| used_at.date_naive() == day)
                .count();
            TimeAnalytics {
                date: day.format("%Y-%m-%d").to_string(),
                count,
            }
        })
        .collect()
}

/// 生成完整报表
pub fn build_report(
    coupons: &[Coupon],
    stores: &[PartnerStore],
    today: NaiveDate,
) -> AnalyticsReport {
    let total_redeemed = used_count(coupons);

    AnalyticsReport {
        coupon_types: coupon_type_breakdown(coupons),
        stores: store_breakdown(coupons, stores),
        timeline: redemption_timeline(coupons, today),
        total_redeemed,
        total_active: coupons.len() - total_redeemed,
    }
}

/// 统计服务
pub struct AnalyticsService<CR, SR>
where
    CR: CouponRepositoryTrait,
    SR: StoreRepositoryTrait,
{
    coupon_repo: Arc<CR>,
    store_repo: Arc<SR>,
}

impl<CR, SR> AnalyticsService<CR, SR>
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

    /// 以 UTC 当天为时间线终点生成报表
    pub async fn get_analytics(&self) -> Result<AnalyticsReport> {
        self.get_analytics_at(Utc::now().date_naive()).await
    }

    #[instrument(skip(self))]
    pub async fn get_analytics_at(&self, today: NaiveDate) -> Result<AnalyticsReport> {
        let coupons = self.coupon_repo.list_coupons().await?;
        let stores = self.store_repo.list_stores().await?;

        let report = build_report(&coupons, &stores, today);
        debug!(
            total_redeemed = report.total_redeemed,
            total_active = report.total_active,
            "统计报表已生成"
        );
        Ok(report)
    }
}
