//! 数据模型
//!
//! 包含优惠券、合作门店、发放规则以及统计报表的数据结构。

pub mod analytics;
pub mod coupon;
pub mod partner_store;
pub mod rule;

pub use analytics::{AnalyticsReport, CouponTypeAnalytics, StoreAnalytics, TimeAnalytics};
pub use coupon::{Coupon, CouponType, CouponValidity};
pub use partner_store::PartnerStore;
pub use rule::{CouponRule, NewCouponRule, TriggerType};
