//! 服务层
//!
//! 实现优惠券业务逻辑，仅依赖仓储 Trait。
//!
//! ## 模块结构
//!
//! - `dto`: 服务层数据传输对象
//! - `query_service`: 优惠券与门店查询
//! - `redemption_service`: 核验与核销
//! - `analytics_service`: 核销统计
//! - `rule_service`: 发放规则管理

pub mod analytics_service;
pub mod dto;
pub mod query_service;
pub mod redemption_service;
pub mod rule_service;

pub use analytics_service::AnalyticsService;
pub use dto::{CouponCheck, RedemptionReceipt};
pub use query_service::CouponQueryService;
pub use redemption_service::RedemptionService;
pub use rule_service::RuleService;
