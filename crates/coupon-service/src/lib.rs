//! Coupon Service
//!
//! 合作门店优惠券核验与核销服务。数据全部保存在内存中，启动时填充种子目录。
//!
//! # 主要模块
//!
//! - `models`: 优惠券、门店、规则与统计报表
//! - `store`: DashMap 内存存储
//! - `repository`: 仓储接口与内存实现
//! - `service`: 查询、核验核销、统计、规则管理
//! - `handlers` / `routes`: HTTP API
//! - `cli`: 命令行入口
//!
//! # 使用示例
//!
//! ```rust
//! use chrono::Utc;
//! use coupon_service::state::AppState;
//!
//! # tokio_test::block_on(async {
//! let state = AppState::seeded(Utc::now());
//!
//! let check = state
//!     .redemptions
//!     .validate_coupon("WELCOME25", "PATINHAS001")
//!     .await
//!     .unwrap();
//! assert!(check.is_valid());
//!
//! let receipt = state.redemptions.redeem("WELCOME25", &check.store.id).await.unwrap();
//! assert_eq!(receipt.store.coupons_redeemed, 3);
//! # });
//! ```

pub mod cli;
pub mod dto;
pub mod error;
pub mod generators;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::{CouponError, Result};
