//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `server` - 启动 HTTP REST API 服务
//! - `validate` - 核验优惠券
//! - `redeem` - 核销优惠券
//! - `analytics` - 输出核销统计
//! - `rules` - 输出发放规则
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器
//! coupon-server server --port 8080
//!
//! # 核验与核销
//! coupon-server validate --code WELCOME25 --token PATINHAS001
//! coupon-server redeem -c WELCOME25 -t PATINHAS001
//!
//! # 报表
//! coupon-server analytics
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
