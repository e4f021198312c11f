//! HTTP 处理器
//!
//! 每个模块对应一组资源，处理器只做参数提取、校验和响应封装，业务逻辑在服务层。

pub mod analytics;
pub mod coupon;
pub mod health;
pub mod rule;
pub mod store;
