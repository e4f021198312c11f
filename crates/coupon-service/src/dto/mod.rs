//! HTTP 请求与响应 DTO

pub mod request;
pub mod response;

pub use request::{CreateRuleRequest, RedeemCouponRequest, ValidateCouponRequest};
pub use response::{ApiResponse, HealthResponse, RedeemCouponResponse};
